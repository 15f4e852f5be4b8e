use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::preset::{self, StylePreset};
use crate::sanitize::EffectiveStyle;

/// Flowchart layout direction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TD")]
    Td,
    #[serde(rename = "LR")]
    Lr,
    #[serde(rename = "RL")]
    Rl,
    #[serde(rename = "BT")]
    Bt,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Td => "TD",
            Direction::Lr => "LR",
            Direction::Rl => "RL",
            Direction::Bt => "BT",
        }
    }

    /// Horizontal layouts get wider default spacing.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Lr | Direction::Rl)
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "TD" => Some(Direction::Td),
            "LR" => Some(Direction::Lr),
            "RL" => Some(Direction::Rl),
            "BT" => Some(Direction::Bt),
            _ => None,
        }
    }
}

/// The engine's configuration document, as JSON.
///
/// The rendering engine accepts an arbitrary nested configuration object;
/// this newtype keeps it opaque while offering dotted-path access and deep
/// merge for callers that need to poke at it.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig(Value);

impl Default for EngineConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl EngineConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_str()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_u64()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        cur.as_bool()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Callers can construct `EngineConfig` from any JSON value via
        // `from_value`. Engine configs are objects; if we see a non-object
        // here, coerce it so this API never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

fn base_theme_variables(base: &StylePreset) -> Map<String, Value> {
    let mut vars = Map::new();
    let mut set = |key: &str, value: &str| {
        vars.insert(key.to_string(), Value::String(value.to_string()));
    };
    set("primaryColor", base.primary_color);
    set("primaryTextColor", base.primary_text_color);
    set("primaryBorderColor", base.primary_border_color);
    set("lineColor", base.line_color);
    set("secondaryColor", base.secondary_color);
    set("secondaryTextColor", base.secondary_text_color);
    set("secondaryBorderColor", base.secondary_border_color);
    set("tertiaryColor", base.tertiary_color);
    set("tertiaryTextColor", base.tertiary_text_color);
    set("tertiaryBorderColor", base.tertiary_border_color);
    set("background", base.background);
    set("mainBkg", base.main_bkg);
    set("secondBkg", base.second_bkg);
    set("tertiaryBkg", base.tertiary_bkg);
    set("textColor", base.text_color);
    set("border1", base.border1);
    set("border2", base.border2);
    set("fontSize", base.font_size);
    set("fontFamily", base.font_family);
    set("nodeBorder", base.node_border);
    set("clusterBkg", base.cluster_bkg);
    set("clusterBorder", base.cluster_border);
    set("defaultLinkColor", base.default_link_color);
    set("titleColor", base.title_color);
    set("edgeLabelBackground", base.edge_label_background);
    set("nodeTextColor", base.node_text_color);
    vars
}

fn theme_variables(style: &EffectiveStyle) -> Value {
    let mut vars = base_theme_variables(style.base_preset());
    let mut set = |vars: &mut Map<String, Value>, key: &str, value: &str| {
        vars.insert(key.to_string(), Value::String(value.to_string()));
    };

    // Only valid overrides are overlaid on the base tokens; an invalid value
    // leaves the engine-side theme untouched (the styler still honors it).
    if style.primary.is_override() {
        let color = style.primary.as_str();
        for key in [
            "primaryColor",
            "mainBkg",
            "cScale0",
            "cScale1",
            "cScale2",
            "c0",
            "c1",
            "c2",
        ] {
            set(&mut vars, key, color);
        }
    }
    if style.secondary.is_override() {
        let color = style.secondary.as_str();
        for key in [
            "secondaryColor",
            "secondBkg",
            "cScale3",
            "cScale4",
            "cScale5",
            "c3",
            "c4",
            "c5",
        ] {
            set(&mut vars, key, color);
        }
    }
    if style.tertiary.is_override() {
        let color = style.tertiary.as_str();
        for key in [
            "tertiaryColor",
            "tertiaryBkg",
            "cScale6",
            "cScale7",
            "cScale8",
            "c6",
            "c7",
            "c8",
        ] {
            set(&mut vars, key, color);
        }
    }
    if style.border.is_override() {
        let color = style.border.as_str();
        for key in ["primaryBorderColor", "nodeBorder", "border1", "border2"] {
            set(&mut vars, key, color);
        }
    }
    if style.background.is_override() {
        let color = style.background.as_str();
        for key in ["background", "edgeLabelBackground"] {
            set(&mut vars, key, color);
        }
    }
    if style.text.is_override() {
        let color = style.text.as_str();
        for key in ["primaryTextColor", "nodeTextColor", "classText", "labelColor"] {
            set(&mut vars, key, color);
        }
    }
    if style.secondary_text.is_override() {
        set(&mut vars, "secondaryTextColor", style.secondary_text.as_str());
    }
    if style.tertiary_text.is_override() {
        set(&mut vars, "tertiaryTextColor", style.tertiary_text.as_str());
    }
    if style.label_text.is_override() {
        let color = style.label_text.as_str();
        for key in [
            "textColor",
            "titleColor",
            "edgeLabelColor",
            "actorTextColor",
            "pieLegendTextColor",
        ] {
            set(&mut vars, key, color);
        }
    }
    if style.line.is_override() {
        let color = style.line.as_str();
        for key in ["lineColor", "defaultLinkColor"] {
            set(&mut vars, key, color);
        }
    }
    if style.accent.is_override() {
        set(&mut vars, "accentColor", style.accent.as_str());
    }

    if let Some(size) = style.font_size {
        vars.insert("fontSize".to_string(), Value::String(format!("{size}px")));
    }
    if let Some(family) = &style.font_family {
        vars.insert("fontFamily".to_string(), Value::String(family.clone()));
    }

    Value::Object(vars)
}

fn or_default(value: Option<u32>, default: u32) -> u32 {
    value.unwrap_or(default)
}

/// Builds the engine configuration for the given effective style and layout
/// direction: `base` theme with overlaid variables plus per-diagram-type
/// layout knobs.
pub fn build_engine_config(style: &EffectiveStyle, direction: Direction) -> EngineConfig {
    let node_spacing_default = if direction.is_horizontal() { 120 } else { 100 };
    let rank_spacing_default = if direction.is_horizontal() { 150 } else { 100 };

    EngineConfig::from_value(json!({
        "theme": "base",
        "securityLevel": "loose",
        "themeVariables": theme_variables(style),
        "flowchart": {
            "useMaxWidth": false,
            "htmlLabels": true,
            "curve": style.curve.as_str(),
            "padding": or_default(style.padding, 30),
            "nodeSpacing": or_default(style.node_spacing, node_spacing_default),
            "rankSpacing": or_default(style.level_spacing, rank_spacing_default),
            "diagramPadding": or_default(style.padding, 20),
        },
        "sequence": {
            "useMaxWidth": false,
            "diagramMarginX": or_default(style.padding, 50),
            "diagramMarginY": or_default(style.padding, 10),
            "actorMargin": or_default(style.node_spacing, 50),
            "width": or_default(style.node_size, 150),
            "height": or_default(style.node_size, 65),
        },
        "gantt": {
            "useMaxWidth": false,
            "leftPadding": or_default(style.padding, 75),
            "gridLineStartPadding": or_default(style.padding, 35),
        },
        "class": { "useMaxWidth": false },
        "state": { "useMaxWidth": false },
        "pie": {
            "useMaxWidth": false,
            "textPosition": 0.5,
        },
        "er": {
            "useMaxWidth": false,
            "entityPadding": or_default(style.padding, 15),
        },
        "journey": {
            "useMaxWidth": false,
            "diagramMarginX": or_default(style.padding, 50),
            "diagramMarginY": or_default(style.padding, 10),
        },
    }))
}

/// Minimal configuration used when the full one is rejected by the engine:
/// base preset tokens only, no user overrides, literal layout defaults.
pub fn fallback_engine_config(theme: &str, direction: Direction) -> EngineConfig {
    let base = preset::preset(theme);
    EngineConfig::from_value(json!({
        "theme": "base",
        "securityLevel": "loose",
        "themeVariables": Value::Object(base_theme_variables(base)),
        "flowchart": {
            "useMaxWidth": false,
            "htmlLabels": true,
            "curve": preset::curve_style(theme).as_str(),
            "padding": 30,
            "nodeSpacing": if direction.is_horizontal() { 120 } else { 100 },
            "rankSpacing": if direction.is_horizontal() { 150 } else { 100 },
            "diagramPadding": 20,
        },
    }))
}
