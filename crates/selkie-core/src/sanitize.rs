use std::sync::OnceLock;

use regex::Regex;

use crate::preset::{self, CurveStyle, StylePreset};
use crate::style::{FontWeight, LineStyle, NodeShape, StyleConfiguration};

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap())
}

/// Strict hex color grammar: `#rgb` or `#rrggbb`, nothing else.
pub fn is_valid_hex_color(color: &str) -> bool {
    hex_color_re().is_match(color)
}

/// Returns the candidate when it satisfies the hex grammar, the fallback
/// otherwise. User input never reaches the engine or the output document
/// unsanitized.
pub fn sanitize_color(candidate: Option<&str>, fallback: &str) -> String {
    match candidate {
        Some(color) if is_valid_hex_color(color) => color.to_string(),
        _ => fallback.to_string(),
    }
}

/// Where a resolved color value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// No override supplied; the preset token is used.
    Preset,
    /// A valid override supplied and used.
    Override,
    /// An override was supplied but failed validation; the preset token is
    /// used, yet the role still counts as "requested" for styler passes.
    InvalidOverride,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColor {
    pub value: String,
    pub source: ColorSource,
}

impl ResolvedColor {
    fn resolve(candidate: Option<&str>, fallback: &str) -> Self {
        match candidate {
            None => Self {
                value: fallback.to_string(),
                source: ColorSource::Preset,
            },
            Some(color) if is_valid_hex_color(color) => Self {
                value: color.to_string(),
                source: ColorSource::Override,
            },
            Some(_) => Self {
                value: fallback.to_string(),
                source: ColorSource::InvalidOverride,
            },
        }
    }

    /// True when the role carries a valid user override. The engine theme
    /// builder only overlays tokens for these.
    pub fn is_override(&self) -> bool {
        self.source == ColorSource::Override
    }

    /// True when the user touched the role at all, valid or not. Styler
    /// passes that react to "was this requested" use this, so a malformed
    /// value still applies its sanitized fallback.
    pub fn is_requested(&self) -> bool {
        self.source != ColorSource::Preset
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Fully resolved style: every color role carries a guaranteed-valid value,
/// non-color fields are copied through from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    pub theme: String,
    pub curve: CurveStyle,

    pub primary: ResolvedColor,
    pub secondary: ResolvedColor,
    pub tertiary: ResolvedColor,
    pub background: ResolvedColor,
    pub text: ResolvedColor,
    pub secondary_text: ResolvedColor,
    pub tertiary_text: ResolvedColor,
    pub label_text: ResolvedColor,
    pub line: ResolvedColor,
    pub accent: ResolvedColor,
    pub border: ResolvedColor,

    pub node_shape: NodeShape,
    pub node_size: Option<u32>,
    pub line_style: Option<LineStyle>,
    pub line_thickness: Option<u32>,
    pub corner_radius: Option<u32>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub node_spacing: Option<u32>,
    pub level_spacing: Option<u32>,
    pub padding: Option<u32>,

    pub shadow: bool,
    pub gradient: bool,
    pub animation: bool,
}

impl EffectiveStyle {
    pub fn base_preset(&self) -> &'static StylePreset {
        preset::preset(&self.theme)
    }
}

/// Merges a candidate configuration with the named theme's base preset.
///
/// Pure function of its inputs. Fallback wiring mirrors the engine theme
/// surface: primary-node text falls back to the preset's primary text token,
/// outside-label text to the preset's general text token, and the accent to
/// the primary color.
pub fn resolve_style(config: &StyleConfiguration, theme: &str) -> EffectiveStyle {
    let base = preset::preset(theme);

    EffectiveStyle {
        theme: theme.to_string(),
        curve: preset::curve_style(theme),

        primary: ResolvedColor::resolve(config.primary.as_deref(), base.primary_color),
        secondary: ResolvedColor::resolve(config.secondary.as_deref(), base.secondary_color),
        tertiary: ResolvedColor::resolve(config.tertiary.as_deref(), base.tertiary_color),
        background: ResolvedColor::resolve(config.background.as_deref(), base.background),
        text: ResolvedColor::resolve(config.text.as_deref(), base.primary_text_color),
        secondary_text: ResolvedColor::resolve(
            config.secondary_text.as_deref(),
            base.secondary_text_color,
        ),
        tertiary_text: ResolvedColor::resolve(
            config.tertiary_text.as_deref(),
            base.tertiary_text_color,
        ),
        label_text: ResolvedColor::resolve(config.label_text.as_deref(), base.text_color),
        line: ResolvedColor::resolve(config.line.as_deref(), base.line_color),
        accent: ResolvedColor::resolve(config.accent.as_deref(), base.primary_color),
        border: ResolvedColor::resolve(config.border.as_deref(), base.primary_border_color),

        node_shape: config.node_shape,
        node_size: config.node_size,
        line_style: config.line_style,
        line_thickness: config.line_thickness,
        corner_radius: config.corner_radius,
        font_size: config.font_size,
        font_family: config.font_family.clone(),
        font_weight: config.font_weight,
        node_spacing: config.node_spacing,
        level_spacing: config.level_spacing,
        padding: config.padding,

        shadow: config.shadow,
        gradient: config.gradient,
        animation: config.animation,
    }
}
