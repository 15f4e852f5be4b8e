use serde::{Deserialize, Serialize};

use crate::detect::DiagramType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Rectangle,
    Circle,
    Diamond,
    Hexagon,
}

impl NodeShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Rectangle => "rectangle",
            NodeShape::Circle => "circle",
            NodeShape::Diamond => "diamond",
            NodeShape::Hexagon => "hexagon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// SVG `stroke-dasharray` value for this line style.
    pub fn dash_array(&self) -> &'static str {
        match self {
            LineStyle::Solid => "0",
            LineStyle::Dashed => "8,4",
            LineStyle::Dotted => "2,2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Editing-surface clamp ranges. The core passes numeric fields through
/// unchanged; these bounds are enforced at the control surface (the CLI
/// clamps with them too).
pub mod clamp {
    pub const FONT_SIZE: (u32, u32) = (10, 24);
    pub const LINE_THICKNESS: (u32, u32) = (1, 8);
    pub const CORNER_RADIUS: (u32, u32) = (0, 20);
    pub const NODE_SIZE: (u32, u32) = (50, 200);
    pub const EXPORT_SCALE: (u32, u32) = (1, 8);
}

/// One record holding every independently adjustable visual parameter.
///
/// Every color field is an optional override on top of the active preset;
/// `None` means "use the preset value". Structural equality over the whole
/// record is what drives the session's dirty check, so there is no per-field
/// change tracking anywhere.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfiguration {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tertiary: Option<String>,
    pub background: Option<String>,
    /// Text inside primary nodes.
    pub text: Option<String>,
    pub secondary_text: Option<String>,
    pub tertiary_text: Option<String>,
    /// Text outside nodes (labels, edge text, titles).
    pub label_text: Option<String>,
    pub line: Option<String>,
    pub accent: Option<String>,
    pub border: Option<String>,

    pub node_shape: NodeShape,
    /// Node size as a percentage of the engine-produced size.
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

impl StyleConfiguration {
    /// The editor's historical starting values: every field overridden.
    pub fn editor_defaults() -> Self {
        Self {
            primary: Some("#00A896".to_string()),
            secondary: Some("#FF6B6B".to_string()),
            tertiary: Some("#FFA500".to_string()),
            background: Some("#F0F3F7".to_string()),
            text: Some("#FFFFFF".to_string()),
            secondary_text: Some("#FFFFFF".to_string()),
            tertiary_text: Some("#FFFFFF".to_string()),
            label_text: Some("#0D1B2A".to_string()),
            line: Some("#0D1B2A".to_string()),
            accent: Some("#FF6B6B".to_string()),
            border: Some("#0D1B2A".to_string()),
            node_shape: NodeShape::Rectangle,
            node_size: Some(100),
            line_style: Some(LineStyle::Solid),
            line_thickness: Some(2),
            corner_radius: Some(8),
            font_size: Some(14),
            font_family: Some("Inter".to_string()),
            font_weight: Some(FontWeight::Normal),
            node_spacing: Some(50),
            level_spacing: Some(100),
            padding: Some(20),
            shadow: false,
            gradient: false,
            animation: false,
        }
    }
}

/// Draft/applied pair of [`StyleConfiguration`] snapshots.
///
/// The draft is live-edited; the applied configuration is what the renderer
/// last saw. `apply` promotes the draft by value copy, so the applied side is
/// always a strict snapshot of some prior draft state.
#[derive(Debug, Clone, Default)]
pub struct StyleSession {
    draft: StyleConfiguration,
    applied: StyleConfiguration,
}

impl StyleSession {
    pub fn new(initial: StyleConfiguration) -> Self {
        Self {
            draft: initial.clone(),
            applied: initial,
        }
    }

    pub fn draft(&self) -> &StyleConfiguration {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut StyleConfiguration {
        &mut self.draft
    }

    pub fn applied(&self) -> &StyleConfiguration {
        &self.applied
    }

    pub fn has_changes(&self) -> bool {
        self.draft != self.applied
    }

    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
    }

    pub fn discard(&mut self) {
        self.draft = self.applied.clone();
    }
}

/// One-click color bundles the editing surface offers; each sets the draft's
/// primary, line and background overrides at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickTheme {
    pub name: &'static str,
    pub primary: &'static str,
    pub line: &'static str,
    pub background: &'static str,
}

pub const QUICK_THEMES: [QuickTheme; 4] = [
    QuickTheme {
        name: "Ocean",
        primary: "#0EA5E9",
        line: "#0284C7",
        background: "#F0F9FF",
    },
    QuickTheme {
        name: "Forest",
        primary: "#10B981",
        line: "#059669",
        background: "#F0FDF4",
    },
    QuickTheme {
        name: "Sunset",
        primary: "#F59E0B",
        line: "#D97706",
        background: "#FFFBEB",
    },
    QuickTheme {
        name: "Purple",
        primary: "#8B5CF6",
        line: "#7C3AED",
        background: "#FAF5FF",
    },
];

impl QuickTheme {
    pub fn apply_to(&self, draft: &mut StyleConfiguration) {
        draft.primary = Some(self.primary.to_string());
        draft.line = Some(self.line.to_string());
        draft.background = Some(self.background.to_string());
    }
}

/// Which controls the editing surface exposes for a given diagram type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    pub colors: Vec<&'static str>,
    pub shapes: Vec<NodeShape>,
    pub lines: Vec<LineStyle>,
}

const BASE_COLORS: [&str; 10] = [
    "primary",
    "text",
    "secondary",
    "secondary_text",
    "tertiary",
    "tertiary_text",
    "border",
    "label_text",
    "line",
    "background",
];

const ALL_LINES: [LineStyle; 3] = [LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted];

/// Per-type control surface: which color roles, node shapes and line styles
/// a diagram type exposes for editing.
pub fn diagram_options(diagram_type: DiagramType) -> DiagramOptions {
    let base = DiagramOptions {
        colors: BASE_COLORS.to_vec(),
        shapes: vec![NodeShape::Rectangle, NodeShape::Circle],
        lines: ALL_LINES.to_vec(),
    };

    match diagram_type {
        DiagramType::Flowchart => DiagramOptions {
            shapes: vec![
                NodeShape::Rectangle,
                NodeShape::Circle,
                NodeShape::Diamond,
                NodeShape::Hexagon,
            ],
            colors: {
                let mut colors = base.colors.clone();
                colors.push("accent");
                colors
            },
            ..base
        },
        DiagramType::Sequence => DiagramOptions {
            colors: vec![
                "primary",
                "text",
                "secondary",
                "secondary_text",
                "label_text",
                "line",
                "background",
                "accent",
            ],
            ..base
        },
        DiagramType::Gantt => DiagramOptions {
            shapes: vec![NodeShape::Rectangle],
            colors: vec![
                "primary",
                "secondary",
                "tertiary",
                "label_text",
                "background",
                "accent",
                "line",
            ],
            ..base
        },
        DiagramType::Class | DiagramType::Er => DiagramOptions {
            shapes: vec![NodeShape::Rectangle],
            colors: vec![
                "primary",
                "text",
                "secondary",
                "secondary_text",
                "border",
                "label_text",
                "line",
                "background",
            ],
            ..base
        },
        DiagramType::State => DiagramOptions {
            colors: vec![
                "primary",
                "text",
                "secondary",
                "secondary_text",
                "border",
                "label_text",
                "line",
                "background",
            ],
            ..base
        },
        DiagramType::Pie => DiagramOptions {
            shapes: vec![NodeShape::Circle],
            colors: vec![
                "primary",
                "secondary",
                "tertiary",
                "text",
                "label_text",
                "background",
                "accent",
            ],
            ..base
        },
        DiagramType::Journey => DiagramOptions {
            colors: {
                let mut colors = base.colors.clone();
                colors.push("accent");
                colors
            },
            ..base
        },
        _ => base,
    }
}
