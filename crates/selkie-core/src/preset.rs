/// Curve style the engine uses for flowchart edges, chosen per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveStyle {
    Linear,
    Basis,
}

impl CurveStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveStyle::Linear => "linear",
            CurveStyle::Basis => "basis",
        }
    }
}

/// Base token set for one named theme.
///
/// These are the raw values handed to the engine's `themeVariables` surface;
/// the table is read-only for the lifetime of the program and every field is
/// guaranteed present for every theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub name: &'static str,
    pub primary_color: &'static str,
    pub primary_text_color: &'static str,
    pub primary_border_color: &'static str,
    pub line_color: &'static str,
    pub secondary_color: &'static str,
    pub secondary_text_color: &'static str,
    pub secondary_border_color: &'static str,
    pub tertiary_color: &'static str,
    pub tertiary_text_color: &'static str,
    pub tertiary_border_color: &'static str,
    pub background: &'static str,
    pub main_bkg: &'static str,
    pub second_bkg: &'static str,
    pub tertiary_bkg: &'static str,
    pub text_color: &'static str,
    pub border1: &'static str,
    pub border2: &'static str,
    pub font_size: &'static str,
    pub font_family: &'static str,
    pub node_border: &'static str,
    pub cluster_bkg: &'static str,
    pub cluster_border: &'static str,
    pub default_link_color: &'static str,
    pub title_color: &'static str,
    pub edge_label_background: &'static str,
    pub node_text_color: &'static str,
}

const FONT_FAMILY: &str = "ui-sans-serif, system-ui, sans-serif";

// Soft, muted colors - ideal for presentations.
pub const PASTEL: StylePreset = StylePreset {
    name: "pastel",
    primary_color: "#d4c5b9",
    primary_text_color: "#2c2c2c",
    primary_border_color: "#b8a89a",
    line_color: "#8b7d6b",
    secondary_color: "#b8c5b8",
    secondary_text_color: "#2c2c2c",
    secondary_border_color: "#9aab9a",
    tertiary_color: "#c5b5b8",
    tertiary_text_color: "#2c2c2c",
    tertiary_border_color: "#ab9a9d",
    background: "#f5f1ed",
    main_bkg: "#d4c5b9",
    second_bkg: "#b8c5b8",
    tertiary_bkg: "#c5b5b8",
    text_color: "#2c2c2c",
    border1: "#b8a89a",
    border2: "#9aab9a",
    font_size: "16px",
    font_family: FONT_FAMILY,
    node_border: "#b8a89a",
    cluster_bkg: "#e8e4e0",
    cluster_border: "#c5bdb5",
    default_link_color: "#8b7d6b",
    title_color: "#2c2c2c",
    edge_label_background: "#f5f1ed",
    node_text_color: "#2c2c2c",
};

// Bright, saturated colors - eye-catching and modern.
pub const VIBRANT: StylePreset = StylePreset {
    name: "vibrant",
    primary_color: "#3b82f6",
    primary_text_color: "#ffffff",
    primary_border_color: "#2563eb",
    line_color: "#60a5fa",
    secondary_color: "#8b5cf6",
    secondary_text_color: "#ffffff",
    secondary_border_color: "#7c3aed",
    tertiary_color: "#10b981",
    tertiary_text_color: "#ffffff",
    tertiary_border_color: "#059669",
    background: "#0f172a",
    main_bkg: "#3b82f6",
    second_bkg: "#8b5cf6",
    tertiary_bkg: "#10b981",
    text_color: "#ffffff",
    border1: "#2563eb",
    border2: "#7c3aed",
    font_size: "18px",
    font_family: FONT_FAMILY,
    node_border: "#2563eb",
    cluster_bkg: "#1e293b",
    cluster_border: "#475569",
    default_link_color: "#60a5fa",
    title_color: "#f1f5f9",
    edge_label_background: "#1e293b",
    node_text_color: "#ffffff",
};

// Clean, simple design with sharp edges - suits technical documentation.
pub const MINIMAL: StylePreset = StylePreset {
    name: "minimal",
    primary_color: "#f8f9fa",
    primary_text_color: "#212529",
    primary_border_color: "#dee2e6",
    line_color: "#6c757d",
    secondary_color: "#e9ecef",
    secondary_text_color: "#212529",
    secondary_border_color: "#ced4da",
    tertiary_color: "#f8f9fa",
    tertiary_text_color: "#212529",
    tertiary_border_color: "#dee2e6",
    background: "#ffffff",
    main_bkg: "#f8f9fa",
    second_bkg: "#e9ecef",
    tertiary_bkg: "#f8f9fa",
    text_color: "#212529",
    border1: "#dee2e6",
    border2: "#ced4da",
    font_size: "16px",
    font_family: FONT_FAMILY,
    node_border: "#dee2e6",
    cluster_bkg: "#f8f9fa",
    cluster_border: "#e9ecef",
    default_link_color: "#6c757d",
    title_color: "#212529",
    edge_label_background: "#ffffff",
    node_text_color: "#212529",
};

// Cool blue tones - calming and professional.
pub const OCEAN: StylePreset = StylePreset {
    name: "ocean",
    primary_color: "#0ea5e9",
    primary_text_color: "#ffffff",
    primary_border_color: "#0284c7",
    line_color: "#38bdf8",
    secondary_color: "#06b6d4",
    secondary_text_color: "#ffffff",
    secondary_border_color: "#0891b2",
    tertiary_color: "#14b8a6",
    tertiary_text_color: "#ffffff",
    tertiary_border_color: "#0d9488",
    background: "#0c4a6e",
    main_bkg: "#0ea5e9",
    second_bkg: "#06b6d4",
    tertiary_bkg: "#14b8a6",
    text_color: "#ffffff",
    border1: "#0284c7",
    border2: "#0891b2",
    font_size: "17px",
    font_family: FONT_FAMILY,
    node_border: "#0284c7",
    cluster_bkg: "#075985",
    cluster_border: "#0369a1",
    default_link_color: "#38bdf8",
    title_color: "#f0f9ff",
    edge_label_background: "#0c4a6e",
    node_text_color: "#ffffff",
};

// Professional blue and purple tones - business presentations.
pub const CORPORATE: StylePreset = StylePreset {
    name: "corporate",
    primary_color: "#2563eb",
    primary_text_color: "#ffffff",
    primary_border_color: "#1d4ed8",
    line_color: "#93c5fd",
    secondary_color: "#818cf8",
    secondary_text_color: "#ffffff",
    secondary_border_color: "#4f46e5",
    tertiary_color: "#0ea5e9",
    tertiary_text_color: "#ffffff",
    tertiary_border_color: "#0284c7",
    background: "#f1f5f9",
    main_bkg: "#2563eb",
    second_bkg: "#818cf8",
    tertiary_bkg: "#0ea5e9",
    text_color: "#1e293b",
    border1: "#1d4ed8",
    border2: "#4f46e5",
    font_size: "16px",
    font_family: FONT_FAMILY,
    node_border: "#1d4ed8",
    cluster_bkg: "#e2e8f0",
    cluster_border: "#cbd5e1",
    default_link_color: "#93c5fd",
    title_color: "#0f172a",
    edge_label_background: "#f1f5f9",
    node_text_color: "#ffffff",
};

// Warm orange and yellow tones - energetic.
pub const SUNSET: StylePreset = StylePreset {
    name: "sunset",
    primary_color: "#f97316",
    primary_text_color: "#ffffff",
    primary_border_color: "#ea580c",
    line_color: "#fdba74",
    secondary_color: "#eab308",
    secondary_text_color: "#ffffff",
    secondary_border_color: "#ca8a04",
    tertiary_color: "#84cc16",
    tertiary_text_color: "#ffffff",
    tertiary_border_color: "#65a30d",
    background: "#fff7ed",
    main_bkg: "#f97316",
    second_bkg: "#eab308",
    tertiary_bkg: "#84cc16",
    text_color: "#431407",
    border1: "#ea580c",
    border2: "#ca8a04",
    font_size: "16px",
    font_family: FONT_FAMILY,
    node_border: "#ea580c",
    cluster_bkg: "#ffedd5",
    cluster_border: "#fed7aa",
    default_link_color: "#fdba74",
    title_color: "#431407",
    edge_label_background: "#fff7ed",
    node_text_color: "#ffffff",
};

// Green tones - natural, eco-friendly feel.
pub const FOREST: StylePreset = StylePreset {
    name: "forest",
    primary_color: "#16a34a",
    primary_text_color: "#ffffff",
    primary_border_color: "#15803d",
    line_color: "#86efac",
    secondary_color: "#22c55e",
    secondary_text_color: "#ffffff",
    secondary_border_color: "#16a34a",
    tertiary_color: "#a3a3a3",
    tertiary_text_color: "#ffffff",
    tertiary_border_color: "#737373",
    background: "#f0fdf4",
    main_bkg: "#16a34a",
    second_bkg: "#22c55e",
    tertiary_bkg: "#a3a3a3",
    text_color: "#14532d",
    border1: "#15803d",
    border2: "#16a34a",
    font_size: "16px",
    font_family: FONT_FAMILY,
    node_border: "#15803d",
    cluster_bkg: "#dcfce7",
    cluster_border: "#bbf7d0",
    default_link_color: "#86efac",
    title_color: "#14532d",
    edge_label_background: "#f0fdf4",
    node_text_color: "#ffffff",
};

// Dark theme with contrasting colors for low-light environments.
// Note: defaultLinkColor (#38bdf8) intentionally differs from lineColor.
pub const DARK: StylePreset = StylePreset {
    name: "dark",
    primary_color: "#7dd3fc",
    primary_text_color: "#082f49",
    primary_border_color: "#0ea5e9",
    line_color: "#0ea5e9",
    secondary_color: "#c084fc",
    secondary_text_color: "#3b0764",
    secondary_border_color: "#a855f7",
    tertiary_color: "#f87171",
    tertiary_text_color: "#7f1d1d",
    tertiary_border_color: "#ef4444",
    background: "#0f172a",
    main_bkg: "#7dd3fc",
    second_bkg: "#c084fc",
    tertiary_bkg: "#f87171",
    text_color: "#e2e8f0",
    border1: "#0ea5e9",
    border2: "#a855f7",
    font_size: "16px",
    font_family: FONT_FAMILY,
    node_border: "#0ea5e9",
    cluster_bkg: "#1e293b",
    cluster_border: "#334155",
    default_link_color: "#38bdf8",
    title_color: "#f1f5f9",
    edge_label_background: "#0f172a",
    node_text_color: "#082f49",
};

const PRESETS: [&StylePreset; 8] = [
    &PASTEL, &VIBRANT, &MINIMAL, &OCEAN, &CORPORATE, &SUNSET, &FOREST, &DARK,
];

/// Looks up a preset by theme name. Unknown names fall back to `pastel`,
/// so a lookup never fails.
pub fn preset(name: &str) -> &'static StylePreset {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .copied()
        .unwrap_or(&PASTEL)
}

pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}

/// Flowchart edge curve per theme: pastel and minimal draw straight
/// segments, everything else uses smooth basis curves.
pub fn curve_style(theme: &str) -> CurveStyle {
    match theme {
        "pastel" | "minimal" => CurveStyle::Linear,
        _ => CurveStyle::Basis,
    }
}
