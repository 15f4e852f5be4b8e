#![forbid(unsafe_code)]

//! `selkie-core` is the headless heart of the selkie diagram styling pipeline.
//!
//! It knows nothing about SVG documents or rendering engines; it owns the pure,
//! total pieces of the pipeline:
//!
//! - [`detect`]: classify diagram source text into a [`DiagramType`]
//! - [`preset`]: the read-only style preset table consumed by the engine theme
//! - [`style`]: the user-facing [`StyleConfiguration`] value type and its
//!   draft/applied [`StyleSession`]
//! - [`sanitize`]: validate color overrides and resolve them into an
//!   [`EffectiveStyle`]
//! - [`theme`]: build the engine configuration document ([`EngineConfig`])
//! - [`template`]: default diagram sources per type
//! - [`assistant`]: deterministic template-substitution helper

pub mod assistant;
pub mod detect;
pub mod preset;
pub mod sanitize;
pub mod style;
pub mod template;
pub mod theme;

pub use detect::{DiagramType, detect_diagram_type};
pub use preset::{CurveStyle, StylePreset, preset, preset_names};
pub use sanitize::{ColorSource, EffectiveStyle, ResolvedColor, is_valid_hex_color, resolve_style, sanitize_color};
pub use style::{FontWeight, LineStyle, NodeShape, QuickTheme, StyleConfiguration, StyleSession};
pub use theme::{Direction, EngineConfig};
