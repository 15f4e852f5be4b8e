#![forbid(unsafe_code)]

//! `selkie` is a headless diagram styling and export pipeline.
//!
//! The rendering engine itself stays abstract: implement [`DiagramEngine`]
//! for whatever actually draws diagrams, and this crate supplies everything
//! around it: style resolution, engine configuration, stale-safe render
//! orchestration, post-render SVG styling and multi-format export.
//!
//! # Features
//!
//! - `raster`: enable PNG and PDF export via pure-Rust SVG rasterization

pub use selkie_core::*;
pub use selkie_style::{ParseError, SvgDocument, apply_style};

pub mod export;
pub mod render;
mod studio;

pub use export::{ExportArtifact, ExportError, ExportFormat, ExportRequest};
pub use render::{
    DiagramEngine, EngineError, RenderError, RenderOrchestrator, RenderOutcome, RenderRequest,
    RenderedDocument,
};
pub use studio::{AspectRatio, Studio};
