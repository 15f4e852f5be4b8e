#![forbid(unsafe_code)]

//! SVG document model and post-render styling for selkie.
//!
//! The engine produces SVG text; this crate parses it into an owned,
//! order-preserving [`dom::SvgDocument`], runs the [`styler`] passes over it,
//! and serializes it back. The export pipeline reuses the same document model
//! for dimension forcing and background stripping.

pub mod dom;
pub mod styler;

pub use dom::{Element, Node, ParseError, SvgDocument};
pub use styler::{ShapeKind, apply_style};
