//! Engine trait and render orchestration.
//!
//! The orchestrator owns the generation counter that makes overlapping
//! renders safe: every begun request is stamped, and a completion whose
//! stamp is no longer the latest is discarded instead of displayed. The
//! engine itself stays abstract behind [`DiagramEngine`] so integrations can
//! plug in whatever actually draws the diagrams.

use std::sync::OnceLock;

use futures::future::BoxFuture;
use regex::Regex;
use tracing::{debug, warn};
use uuid::Uuid;

use selkie_core::detect::{DiagramType, detect_diagram_type};
use selkie_core::sanitize::EffectiveStyle;
use selkie_core::theme::{self, Direction, EngineConfig};
use selkie_style::{ParseError, SvgDocument, apply_style};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine rejected configuration: {0}")]
    Configuration(String),
    #[error("engine render failed: {0}")]
    Render(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The engine could not render the source; the message is what the
    /// editing surface displays verbatim.
    #[error("invalid {diagram_type} syntax")]
    Syntax { diagram_type: DiagramType },
    /// Even the fallback configuration was rejected.
    #[error(transparent)]
    Engine(EngineError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("nothing has been rendered yet")]
    NothingRendered,
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// The rendering engine seam.
///
/// `configure` and `render` are separate calls because configuration is
/// applied once per style change while renders happen per keystroke.
pub trait DiagramEngine {
    fn configure(&mut self, config: &EngineConfig) -> std::result::Result<(), EngineError>;

    fn render(
        &mut self,
        session_id: &str,
        source: &str,
    ) -> BoxFuture<'_, std::result::Result<String, EngineError>>;
}

/// A successful engine render, styled and ready for display or export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Styled, serialized SVG.
    pub svg: String,
    /// Unstyled engine output. Re-styling always starts from a fresh parse
    /// of these bytes, never from `svg`.
    pub raw_svg: String,
    pub diagram_type: DiagramType,
    pub session_id: String,
}

/// A begun render: generation-stamped, direction-rewritten source.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub session_id: String,
    pub source: String,
    pub diagram_type: DiagramType,
    generation: u64,
}

/// What became of a completed render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(RenderedDocument),
    /// A newer request was begun before this one completed; its output was
    /// discarded and the displayed document is unchanged.
    Stale,
}

fn direction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^graph\s+(TD|LR|RL|BT)").unwrap())
}

/// Rewrites the first `graph <dir>` line of a flowchart source to the given
/// direction; all other sources pass through unchanged.
pub fn rewrite_direction(source: &str, diagram_type: DiagramType, direction: Direction) -> String {
    if diagram_type != DiagramType::Flowchart {
        return source.to_string();
    }
    direction_re()
        .replace(source, format!("graph {}", direction.as_str()))
        .into_owned()
}

pub struct RenderOrchestrator<E> {
    engine: E,
    generation: u64,
    displayed: Option<RenderedDocument>,
}

impl<E: DiagramEngine> RenderOrchestrator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            generation: 0,
            displayed: None,
        }
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn displayed(&self) -> Option<&RenderedDocument> {
        self.displayed.as_ref()
    }

    /// Pushes the style-derived configuration to the engine. A rejected
    /// configuration falls back to the override-free document; only a second
    /// rejection is surfaced.
    pub fn configure(&mut self, style: &EffectiveStyle, direction: Direction) -> Result<()> {
        let config = theme::build_engine_config(style, direction);
        if let Err(err) = self.engine.configure(&config) {
            warn!(error = %err, theme = %style.theme, "engine rejected configuration, retrying with fallback");
            let fallback = theme::fallback_engine_config(&style.theme, direction);
            self.engine.configure(&fallback).map_err(RenderError::Engine)?;
        }
        Ok(())
    }

    /// Stamps a new request as the latest generation. Any previously begun
    /// request that has not yet completed becomes stale.
    pub fn begin(&mut self, source: &str, direction: Direction) -> RenderRequest {
        self.generation += 1;
        let diagram_type = detect_diagram_type(source);
        RenderRequest {
            session_id: format!("selkie-{}", Uuid::new_v4().simple()),
            source: rewrite_direction(source, diagram_type, direction),
            diagram_type,
            generation: self.generation,
        }
    }

    /// Settles a completed engine call against the displayed document.
    ///
    /// Stale completions are discarded regardless of success. A current
    /// failure clears the display and surfaces the syntax error; a current
    /// success is styled and becomes the displayed document.
    pub fn complete(
        &mut self,
        request: &RenderRequest,
        engine_result: std::result::Result<String, EngineError>,
        style: &EffectiveStyle,
    ) -> Result<RenderOutcome> {
        if request.generation != self.generation {
            debug!(
                session_id = %request.session_id,
                generation = request.generation,
                latest = self.generation,
                "discarding stale render completion"
            );
            return Ok(RenderOutcome::Stale);
        }

        let raw_svg = match engine_result {
            Ok(svg) => svg,
            Err(_) => {
                self.displayed = None;
                return Err(RenderError::Syntax {
                    diagram_type: request.diagram_type,
                });
            }
        };

        let svg = style_document(&raw_svg, style, request.diagram_type)?;
        let document = RenderedDocument {
            svg,
            raw_svg,
            diagram_type: request.diagram_type,
            session_id: request.session_id.clone(),
        };
        self.displayed = Some(document.clone());
        Ok(RenderOutcome::Rendered(document))
    }

    /// Begin + engine render + complete in one call.
    pub async fn render(
        &mut self,
        source: &str,
        style: &EffectiveStyle,
        direction: Direction,
    ) -> Result<RenderOutcome> {
        let request = self.begin(source, direction);
        let result = self
            .engine
            .render(&request.session_id, &request.source)
            .await;
        self.complete(&request, result, style)
    }

    /// Re-styles the displayed document from its raw engine bytes without
    /// another engine round-trip.
    pub fn restyle(&mut self, style: &EffectiveStyle) -> Result<&RenderedDocument> {
        let displayed = self.displayed.as_mut().ok_or(RenderError::NothingRendered)?;
        displayed.svg = style_document(&displayed.raw_svg, style, displayed.diagram_type)?;
        Ok(displayed)
    }
}

fn style_document(
    raw_svg: &str,
    style: &EffectiveStyle,
    diagram_type: DiagramType,
) -> std::result::Result<String, ParseError> {
    let mut doc = SvgDocument::parse(raw_svg)?;
    apply_style(&mut doc, style, diagram_type);
    Ok(doc.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_rewrite_touches_only_the_header() {
        let source = "graph TD\n    A --> B\n    %% graph LR in a comment stays\n";
        let out = rewrite_direction(source, DiagramType::Flowchart, Direction::Lr);
        assert!(out.starts_with("graph LR\n"));
        assert!(out.contains("%% graph LR in a comment stays"));
    }

    #[test]
    fn direction_rewrite_skips_other_types() {
        let source = "sequenceDiagram\n    A->>B: hi";
        assert_eq!(
            rewrite_direction(source, DiagramType::Sequence, Direction::Lr),
            source
        );
    }

    #[test]
    fn direction_rewrite_leaves_headerless_flowcharts_alone() {
        let source = "flowchart LR\n    A --> B";
        // Only the `graph` keyword form is rewritten.
        assert_eq!(
            rewrite_direction(source, DiagramType::Flowchart, Direction::Td),
            source
        );
    }
}
