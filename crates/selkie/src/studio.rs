//! High-level convenience wrapper bundling the whole control flow the way a
//! UI integration consumes it: one source buffer, one style session, one
//! engine, one displayed document.

use selkie_core::detect::{DiagramType, detect_diagram_type};
use selkie_core::sanitize::{EffectiveStyle, resolve_style};
use selkie_core::style::{StyleConfiguration, StyleSession};
use selkie_core::template;
use selkie_core::theme::Direction;

use crate::export::{self, ExportArtifact, ExportError, ExportRequest};
use crate::render::{
    DiagramEngine, RenderError, RenderOrchestrator, RenderOutcome, RenderedDocument,
};

/// Output dimension presets offered by the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    /// 16:9, 1920x1080
    Widescreen,
    /// 4:3, 1600x1200
    Standard,
    /// 1:1, 1080x1080
    Square,
    /// 21:9, 2560x1080
    Ultrawide,
    /// 9:16, 1080x1920
    Portrait,
}

impl AspectRatio {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Widescreen => (1920, 1080),
            AspectRatio::Standard => (1600, 1200),
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Ultrawide => (2560, 1080),
            AspectRatio::Portrait => (1080, 1920),
        }
    }
}

pub struct Studio<E> {
    orchestrator: RenderOrchestrator<E>,
    session: StyleSession,
    theme: String,
    direction: Direction,
    source: String,
    diagram_type: DiagramType,
    /// Set once the user edits the source; switching diagram types stops
    /// loading templates after that.
    customized: bool,
    width: u32,
    height: u32,
}

impl<E: DiagramEngine> Studio<E> {
    pub fn new(engine: E) -> Self {
        Self {
            orchestrator: RenderOrchestrator::new(engine),
            session: StyleSession::new(StyleConfiguration::editor_defaults()),
            theme: "pastel".to_string(),
            direction: Direction::default(),
            source: template::default_source(DiagramType::Flowchart).to_string(),
            diagram_type: DiagramType::Flowchart,
            customized: false,
            width: 1920,
            height: 1080,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_source(&mut self, source: &str) {
        self.source = source.to_string();
        self.customized = true;
        self.diagram_type = detect_diagram_type(source);
    }

    /// Switches the active diagram type, loading its default template unless
    /// the user has already customized the source.
    pub fn set_diagram_type(&mut self, diagram_type: DiagramType) {
        self.diagram_type = diagram_type;
        if !self.customized {
            self.source = template::default_source(diagram_type).to_string();
        }
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        let (width, height) = ratio.dimensions();
        self.set_dimensions(width, height);
    }

    pub fn draft(&self) -> &StyleConfiguration {
        self.session.draft()
    }

    pub fn draft_mut(&mut self) -> &mut StyleConfiguration {
        self.session.draft_mut()
    }

    pub fn has_unapplied_changes(&self) -> bool {
        self.session.has_changes()
    }

    fn applied_style(&self) -> EffectiveStyle {
        resolve_style(self.session.applied(), &self.theme)
    }

    /// Promotes the draft, pushes the new configuration to the engine and
    /// re-renders with it.
    pub async fn apply_styles(&mut self) -> Result<RenderOutcome, RenderError> {
        self.session.apply();
        self.render().await
    }

    pub fn discard_styles(&mut self) {
        self.session.discard();
    }

    pub async fn render(&mut self) -> Result<RenderOutcome, RenderError> {
        let style = self.applied_style();
        self.orchestrator.configure(&style, self.direction)?;
        self.orchestrator
            .render(&self.source, &style, self.direction)
            .await
    }

    pub fn displayed(&self) -> Option<&RenderedDocument> {
        self.orchestrator.displayed()
    }

    /// Exports the displayed document, falling back to the studio's output
    /// dimensions when the document carries none of its own.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
        let document = self.displayed().ok_or(ExportError::NothingRendered)?;
        let request = ExportRequest {
            width: self.width,
            height: self.height,
            ..request.clone()
        };
        export::export(document, &self.applied_style(), &request)
    }
}
