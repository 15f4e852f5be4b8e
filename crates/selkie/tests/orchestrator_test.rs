use std::collections::VecDeque;

use futures::FutureExt;
use futures::executor::block_on;
use futures::future::BoxFuture;

use selkie::render::Result as RenderResult;
use selkie::{
    DiagramEngine, EngineConfig, EngineError, RenderError, RenderOrchestrator, RenderOutcome,
    StyleConfiguration, resolve_style,
};
use selkie_core::theme::Direction;

const NODE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><g class="node"><rect x="10" y="10" width="60" height="30"/><text>A</text></g><path d="M0,0 L10,10"/></svg>"#;

#[derive(Default)]
struct MockEngine {
    configs: Vec<EngineConfig>,
    reject_configures: usize,
    responses: VecDeque<Result<String, EngineError>>,
}

impl DiagramEngine for MockEngine {
    fn configure(&mut self, config: &EngineConfig) -> Result<(), EngineError> {
        self.configs.push(config.clone());
        if self.reject_configures > 0 {
            self.reject_configures -= 1;
            return Err(EngineError::Configuration("unsupported theme".to_string()));
        }
        Ok(())
    }

    fn render(
        &mut self,
        _session_id: &str,
        _source: &str,
    ) -> BoxFuture<'_, Result<String, EngineError>> {
        let next = self
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(NODE_SVG.to_string()));
        async move { next }.boxed()
    }
}

fn style_with(config: &StyleConfiguration) -> selkie::EffectiveStyle {
    resolve_style(config, "corporate")
}

#[test]
fn successful_render_becomes_the_displayed_document() {
    let mut orchestrator = RenderOrchestrator::new(MockEngine::default());
    let style = style_with(&StyleConfiguration::default());

    let outcome: RenderResult<RenderOutcome> =
        block_on(orchestrator.render("graph TD\n    A --> B", &style, Direction::Td));
    let RenderOutcome::Rendered(doc) = outcome.unwrap() else {
        panic!("expected a rendered document");
    };

    assert_eq!(doc.raw_svg, NODE_SVG);
    assert_ne!(doc.svg, doc.raw_svg);
    assert!(doc.session_id.starts_with("selkie-"));
    assert_eq!(orchestrator.displayed().unwrap().session_id, doc.session_id);
}

#[test]
fn stale_completion_never_replaces_a_newer_render() {
    let mut orchestrator = RenderOrchestrator::new(MockEngine::default());
    let style = style_with(&StyleConfiguration::default());

    let first = orchestrator.begin("graph TD\n    A --> B", Direction::Td);
    let second = orchestrator.begin("graph TD\n    A --> C", Direction::Td);

    let outcome = orchestrator
        .complete(&second, Ok(NODE_SVG.to_string()), &style)
        .unwrap();
    assert!(matches!(outcome, RenderOutcome::Rendered(_)));
    let displayed = orchestrator.displayed().unwrap().session_id.clone();

    // The older request finishes afterwards; its output must be dropped
    // even though the engine call succeeded.
    let outcome = orchestrator
        .complete(&first, Ok("<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_string()), &style)
        .unwrap();
    assert_eq!(outcome, RenderOutcome::Stale);
    assert_eq!(orchestrator.displayed().unwrap().session_id, displayed);
}

#[test]
fn stale_failures_are_also_discarded() {
    let mut orchestrator = RenderOrchestrator::new(MockEngine::default());
    let style = style_with(&StyleConfiguration::default());

    let first = orchestrator.begin("graph TD\n    A", Direction::Td);
    let second = orchestrator.begin("graph TD\n    B", Direction::Td);
    orchestrator
        .complete(&second, Ok(NODE_SVG.to_string()), &style)
        .unwrap();

    let outcome = orchestrator
        .complete(&first, Err(EngineError::Render("boom".to_string())), &style)
        .unwrap();
    assert_eq!(outcome, RenderOutcome::Stale);
    assert!(orchestrator.displayed().is_some());
}

#[test]
fn render_failure_clears_display_and_names_the_type() {
    let mut engine = MockEngine::default();
    engine.responses.push_back(Ok(NODE_SVG.to_string()));
    engine
        .responses
        .push_back(Err(EngineError::Render("parse error".to_string())));
    let mut orchestrator = RenderOrchestrator::new(engine);
    let style = style_with(&StyleConfiguration::default());

    block_on(orchestrator.render("sequenceDiagram\n    A->>B: hi", &style, Direction::Td)).unwrap();
    assert!(orchestrator.displayed().is_some());

    let err = block_on(orchestrator.render("sequenceDiagram\n    !!", &style, Direction::Td))
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid sequence syntax");
    assert!(orchestrator.displayed().is_none());
}

#[test]
fn rejected_configuration_falls_back_to_override_free_config() {
    let mut engine = MockEngine::default();
    engine.reject_configures = 1;
    let mut orchestrator = RenderOrchestrator::new(engine);

    let config = StyleConfiguration {
        primary: Some("#112233".to_string()),
        ..Default::default()
    };
    orchestrator
        .configure(&style_with(&config), Direction::Lr)
        .unwrap();

    let configs = &orchestrator.engine_mut().configs;
    assert_eq!(configs.len(), 2);
    // The first attempt carried the override fan-out; the fallback must not.
    assert_eq!(configs[0].get_str("themeVariables.cScale0"), Some("#112233"));
    assert_eq!(configs[1].get_str("themeVariables.cScale0"), None);
    assert_eq!(configs[1].get_str("theme"), Some("base"));
    assert_eq!(configs[1].get_u64("flowchart.nodeSpacing"), Some(120));
}

#[test]
fn second_configuration_rejection_is_surfaced() {
    let mut engine = MockEngine::default();
    engine.reject_configures = 2;
    let mut orchestrator = RenderOrchestrator::new(engine);

    let err = orchestrator
        .configure(&style_with(&StyleConfiguration::default()), Direction::Td)
        .unwrap_err();
    assert!(matches!(err, RenderError::Engine(_)));
}

#[test]
fn begin_rewrites_flowchart_direction() {
    let mut orchestrator = RenderOrchestrator::new(MockEngine::default());
    let request = orchestrator.begin("graph TD\n    A --> B", Direction::Rl);
    assert!(request.source.starts_with("graph RL\n"));
}

#[test]
fn restyle_starts_from_raw_engine_output() {
    let mut orchestrator = RenderOrchestrator::new(MockEngine::default());
    let plain = style_with(&StyleConfiguration::default());
    block_on(orchestrator.render("graph TD\n    A", &plain, Direction::Td)).unwrap();

    let recolored = style_with(&StyleConfiguration {
        primary: Some("#123456".to_string()),
        ..Default::default()
    });
    let doc = orchestrator.restyle(&recolored).unwrap();
    assert!(doc.svg.contains("#123456"));
    // The raw bytes stay pristine for the next restyle.
    assert_eq!(doc.raw_svg, NODE_SVG);
}
