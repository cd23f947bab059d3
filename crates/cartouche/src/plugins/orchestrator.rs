//! Plugin orchestrator for coordinating the diagram processing pipeline
//!
//! The orchestrator owns a [`Registry`] and the site configuration and runs
//! each render through the same stages:
//! resolve → init (reset + hook) → parse → render → styles.

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{Config, Detector, Diagram, DiagramError, Registry, RenderOutput};

/// Plugin orchestrator that coordinates the entire pipeline
///
/// One orchestrator serves many renders; every registered diagram keeps its
/// own state store and starts each render from its defaults. Build one
/// orchestrator per thread.
pub struct Orchestrator {
    registry: Registry,
    config: Config,
}

impl Orchestrator {
    /// Create an orchestrator with no diagrams and the mermaid defaults
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            config: Config::mermaid_defaults(),
        }
    }

    /// Create an orchestrator with every built-in diagram registered
    pub fn with_all_plugins() -> Self {
        Self {
            registry: Registry::with_default_diagrams(),
            config: Config::mermaid_defaults(),
        }
    }

    /// Merge a site configuration onto the current one
    pub fn with_config(mut self, config: &Config) -> Self {
        self.config = self.config.merge(config);
        self
    }

    /// The site configuration every render starts from
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register the built-in diagrams after any already registered
    pub fn register_default_diagrams(&mut self) -> Result<(), DiagramError> {
        for (detector, definition) in crate::plugins::default_diagrams() {
            self.registry.register_boxed(detector, definition)?;
        }
        Ok(())
    }

    /// Register a custom diagram implementation
    pub fn register(
        &mut self,
        detector: impl Detector + 'static,
        definition: impl Diagram + 'static,
    ) -> Result<(), DiagramError> {
        self.registry.register(detector, definition)
    }

    /// Detect the diagram type of `input` under the site configuration
    /// merged with `overrides`
    pub fn detect_diagram_type(
        &self,
        input: &str,
        overrides: &Config,
    ) -> Result<&'static str, DiagramError> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        let config = self.config.merge(overrides);
        self.registry.detect(input, Some(&config))
    }

    /// Process input with the site configuration
    pub fn process(&mut self, input: &str) -> Result<RenderOutput> {
        self.process_with(input, &Config::default())
    }

    /// Process input with per-render configuration overrides
    pub fn process_with(&mut self, input: &str, overrides: &Config) -> Result<RenderOutput> {
        let process_span = span!(Level::INFO, "process_diagram", input_len = input.len());
        let _enter = process_span.enter();

        let config = self.config.merge(overrides);

        let detect_span = span!(Level::DEBUG, "pipeline_detect");
        let detect_enter = detect_span.enter();
        let diagram = self.registry.resolve_mut(input, Some(&config))?;
        drop(detect_enter);

        run_stages(diagram, input, &config)
    }

    /// Process input with a known diagram id, skipping detection
    pub fn process_as(&mut self, id: &str, input: &str, overrides: &Config) -> Result<RenderOutput> {
        let process_span = span!(Level::INFO, "process_diagram", diagram = id, input_len = input.len());
        let _enter = process_span.enter();

        let config = self.config.merge(overrides);
        let diagram = self
            .registry
            .get_mut(id)
            .ok_or_else(|| DiagramError::unknown_diagram_type(id))?;

        run_stages(diagram, input, &config)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn run_stages(diagram: &mut dyn Diagram, input: &str, config: &Config) -> Result<RenderOutput> {
    info!(diagram = diagram.id(), family = diagram.family(), "Starting diagram pipeline");

    {
        let init_span = span!(Level::DEBUG, "pipeline_init");
        let _enter = init_span.enter();
        diagram.init(config)?;
    }

    {
        let parse_span = span!(Level::DEBUG, "pipeline_parse");
        let _enter = parse_span.enter();
        diagram.parse(input)?;
    }

    let body = {
        let render_span = span!(Level::DEBUG, "pipeline_render");
        let _enter = render_span.enter();
        diagram.render()?
    };

    let styles = diagram.styles(&config.theme());
    let stats = diagram.stats();
    debug!(
        nodes = stats.nodes,
        edges = stats.edges,
        generation = stats.generation,
        output_len = body.len(),
        "Pipeline completed"
    );

    Ok(RenderOutput {
        diagram_type: diagram.id(),
        body,
        styles,
    })
}
