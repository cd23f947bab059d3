//! Diagram definitions
//!
//! A [`DiagramDefinition`] bundles everything one diagram implementation needs
//! to turn text into output: parser, database, renderer, style generator and
//! an optional init hook. It is registered once and reused for every render;
//! [`Diagram::init`] resets the database before each one.
//!
//! The host pipeline only sees the object-safe [`Diagram`] trait, which lets
//! the registry hold definitions with different database types side by side.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, trace, Level};

use super::{
    Config, Database, DiagramError, Parser, Renderer, StyleGenerator, ThemeVariables,
};

/// Hook run once per render, after the reset, with the merged configuration
///
/// The hook only reads the configuration; it writes per-run settings into the
/// database.
pub type InitHook<D> = Box<dyn Fn(&Config, &mut D) -> Result<()> + Send + Sync>;

/// Result of one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    /// Identifier of the diagram implementation that produced the output
    pub diagram_type: &'static str,
    /// Rendered diagram
    pub body: String,
    /// Stylesheet for the diagram
    pub styles: String,
}

/// Counters describing a diagram's current database contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagramStats {
    pub nodes: usize,
    pub edges: usize,
    /// Number of resets the database has gone through
    pub generation: u64,
}

/// Object-safe view of a diagram implementation used by the host pipeline
pub trait Diagram: Send {
    /// Unique identifier, e.g. `flowchart-elk`
    fn id(&self) -> &'static str;

    /// Family the implementation belongs to, e.g. `flowchart`
    fn family(&self) -> &'static str;

    /// Reset the database and run the init hook
    fn init(&mut self, config: &Config) -> Result<()>;

    /// Parse text into the database
    fn parse(&mut self, text: &str) -> Result<()>;

    /// Render the database
    fn render(&self) -> Result<String>;

    /// Stylesheet for the given theme
    fn styles(&self, theme: &ThemeVariables) -> String;

    /// Current database counters
    fn stats(&self) -> DiagramStats;

    /// Run the full pipeline: init, parse, render, styles
    fn run(&mut self, text: &str, config: &Config) -> Result<RenderOutput> {
        self.init(config)?;
        self.parse(text)?;
        let body = self.render()?;
        Ok(RenderOutput {
            diagram_type: self.id(),
            body,
            styles: self.styles(&config.theme()),
        })
    }
}

/// One diagram implementation and its collaborators
pub struct DiagramDefinition<D: Database> {
    id: &'static str,
    family: &'static str,
    parser: Box<dyn Parser<D>>,
    db: D,
    renderer: Box<dyn Renderer<D>>,
    styles: Box<dyn StyleGenerator>,
    init: Option<InitHook<D>>,
}

impl<D: Database> DiagramDefinition<D> {
    pub fn new(
        id: &'static str,
        family: &'static str,
        parser: impl Parser<D> + 'static,
        db: D,
        renderer: impl Renderer<D> + 'static,
        styles: impl StyleGenerator + 'static,
    ) -> Self {
        Self {
            id,
            family,
            parser: Box::new(parser),
            db,
            renderer: Box::new(renderer),
            styles: Box::new(styles),
            init: None,
        }
    }

    /// Attach an init hook
    pub fn with_init<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Config, &mut D) -> Result<()> + Send + Sync + 'static,
    {
        self.init = Some(Box::new(hook));
        self
    }

    /// The definition's database
    pub fn database(&self) -> &D {
        &self.db
    }

    /// The definition's database, mutably
    pub fn database_mut(&mut self) -> &mut D {
        &mut self.db
    }

    fn ensure_usable(&self) -> Result<(), DiagramError> {
        if self.db.is_poisoned() {
            return Err(DiagramError::reset_failed(
                self.id,
                "state store was left unusable by a failed reset",
            ));
        }
        Ok(())
    }
}

impl<D: Database> Diagram for DiagramDefinition<D> {
    fn id(&self) -> &'static str {
        self.id
    }

    fn family(&self) -> &'static str {
        self.family
    }

    fn init(&mut self, config: &Config) -> Result<()> {
        let init_span = span!(Level::DEBUG, "diagram_init", diagram = self.id);
        let _enter = init_span.enter();

        self.db.clear()?;
        if let Some(hook) = &self.init {
            hook(config, &mut self.db)?;
            trace!("Init hook applied");
        }
        debug!(generation = self.db.generation(), "Diagram initialised");
        Ok(())
    }

    fn parse(&mut self, text: &str) -> Result<()> {
        self.ensure_usable()?;
        self.parser.parse(text, &mut self.db)?;
        debug!(
            diagram = self.id,
            parser = self.parser.name(),
            node_count = self.db.node_count(),
            edge_count = self.db.edge_count(),
            "Parsing completed"
        );
        Ok(())
    }

    fn render(&self) -> Result<String> {
        self.ensure_usable()?;
        let output = self.renderer.render(&self.db)?;
        debug!(
            diagram = self.id,
            renderer = self.renderer.name(),
            output_len = output.len(),
            "Rendering completed"
        );
        Ok(output)
    }

    fn styles(&self, theme: &ThemeVariables) -> String {
        self.styles.styles(theme)
    }

    fn stats(&self) -> DiagramStats {
        DiagramStats {
            nodes: self.db.node_count(),
            edges: self.db.edge_count(),
            generation: self.db.generation(),
        }
    }
}
