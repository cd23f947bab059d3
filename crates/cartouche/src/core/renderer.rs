//! Core renderer and style generator traits
//!
//! Renderers read a populated database and produce the diagram output; style
//! generators produce the stylesheet that accompanies it.

use anyhow::Result;

use super::{Database, ThemeVariables};

/// Core trait for diagram renderers
///
/// # Example
/// ```
/// use cartouche::core::{Parser, Renderer};
/// use cartouche::plugins::flowchart::{FlowchartDatabase, FlowchartParser, FlowchartRenderer};
///
/// let mut db = FlowchartDatabase::new();
/// FlowchartParser::new().parse("graph LR\n  A --> B", &mut db).unwrap();
/// let output = FlowchartRenderer::new("dagre-wrapper").render(&db).unwrap();
/// assert!(output.contains("A --> B"));
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<String>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str {
        "text"
    }
}

/// Core trait for stylesheet generators
pub trait StyleGenerator: Send + Sync {
    /// Produce the stylesheet for the given theme
    fn styles(&self, theme: &ThemeVariables) -> String;
}
