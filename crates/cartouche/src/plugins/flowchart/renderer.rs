//! Flowchart renderer and styles
//!
//! The renderer writes a text outline: a header naming the direction and the
//! renderer variant, one row per node, then one row per edge.

use anyhow::Result;

use super::FlowchartDatabase;
use crate::core::{Database, Outline, Renderer, StyleGenerator, ThemeVariables};

/// Flowchart renderer for one renderer variant
#[derive(Debug, Clone, Copy)]
pub struct FlowchartRenderer {
    variant: &'static str,
}

impl FlowchartRenderer {
    pub fn new(variant: &'static str) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> &'static str {
        self.variant
    }
}

impl Renderer<FlowchartDatabase> for FlowchartRenderer {
    fn render(&self, database: &FlowchartDatabase) -> Result<String> {
        let records = database.state().records();

        let mut header = format!("flowchart {} ({})", records.direction, self.variant);
        if records.arrow_marker_absolute {
            header.push_str(" markers=absolute");
        }

        let mut outline = Outline::new(header);
        for node in &records.nodes {
            outline.row(&node.id, node.shape.decorate(&node.label));
        }
        for edge in &records.edges {
            outline.row(
                format!("{} {} {}", edge.from, edge.edge_type, edge.to),
                edge.label.clone().unwrap_or_default(),
            );
        }
        Ok(outline.finish())
    }

    fn name(&self) -> &'static str {
        self.variant
    }
}

/// Stylesheet shared by every flowchart variant
#[derive(Debug, Default, Clone, Copy)]
pub struct FlowchartStyles;

impl StyleGenerator for FlowchartStyles {
    fn styles(&self, theme: &ThemeVariables) -> String {
        format!(
            ".label {{ font-family: {font}; color: {text}; }}\n\
             .node rect, .node circle, .node polygon {{ fill: {fill}; stroke: {line}; }}\n\
             .flowchart-link {{ stroke: {line}; fill: none; }}\n\
             .edgeLabel {{ color: {text}; }}",
            font = theme.font_family(),
            text = theme.text_color(),
            fill = theme.primary_color(),
            line = theme.line_color(),
        )
    }
}
