//! State diagram renderer and styles

use anyhow::Result;

use super::database::StateDatabase;
use crate::core::{Database, Outline, Renderer, StyleGenerator, ThemeVariables};

/// Renders states and transitions as a text outline
#[derive(Debug, Clone, Copy)]
pub struct StateRenderer {
    variant: &'static str,
}

impl StateRenderer {
    pub fn new(variant: &'static str) -> Self {
        Self { variant }
    }
}

impl Renderer<StateDatabase> for StateRenderer {
    fn render(&self, database: &StateDatabase) -> Result<String> {
        let records = database.state().records();

        let mut header = format!("stateDiagram {} ({})", records.direction, self.variant);
        if records.settings.arrow_marker_absolute {
            header.push_str(" markers=absolute");
        }

        let mut outline = Outline::new(header);
        for state in &records.states {
            outline.row(&state.id, state.shape.decorate(&state.label));
        }
        for transition in &records.transitions {
            outline.row(
                format!("{} --> {}", transition.from, transition.to),
                transition.label.as_deref().unwrap_or_default(),
            );
        }
        Ok(outline.finish())
    }

    fn name(&self) -> &'static str {
        self.variant
    }
}

/// Stylesheet for state diagrams
#[derive(Debug, Default, Clone, Copy)]
pub struct StateStyles;

impl StyleGenerator for StateStyles {
    fn styles(&self, theme: &ThemeVariables) -> String {
        format!(
            "g.stateGroup text {{ fill: {text}; font-family: {font}; }}\n\
             g.stateGroup rect {{ fill: {fill}; stroke: {line}; }}\n\
             .transition {{ stroke: {line}; stroke-width: 1; }}\n\
             .start-state, .end-state {{ fill: {line}; }}",
            text = theme.text_color(),
            font = theme.font_family(),
            fill = theme.primary_color(),
            line = theme.line_color(),
        )
    }
}
