//! Class diagram renderer and styles

use anyhow::Result;

use super::database::ClassDatabase;
use crate::core::{Outline, Renderer, StyleGenerator, ThemeVariables};

/// Renders classes and relationships as a text outline
#[derive(Debug, Clone, Copy)]
pub struct ClassRenderer {
    variant: &'static str,
}

impl ClassRenderer {
    pub fn new(variant: &'static str) -> Self {
        Self { variant }
    }
}

impl Renderer<ClassDatabase> for ClassRenderer {
    fn render(&self, database: &ClassDatabase) -> Result<String> {
        let mut header = format!("classDiagram ({})", self.variant);
        if database.arrow_marker_absolute() {
            header.push_str(" markers=absolute");
        }

        let mut outline = Outline::new(header);
        for class in database.classes() {
            let members = if class.members.is_empty() {
                String::new()
            } else {
                let listed: Vec<String> = class.members.iter().map(ToString::to_string).collect();
                format!("{{ {} }}", listed.join(", "))
            };
            outline.row(&class.name, members);
        }
        for relationship in database.relationships() {
            outline.row(
                format!("{} {} {}", relationship.from, relationship.kind, relationship.to),
                relationship.label.as_deref().unwrap_or_default(),
            );
        }
        Ok(outline.finish())
    }

    fn name(&self) -> &'static str {
        self.variant
    }
}

/// Stylesheet for class diagrams
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassStyles;

impl StyleGenerator for ClassStyles {
    fn styles(&self, theme: &ThemeVariables) -> String {
        format!(
            "g.classGroup text {{ fill: {text}; font-family: {font}; }}\n\
             g.classGroup rect {{ fill: {fill}; stroke: {line}; }}\n\
             .relation {{ stroke: {line}; stroke-width: 1; fill: none; }}",
            text = theme.text_color(),
            font = theme.font_family(),
            fill = theme.primary_color(),
            line = theme.line_color(),
        )
    }
}
