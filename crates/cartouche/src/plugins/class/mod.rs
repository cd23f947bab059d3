//! Class diagram plugin
//!
//! Registers `classDiagram` (dagre-wrapper) and the legacy `class`
//! implementation.

use crate::core::{Detector, Diagram, DiagramDefinition};

mod chumsky_parser;
mod database;
mod detector;
mod parser;
mod renderer;

pub use database::*;
pub use detector::*;
pub use parser::*;
pub use renderer::*;

/// Build the definition for one class diagram implementation
pub fn definition(id: &'static str, variant: &'static str) -> DiagramDefinition<ClassDatabase> {
    DiagramDefinition::new(
        id,
        CLASS_FAMILY.name,
        ClassParser::new(),
        ClassDatabase::new(),
        ClassRenderer::new(variant),
        ClassStyles,
    )
    .with_init(|config, db: &mut ClassDatabase| {
        db.set_arrow_marker_absolute(config.global_arrow_marker_absolute());
        Ok(())
    })
}

/// Every class diagram implementation, in registration order
pub fn diagrams() -> Vec<(Box<dyn Detector>, Box<dyn Diagram>)> {
    [v2_detector(), legacy_detector()]
        .into_iter()
        .map(|detector| {
            let diagram = definition(detector.diagram_type(), detector.variant());
            (
                Box::new(detector) as Box<dyn Detector>,
                Box::new(diagram) as Box<dyn Diagram>,
            )
        })
        .collect()
}
