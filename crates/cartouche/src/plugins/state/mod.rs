//! State diagram plugin
//!
//! Registers `stateDiagram` (dagre-wrapper) and the legacy `state`
//! implementation. Both copy the global arrow marker setting into their
//! database on init.

use crate::core::{Detector, Diagram, DiagramDefinition};

mod database;
mod detector;
mod parser;
mod renderer;

pub use database::*;
pub use detector::*;
pub use parser::*;
pub use renderer::*;

/// Build the definition for one state diagram implementation
pub fn definition(id: &'static str, variant: &'static str) -> DiagramDefinition<StateDatabase> {
    DiagramDefinition::new(
        id,
        STATE_FAMILY.name,
        StateParser::new(),
        StateDatabase::new(),
        StateRenderer::new(variant),
        StateStyles,
    )
    .with_init(|config, db: &mut StateDatabase| {
        db.settings_mut().arrow_marker_absolute = config.global_arrow_marker_absolute();
        Ok(())
    })
}

/// Every state diagram implementation, in registration order
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
