//! Flowchart diagram plugin
//!
//! Registers three implementations: `flowchart-elk`, `flowchart-v2` and the
//! legacy `flowchart`. They share the parser, database and styles and differ
//! in the renderer variant they report.

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

/// Build the definition for one flowchart implementation
pub fn definition(id: &'static str, variant: &'static str) -> DiagramDefinition<FlowchartDatabase> {
    DiagramDefinition::new(
        id,
        FLOWCHART_FAMILY.name,
        FlowchartParser::new(),
        FlowchartDatabase::new(),
        FlowchartRenderer::new(variant),
        FlowchartStyles,
    )
    .with_init(|config, db: &mut FlowchartDatabase| {
        db.set_arrow_marker_absolute(config.global_arrow_marker_absolute());
        Ok(())
    })
}

/// Every flowchart implementation, most specific first
pub fn diagrams() -> Vec<(Box<dyn Detector>, Box<dyn Diagram>)> {
    [elk_detector(), v2_detector(), legacy_detector()]
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

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::core::{Config, Database, FamilyConfig};

    #[test]
    fn test_full_pipeline() {
        let mut diagram = definition(FLOWCHART_V2, "dagre-wrapper");
        let output = diagram
            .run("graph TD\n    A --> B\n    B --> C", &Config::default())
            .unwrap();

        assert_eq!(output.diagram_type, FLOWCHART_V2);
        assert!(output.body.starts_with("flowchart TD (dagre-wrapper)"));
        assert_eq!(diagram.stats().nodes, 3);
        assert_eq!(diagram.stats().edges, 2);
    }

    #[test]
    fn test_second_run_starts_clean() {
        let mut diagram = definition(FLOWCHART_ELK, "elk");
        let config = Config::default();

        let first = diagram.run("flowchart-elk LR\n  A --> B", &config).unwrap();
        diagram.run("flowchart-elk TD\n  X --- Y --- Z", &config).unwrap();
        let again = diagram.run("flowchart-elk LR\n  A --> B", &config).unwrap();

        assert_eq!(first, again);
        assert!(diagram.database().get_node("X").is_none());
    }

    #[test]
    fn test_init_copies_global_arrow_marker_setting() {
        let mut diagram = definition(FLOWCHART, "dagre-d3");
        let global = Config {
            arrow_marker_absolute: Some(true),
            flowchart: Some(FamilyConfig {
                default_renderer: None,
                arrow_marker_absolute: Some(false),
            }),
            ..Config::default()
        };
        let family_only = Config {
            arrow_marker_absolute: Some(false),
            flowchart: Some(FamilyConfig {
                default_renderer: None,
                arrow_marker_absolute: Some(true),
            }),
            ..Config::default()
        };

        diagram.run("graph", &global).unwrap();
        assert!(diagram.database().arrow_marker_absolute());

        diagram.run("graph", &family_only).unwrap();
        assert!(!diagram.database().arrow_marker_absolute());
        assert_eq!(diagram.database().generation(), 2);
    }

    #[test]
    fn test_diagrams_in_precedence_order() {
        let ids: Vec<_> = diagrams().iter().map(|(_, d)| d.id()).collect();
        assert_eq!(ids, vec![FLOWCHART_ELK, FLOWCHART_V2, FLOWCHART]);
    }
}
