//! Cartouche - configuration-aware diagram type resolution
//!
//! Picks the implementation for a piece of Mermaid-style diagram text from an
//! ordered registry, honouring the configured renderer preference of each
//! diagram family, and runs it with a state store that is reset before every
//! render.
//!
//! # Quick Start
//!
//! ```rust
//! use cartouche::{detect, render, Config};
//!
//! let id = detect("flowchart-elk TD", &Config::default()).unwrap();
//! assert_eq!(id, "flowchart-elk");
//!
//! let output = render("graph LR; A-->B", &Config::default()).unwrap();
//! assert_eq!(output.diagram_type, "flowchart-v2");
//! assert!(output.body.starts_with("flowchart LR (dagre-wrapper)"));
//! ```
//!
//! # Advanced Usage
//!
//! A long-lived [`plugins::Orchestrator`] keeps one state store per
//! registered diagram and reuses it across renders:
//!
//! ```rust
//! use cartouche::prelude::*;
//!
//! let elk = Config::from_json(r#"{"flowchart": {"defaultRenderer": "elk"}}"#).unwrap();
//! let mut orchestrator = Orchestrator::with_all_plugins().with_config(&elk);
//!
//! let first = orchestrator.process("graph TD; A-->B").unwrap();
//! let second = orchestrator.process("graph TD; A-->B").unwrap();
//! assert_eq!(first.diagram_type, "flowchart-elk");
//! assert_eq!(first, second);
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Config, Database, Detector, Diagram, DiagramDefinition, DiagramError, DiagramFamily,
        Direction, EdgeData, EdgeType, FamilyConfig, NodeData, NodeShape, Parser, Registry,
        RenderOutput, Renderer, ResettableState, StyleGenerator, ThemeVariables, VariantDetector,
    };
    pub use crate::plugins::Orchestrator;
}

/// Id of the diagram implementation that claims `text`
///
/// `config` is merged onto the mermaid defaults before detection.
///
/// # Example
/// ```rust
/// use cartouche::{detect, Config, FamilyConfig};
///
/// let elk = Config {
///     flowchart: Some(FamilyConfig::with_renderer("elk")),
///     ..Config::default()
/// };
/// assert_eq!(detect("graph TD", &elk).unwrap(), "flowchart-elk");
/// assert_eq!(detect("classDiagram", &elk).unwrap(), "classDiagram");
/// assert!(detect("pie title Pets", &elk).is_err());
/// ```
pub fn detect(text: &str, config: &Config) -> Result<&'static str, DiagramError> {
    let merged = Config::mermaid_defaults().merge(config);
    Registry::with_default_diagrams().detect(text, Some(&merged))
}

/// Detect, initialise, parse and render `text` in one call
///
/// Every call builds fresh state stores; hosts rendering many diagrams should
/// keep a [`plugins::Orchestrator`] instead.
///
/// # Example
/// ```rust
/// use cartouche::{render, Config};
///
/// let output = render("stateDiagram-v2\n  [*] --> Idle", &Config::default()).unwrap();
/// assert_eq!(output.diagram_type, "stateDiagram");
/// assert!(output.body.contains("Idle"));
/// ```
pub fn render(text: &str, config: &Config) -> anyhow::Result<RenderOutput> {
    use crate::plugins::Orchestrator;

    let mut orchestrator = Orchestrator::with_all_plugins().with_config(config);
    orchestrator.process(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_uses_defaults() {
        assert_eq!(detect("graph TD", &Config::default()).unwrap(), "flowchart-v2");
        assert_eq!(detect("stateDiagram", &Config::default()).unwrap(), "stateDiagram");
        assert_eq!(detect("classDiagram", &Config::default()).unwrap(), "classDiagram");
    }

    #[test]
    fn test_detect_honours_family_preference() {
        let legacy = Config {
            class: Some(FamilyConfig::with_renderer(RENDERER_DAGRE_D3)),
            ..Config::default()
        };
        assert_eq!(detect("classDiagram", &legacy).unwrap(), "class");
        assert_eq!(detect("classDiagram-v2", &legacy).unwrap(), "classDiagram");
    }

    #[test]
    fn test_detect_unknown() {
        let err = detect("sequenceDiagram", &Config::default()).unwrap_err();
        assert!(matches!(err, DiagramError::UnknownDiagramType { .. }));
    }

    #[test]
    fn test_render_flowchart() {
        let output = render("graph TD\n    A --> B", &Config::default()).unwrap();
        assert_eq!(output.diagram_type, "flowchart-v2");
        assert!(output.body.contains("A --> B"));
        assert!(!output.styles.is_empty());
    }

    #[test]
    fn test_render_class() {
        let output = render("classDiagram\n  Animal <|-- Duck", &Config::default()).unwrap();
        assert_eq!(output.diagram_type, "classDiagram");
        assert!(output.body.contains("Animal <|-- Duck"));
    }

    #[test]
    fn test_render_reports_parse_errors() {
        let err = render("graph TD\n  A -->", &Config::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::ParseError { line: 2, .. })
        ));
    }
}
