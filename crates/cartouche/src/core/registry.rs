//! Diagram registry and resolver
//!
//! The registry keeps `(detector, definition)` pairs in registration order.
//! Resolution asks each detector in turn and selects the first definition
//! whose detector claims the candidate. Registration order is therefore the
//! precedence rule when two detectors overlap.

use tracing::{debug, info, span, trace, warn, Level};

use super::{Config, Detector, Diagram, DiagramError};

struct Registration {
    detector: Box<dyn Detector>,
    definition: Box<dyn Diagram>,
}

/// Ordered collection of diagram implementations
///
/// # Example
/// ```
/// use cartouche::core::{Config, FamilyConfig, Registry};
///
/// let registry = Registry::with_default_diagrams();
/// let elk = Config {
///     flowchart: Some(FamilyConfig::with_renderer("elk")),
///     ..Config::default()
/// };
///
/// assert_eq!(registry.detect("graph TD; A-->B", Some(&elk)).unwrap(), "flowchart-elk");
/// assert_eq!(registry.detect("graph TD; A-->B", None).unwrap(), "flowchart-v2");
/// assert!(registry.detect("pie title Pets", None).is_err());
/// ```
#[derive(Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in diagram, in default order
    pub fn with_default_diagrams() -> Self {
        let entries = crate::plugins::default_diagrams()
            .into_iter()
            .map(|(detector, definition)| Registration {
                detector,
                definition,
            })
            .collect();
        Self { entries }
    }

    /// Register a diagram implementation after all existing ones
    ///
    /// Fails if a definition with the same id is already registered.
    pub fn register(
        &mut self,
        detector: impl Detector + 'static,
        definition: impl Diagram + 'static,
    ) -> Result<(), DiagramError> {
        self.register_boxed(Box::new(detector), Box::new(definition))
    }

    /// Register already boxed collaborators
    pub fn register_boxed(
        &mut self,
        detector: Box<dyn Detector>,
        definition: Box<dyn Diagram>,
    ) -> Result<(), DiagramError> {
        let id = definition.id();
        if self.entries.iter().any(|entry| entry.definition.id() == id) {
            warn!(diagram = id, "Rejected duplicate diagram registration");
            return Err(DiagramError::DuplicateDiagram { id: id.to_string() });
        }
        if detector.diagram_type() != id {
            warn!(
                diagram = id,
                detector = detector.diagram_type(),
                "Detector and definition identifiers differ"
            );
        }

        debug!(diagram = id, position = self.entries.len(), "Registered diagram");
        self.entries.push(Registration {
            detector,
            definition,
        });
        Ok(())
    }

    /// Registered diagram ids in precedence order
    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.definition.id()).collect()
    }

    /// Registered detectors in precedence order
    pub fn detectors(&self) -> impl Iterator<Item = &dyn Detector> {
        self.entries.iter().map(|entry| entry.detector.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a definition by id
    pub fn get(&self, id: &str) -> Option<&dyn Diagram> {
        self.entries
            .iter()
            .find(|entry| entry.definition.id() == id)
            .map(|entry| entry.definition.as_ref())
    }

    /// Look up a definition by id, mutably
    pub fn get_mut(&mut self, id: &str) -> Option<&mut dyn Diagram> {
        self.entries
            .iter_mut()
            .find(|entry| entry.definition.id() == id)
            .map(|entry| entry.definition.as_mut() as &mut dyn Diagram)
    }

    /// Id of the diagram that claims the candidate
    pub fn detect(
        &self,
        candidate: &str,
        config: Option<&Config>,
    ) -> Result<&'static str, DiagramError> {
        let index = self.position(candidate, config)?;
        Ok(self.entries[index].definition.id())
    }

    /// Definition that claims the candidate
    pub fn resolve(
        &self,
        candidate: &str,
        config: Option<&Config>,
    ) -> Result<&dyn Diagram, DiagramError> {
        let index = self.position(candidate, config)?;
        Ok(self.entries[index].definition.as_ref())
    }

    /// Definition that claims the candidate, mutably
    pub fn resolve_mut(
        &mut self,
        candidate: &str,
        config: Option<&Config>,
    ) -> Result<&mut dyn Diagram, DiagramError> {
        let index = self.position(candidate, config)?;
        Ok(self.entries[index].definition.as_mut() as &mut dyn Diagram)
    }

    /// Index of the first registration whose detector matches
    fn position(&self, candidate: &str, config: Option<&Config>) -> Result<usize, DiagramError> {
        let resolve_span = span!(
            Level::DEBUG,
            "resolve_diagram",
            input_len = candidate.len(),
            registered = self.entries.len()
        );
        let _enter = resolve_span.enter();

        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.detector.detect(candidate, config))
        else {
            warn!("No registered detector matched");
            return Err(DiagramError::unknown_diagram_type(candidate));
        };

        let winner = self.entries[index].definition.id();
        info!(diagram = winner, "Resolved diagram type");

        if tracing::enabled!(Level::DEBUG) {
            for shadowed in self.entries[index + 1..]
                .iter()
                .filter(|entry| entry.detector.detect(candidate, config))
            {
                debug!(
                    diagram = winner,
                    shadowed = shadowed.definition.id(),
                    "Later registration also matched; earlier registration wins"
                );
            }
        } else {
            trace!(position = index, "Skipped overlap scan");
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Database, DiagramDefinition, DiagramStats, Parser, Renderer, ResettableState,
        StyleGenerator, ThemeVariables,
    };
    use anyhow::Result;

    /// Detector claiming any candidate starting with a fixed prefix
    struct PrefixDetector {
        id: &'static str,
        prefix: &'static str,
    }

    impl Detector for PrefixDetector {
        fn detect(&self, candidate: &str, _config: Option<&Config>) -> bool {
            candidate.starts_with(self.prefix)
        }

        fn diagram_type(&self) -> &'static str {
            self.id
        }

        fn patterns(&self) -> Vec<&'static str> {
            vec![self.prefix]
        }
    }

    /// Minimal diagram that echoes its id
    struct Echo(&'static str);

    impl Diagram for Echo {
        fn id(&self) -> &'static str {
            self.0
        }

        fn family(&self) -> &'static str {
            "echo"
        }

        fn init(&mut self, _config: &Config) -> Result<()> {
            Ok(())
        }

        fn parse(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }

        fn render(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn styles(&self, _theme: &ThemeVariables) -> String {
            String::new()
        }

        fn stats(&self) -> DiagramStats {
            DiagramStats {
                nodes: 0,
                edges: 0,
                generation: 0,
            }
        }
    }

    fn register(registry: &mut Registry, id: &'static str, prefix: &'static str) {
        registry
            .register(PrefixDetector { id, prefix }, Echo(id))
            .unwrap();
    }

    #[test]
    fn test_empty_registry_is_unresolved() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        let err = registry.detect("graph TD", None).unwrap_err();
        assert!(matches!(err, DiagramError::UnknownDiagramType { .. }));
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = Registry::new();
        register(&mut registry, "specific", "flow-x");
        register(&mut registry, "general", "flow");

        assert_eq!(registry.detect("flow-x", None).unwrap(), "specific");
        assert_eq!(registry.detect("flow", None).unwrap(), "general");
        assert_eq!(registry.ids(), vec!["specific", "general"]);
    }

    #[test]
    fn test_registration_order_is_precedence() {
        let mut registry = Registry::new();
        register(&mut registry, "general", "flow");
        register(&mut registry, "specific", "flow-x");

        // The broader detector was registered first, so it shadows the other.
        assert_eq!(registry.detect("flow-x", None).unwrap(), "general");
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        register(&mut registry, "one", "a");
        let err = registry
            .register(PrefixDetector { id: "one", prefix: "b" }, Echo("one"))
            .unwrap_err();
        assert!(matches!(err, DiagramError::DuplicateDiagram { ref id } if id == "one"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_mut_runs_selected_definition() {
        let mut registry = Registry::new();
        register(&mut registry, "alpha", "a");
        register(&mut registry, "beta", "b");

        let diagram = registry.resolve_mut("beta things", None).unwrap();
        let output = diagram.run("beta things", &Config::default()).unwrap();
        assert_eq!(output.body, "beta");
        assert_eq!(registry.resolve("alpha", None).unwrap().id(), "alpha");
    }

    #[test]
    fn test_get_by_id() {
        let mut registry = Registry::new();
        register(&mut registry, "alpha", "a");
        assert_eq!(registry.get("alpha").map(|d| d.id()), Some("alpha"));
        assert!(registry.get("missing").is_none());
        assert!(registry.get_mut("alpha").is_some());
    }

    #[test]
    fn test_detectors_iterate_in_order() {
        let mut registry = Registry::new();
        register(&mut registry, "alpha", "a");
        register(&mut registry, "beta", "b");
        let types: Vec<_> = registry.detectors().map(|d| d.diagram_type()).collect();
        assert_eq!(types, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_registers_generic_definitions() {
        struct Empty {
            state: ResettableState<Vec<String>>,
        }

        impl Database for Empty {
            type Records = Vec<String>;

            fn state(&self) -> &ResettableState<Vec<String>> {
                &self.state
            }

            fn state_mut(&mut self) -> &mut ResettableState<Vec<String>> {
                &mut self.state
            }

            fn node_count(&self) -> usize {
                self.state.records().len()
            }

            fn edge_count(&self) -> usize {
                0
            }
        }

        struct Lines;

        impl Parser<Empty> for Lines {
            fn parse(&self, input: &str, database: &mut Empty) -> Result<()> {
                let lines = input.lines().skip(1).map(str::to_string);
                database.state_mut().records_mut().extend(lines);
                Ok(())
            }

            fn name(&self) -> &'static str {
                "lines"
            }
        }

        struct Count;

        impl Renderer<Empty> for Count {
            fn render(&self, database: &Empty) -> Result<String> {
                Ok(database.node_count().to_string())
            }

            fn name(&self) -> &'static str {
                "count"
            }
        }

        struct Plain;

        impl StyleGenerator for Plain {
            fn styles(&self, theme: &ThemeVariables) -> String {
                theme.line_color().to_string()
            }
        }

        let mut registry = Registry::new();
        let definition = DiagramDefinition::new(
            "lines",
            "lines",
            Lines,
            Empty {
                state: ResettableState::default(),
            },
            Count,
            Plain,
        );
        registry
            .register(PrefixDetector { id: "lines", prefix: "lines" }, definition)
            .unwrap();

        let diagram = registry.resolve_mut("lines\na\nb", None).unwrap();
        let first = diagram.run("lines\na\nb", &Config::default()).unwrap();
        let second = diagram.run("lines\nc", &Config::default()).unwrap();
        assert_eq!(first.body, "2");
        assert_eq!(second.body, "1");
        assert_eq!(second.styles, "#333333");
    }
}
