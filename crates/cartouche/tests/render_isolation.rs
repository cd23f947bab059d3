//! Renders never observe data left behind by earlier renders

use cartouche::core::{Config, DiagramError, FamilyConfig, Registry};
use cartouche::plugins::Orchestrator;

/// One well-formed input per registered implementation
const SAMPLES: &[(&str, &str)] = &[
    ("flowchart-elk", "flowchart-elk TD\n  A[Start] --> B{Ok?}\n  B -->|yes| C((Done))"),
    ("flowchart-v2", "flowchart-v2 LR\n  A --> B\n  B -.-> C"),
    ("flowchart", "graph TD; A --> B; B ==> C"),
    ("stateDiagram", "stateDiagram-v2\n  [*] --> Idle\n  Idle --> Busy : start\n  Busy --> [*]"),
    ("state", "stateDiagram\n  direction LR\n  [*] --> Off\n  Off --> On"),
    ("classDiagram", "classDiagram-v2\n  class Duck {\n    +swim()\n  }\n  Animal <|-- Duck"),
    ("class", "classDiagram\n  Pond o-- Duck : contains\n  Duck : +int age"),
];

fn legacy_everywhere() -> Config {
    Config {
        flowchart: Some(FamilyConfig::with_renderer("dagre-d3")),
        state: Some(FamilyConfig::with_renderer("dagre-d3")),
        class: Some(FamilyConfig::with_renderer("dagre-d3")),
        ..Config::default()
    }
}

#[test]
fn samples_cover_every_registration() {
    let mut ids: Vec<_> = SAMPLES.iter().map(|(id, _)| *id).collect();
    let mut registered = Registry::with_default_diagrams().ids();
    ids.sort_unstable();
    registered.sort_unstable();
    assert_eq!(ids, registered);
}

#[test]
fn second_render_equals_first() {
    let mut orchestrator = Orchestrator::with_all_plugins().with_config(&legacy_everywhere());

    for (id, input) in SAMPLES {
        let first = orchestrator.process(input).unwrap();
        let second = orchestrator.process(input).unwrap();
        assert_eq!(first.diagram_type, *id, "{input}");
        assert_eq!(first, second, "{id} leaked state between renders");
    }
}

#[test]
fn interleaved_renders_stay_isolated() {
    let mut orchestrator = Orchestrator::with_all_plugins().with_config(&legacy_everywhere());
    let firsts: Vec<_> = SAMPLES
        .iter()
        .map(|(_, input)| orchestrator.process(input).unwrap())
        .collect();

    // run everything again in reverse, with a failed parse in between each
    for ((id, input), first) in SAMPLES.iter().zip(&firsts).rev() {
        let _ = orchestrator.process_as(id, "not a header", &Config::default());
        let again = orchestrator.process(input).unwrap();
        assert_eq!(&again, first, "{id} changed after other renders");
    }
}

#[test]
fn failed_parse_does_not_leak_into_next_render() {
    let mut orchestrator = Orchestrator::with_all_plugins();

    let err = orchestrator
        .process("classDiagram\n  class Duck {\n    +swim()")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DiagramError>(),
        Some(DiagramError::ParseError { line: 2, .. })
    ));

    let output = orchestrator.process("classDiagram\n  Goose : +honk()").unwrap();
    assert!(!output.body.contains("Duck"));
    assert!(output.body.contains("Goose"));
}

#[test]
fn arrow_marker_follows_each_render_config() {
    let mut orchestrator = Orchestrator::with_all_plugins();
    let absolute = Config {
        arrow_marker_absolute: Some(true),
        ..Config::default()
    };
    let global_overrides_family = Config {
        arrow_marker_absolute: Some(true),
        state: Some(FamilyConfig {
            arrow_marker_absolute: Some(false),
            ..FamilyConfig::default()
        }),
        ..Config::default()
    };

    let input = "stateDiagram-v2\n  [*] --> A";
    let marked = orchestrator.process_with(input, &absolute).unwrap();
    let unmarked = orchestrator.process(input).unwrap();
    let global_wins = orchestrator.process_with(input, &global_overrides_family).unwrap();

    assert!(marked.body.lines().next().unwrap().ends_with("markers=absolute"));
    assert!(!unmarked.body.contains("markers=absolute"));
    assert!(global_wins.body.lines().next().unwrap().ends_with("markers=absolute"));
}

#[test]
fn family_arrow_marker_alone_does_not_mark_absolute() {
    // site defaults set the global value to false, which is copied over the family slot
    let site = Config {
        state: Some(FamilyConfig {
            arrow_marker_absolute: Some(true),
            ..FamilyConfig::default()
        }),
        ..Config::default()
    };
    let mut orchestrator = Orchestrator::with_all_plugins().with_config(&site);

    let output = orchestrator.process("stateDiagram-v2\n  [*] --> A").unwrap();
    assert_eq!(orchestrator.config().arrow_marker_absolute, Some(false));
    assert!(!output.body.contains("markers=absolute"));
}
