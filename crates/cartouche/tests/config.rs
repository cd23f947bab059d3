//! Configuration loading and merging

use cartouche::core::{Config, DiagramError, FamilyConfig, ThemeVariables};
use proptest::prelude::*;

#[test]
fn json_uses_camel_case_keys() {
    let config = Config::from_json(
        r##"{
            "arrowMarkerAbsolute": true,
            "flowchart": {"defaultRenderer": "elk", "arrowMarkerAbsolute": false},
            "state": {"defaultRenderer": "dagre-d3"},
            "themeVariables": {"lineColor": "#ff0000"}
        }"##,
    )
    .unwrap();

    assert_eq!(config.arrow_marker_absolute, Some(true));
    assert_eq!(config.flowchart_renderer(), Some("elk"));
    assert_eq!(config.state_renderer(), Some("dagre-d3"));
    assert_eq!(config.class_renderer(), None);
    assert_eq!(config.theme().line_color(), "#ff0000");
    assert_eq!(config.flowchart.as_ref().unwrap().arrow_marker_absolute, Some(false));
    assert!(config.global_arrow_marker_absolute());
}

#[test]
fn json_ignores_unknown_keys() {
    let config = Config::from_json(
        r#"{"sequence": {"mirrorActors": true}, "flowchart": {"curve": "basis"}}"#,
    )
    .unwrap();
    assert_eq!(config.flowchart, Some(FamilyConfig::default()));
    assert_eq!(config.flowchart_renderer(), None);
}

#[test]
fn unknown_renderer_is_not_an_error() {
    let config = Config::from_json(r#"{"class": {"defaultRenderer": "svg-magic"}}"#).unwrap();
    assert_eq!(config.class_renderer(), Some("svg-magic"));
    assert_eq!(cartouche::detect("classDiagram", &config).unwrap(), "classDiagram");
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = Config::from_json(r#"{"flowchart": {"defaultRenderer": 3}}"#).unwrap_err();
    assert!(matches!(err, DiagramError::ConfigError { .. }));
}

#[test]
fn overrides_win_and_absences_keep_base() {
    let base = Config::mermaid_defaults();
    let overrides = Config {
        flowchart: Some(FamilyConfig::with_renderer("elk")),
        ..Config::default()
    };

    let merged = base.merge(&overrides);
    assert_eq!(merged.flowchart_renderer(), Some("elk"));
    assert_eq!(merged.state_renderer(), Some("dagre-wrapper"));
    assert_eq!(merged.arrow_marker_absolute, Some(false));
    assert_eq!(merged.theme_variables, base.theme_variables);
}

fn family_strategy() -> impl Strategy<Value = Option<FamilyConfig>> {
    prop::option::of(
        (
            prop::option::of(prop::sample::select(vec!["dagre-d3", "dagre-wrapper", "elk"])),
            prop::option::of(any::<bool>()),
        )
            .prop_map(|(renderer, arrow_marker_absolute)| FamilyConfig {
                default_renderer: renderer.map(str::to_string),
                arrow_marker_absolute,
            }),
    )
}

fn theme_strategy() -> impl Strategy<Value = Option<ThemeVariables>> {
    let color = || prop::option::of(prop::sample::select(vec!["#000", "#fff", "red"]).prop_map(str::to_string));
    prop::option::of((color(), color()).prop_map(|(primary_color, line_color)| ThemeVariables {
        primary_color,
        line_color,
        ..ThemeVariables::default()
    }))
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(any::<bool>()),
        family_strategy(),
        family_strategy(),
        family_strategy(),
        theme_strategy(),
    )
        .prop_map(|(arrow_marker_absolute, flowchart, state, class, theme_variables)| Config {
            arrow_marker_absolute,
            flowchart,
            state,
            class,
            theme_variables,
        })
}

proptest! {
    #[test]
    fn merge_is_associative(a in config_strategy(), b in config_strategy(), c in config_strategy()) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn merge_with_empty_is_identity(a in config_strategy()) {
        prop_assert_eq!(a.merge(&Config::default()), a.clone());
        prop_assert_eq!(Config::default().merge(&a), a);
    }
}
