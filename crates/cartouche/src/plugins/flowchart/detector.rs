//! Flowchart detectors
//!
//! Three variants share the `flowchart` and `graph` tags. Each one also owns a
//! composite tag that selects it regardless of configuration, except the
//! legacy variant which is only reachable through `flowchart.defaultRenderer`.

use crate::core::{
    Config, DiagramFamily, VariantDetector, RENDERER_DAGRE_D3, RENDERER_DAGRE_WRAPPER,
    RENDERER_ELK,
};

/// Id of the ELK flowchart implementation
pub const FLOWCHART_ELK: &str = "flowchart-elk";
/// Id of the dagre-wrapper flowchart implementation
pub const FLOWCHART_V2: &str = "flowchart-v2";
/// Id of the legacy dagre-d3 flowchart implementation
pub const FLOWCHART: &str = "flowchart";

/// The flowchart family: generic tags, variants and where the preference lives
pub static FLOWCHART_FAMILY: DiagramFamily = DiagramFamily {
    name: "flowchart",
    generic_tags: &["flowchart", "graph"],
    baseline: RENDERER_DAGRE_WRAPPER,
    variants: &[RENDERER_DAGRE_D3, RENDERER_DAGRE_WRAPPER, RENDERER_ELK],
    preference: Config::flowchart_renderer,
};

/// Detector for `flowchart-elk`
///
/// Claims the `flowchart-elk` tag outright, and the generic tags when
/// `flowchart.defaultRenderer` is `elk`.
pub fn elk_detector() -> VariantDetector {
    VariantDetector::new(&FLOWCHART_FAMILY, FLOWCHART_ELK, RENDERER_ELK, &["flowchart-elk"])
}

/// Detector for `flowchart-v2`, the family baseline
pub fn v2_detector() -> VariantDetector {
    VariantDetector::new(
        &FLOWCHART_FAMILY,
        FLOWCHART_V2,
        RENDERER_DAGRE_WRAPPER,
        &["flowchart-v2"],
    )
}

/// Detector for the legacy `flowchart` implementation
pub fn legacy_detector() -> VariantDetector {
    VariantDetector::new(&FLOWCHART_FAMILY, FLOWCHART, RENDERER_DAGRE_D3, &[])
}
