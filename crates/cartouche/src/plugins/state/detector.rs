//! State diagram detectors
//!
//! `stateDiagram-v2` always selects the dagre-wrapper implementation; the bare
//! `stateDiagram` tag follows `state.defaultRenderer`.

use crate::core::{Config, DiagramFamily, VariantDetector, RENDERER_DAGRE_D3, RENDERER_DAGRE_WRAPPER};

/// Id of the dagre-wrapper state diagram implementation
pub const STATE_DIAGRAM: &str = "stateDiagram";
/// Id of the legacy dagre-d3 state diagram implementation
pub const STATE: &str = "state";

/// The state family: `stateDiagram` is its only generic tag
pub static STATE_FAMILY: DiagramFamily = DiagramFamily {
    name: "state",
    generic_tags: &["stateDiagram"],
    baseline: RENDERER_DAGRE_WRAPPER,
    variants: &[RENDERER_DAGRE_D3, RENDERER_DAGRE_WRAPPER],
    preference: Config::state_renderer,
};

/// Detector for `stateDiagram`, the family baseline, which also owns `stateDiagram-v2`
pub fn v2_detector() -> VariantDetector {
    VariantDetector::new(
        &STATE_FAMILY,
        STATE_DIAGRAM,
        RENDERER_DAGRE_WRAPPER,
        &["stateDiagram-v2"],
    )
}

/// Detector for the legacy `state` implementation
pub fn legacy_detector() -> VariantDetector {
    VariantDetector::new(&STATE_FAMILY, STATE, RENDERER_DAGRE_D3, &[])
}
