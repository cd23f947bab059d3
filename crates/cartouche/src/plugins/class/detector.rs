//! Class diagram detectors

use crate::core::{Config, DiagramFamily, VariantDetector, RENDERER_DAGRE_D3, RENDERER_DAGRE_WRAPPER};

/// Id of the dagre-wrapper class diagram implementation
pub const CLASS_DIAGRAM: &str = "classDiagram";
/// Id of the legacy dagre-d3 class diagram implementation
pub const CLASS: &str = "class";

/// The class family: `classDiagram` is its only generic tag
pub static CLASS_FAMILY: DiagramFamily = DiagramFamily {
    name: "class",
    generic_tags: &["classDiagram"],
    baseline: RENDERER_DAGRE_WRAPPER,
    variants: &[RENDERER_DAGRE_D3, RENDERER_DAGRE_WRAPPER],
    preference: Config::class_renderer,
};

/// Claims `classDiagram-v2`, and `classDiagram` unless dagre-d3 is preferred
pub fn v2_detector() -> VariantDetector {
    VariantDetector::new(
        &CLASS_FAMILY,
        CLASS_DIAGRAM,
        RENDERER_DAGRE_WRAPPER,
        &["classDiagram-v2"],
    )
}

/// Claims `classDiagram` when `class.defaultRenderer` is dagre-d3
pub fn legacy_detector() -> VariantDetector {
    VariantDetector::new(&CLASS_FAMILY, CLASS, RENDERER_DAGRE_D3, &[])
}
