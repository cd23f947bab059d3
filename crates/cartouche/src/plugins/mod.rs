//! Plugin implementations for different diagram types
//!
//! Each family module provides its detectors, database, parser, renderer and
//! style generator, plus a `diagrams()` list in registration order.

pub mod class;
pub mod flowchart;
pub mod orchestrator;
pub mod state;

pub use orchestrator::*;

use crate::core::{Detector, Diagram};

/// Every built-in diagram implementation in default registration order
///
/// Flowchart variants come first (`flowchart-elk`, `flowchart-v2`,
/// `flowchart`), then state diagrams, then class diagrams.
pub fn default_diagrams() -> Vec<(Box<dyn Detector>, Box<dyn Diagram>)> {
    let mut diagrams = flowchart::diagrams();
    diagrams.extend(state::diagrams());
    diagrams.extend(class::diagrams());
    diagrams
}
