//! Flowchart database implementation
//!
//! Stores flowchart data (direction, nodes with shapes, edges with types and
//! labels) in a [`ResettableState`] so the same database can serve every
//! render.

use std::collections::HashMap;

use tracing::trace;

use crate::core::{Database, Direction, EdgeData, NodeData, NodeShape, ResettableState};

/// Everything a flowchart render reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowchartRecords {
    pub direction: Direction,
    /// Nodes in first-mention order
    pub nodes: Vec<NodeData>,
    /// Edges in insertion order
    pub edges: Vec<EdgeData>,
    /// Copied from the configuration by the init hook
    pub arrow_marker_absolute: bool,
    index: HashMap<String, usize>,
}

/// Flowchart database implementation
#[derive(Debug)]
pub struct FlowchartDatabase {
    state: ResettableState<FlowchartRecords>,
}

impl FlowchartDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self {
            state: ResettableState::new(FlowchartRecords::default),
        }
    }

    pub fn direction(&self) -> Direction {
        self.state.records().direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state.records_mut().direction = direction;
    }

    pub fn arrow_marker_absolute(&self) -> bool {
        self.state.records().arrow_marker_absolute
    }

    pub fn set_arrow_marker_absolute(&mut self, absolute: bool) {
        self.state.records_mut().arrow_marker_absolute = absolute;
    }

    /// Add a node, or update the label and shape of an existing one
    ///
    /// A bare mention (`label` and `shape` both `None`) never overwrites an
    /// earlier explicit declaration.
    pub fn add_node(&mut self, id: &str, label: Option<String>, shape: Option<NodeShape>) {
        let records = self.state.records_mut();
        if let Some(&position) = records.index.get(id) {
            let node = &mut records.nodes[position];
            if let Some(label) = label {
                node.label = label;
            }
            if let Some(shape) = shape {
                node.shape = shape;
            }
            return;
        }

        trace!(node = id, "Adding flowchart node");
        let node = NodeData::with_shape(
            id,
            label.unwrap_or_else(|| id.to_string()),
            shape.unwrap_or_default(),
        );
        records.index.insert(id.to_string(), records.nodes.len());
        records.nodes.push(node);
    }

    /// Add an edge, creating missing endpoints as plain nodes
    pub fn add_edge(&mut self, edge: EdgeData) {
        self.add_node(&edge.from, None, None);
        self.add_node(&edge.to, None, None);
        self.state.records_mut().edges.push(edge);
    }

    pub fn get_node(&self, id: &str) -> Option<&NodeData> {
        let records = self.state.records();
        records.index.get(id).map(|&position| &records.nodes[position])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.state.records().nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.state.records().edges.iter()
    }
}

impl Default for FlowchartDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for FlowchartDatabase {
    type Records = FlowchartRecords;

    fn state(&self) -> &ResettableState<FlowchartRecords> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ResettableState<FlowchartRecords> {
        &mut self.state
    }

    fn node_count(&self) -> usize {
        self.state.records().nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.state.records().edges.len()
    }
}
