//! State diagram database implementation
//!
//! Stores states and transitions using the core node and edge types.

use tracing::trace;

use crate::core::{Database, Direction, EdgeData, NodeData, NodeShape, ResettableState};

/// Identifier of the start/end pseudo state
pub const TERMINAL: &str = "[*]";

/// Everything a state diagram render reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateRecords {
    pub direction: Direction,
    pub states: Vec<NodeData>,
    pub transitions: Vec<EdgeData>,
    /// Settings written by the init hook
    pub settings: StateSettings,
}

/// Per-render settings copied from the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSettings {
    pub arrow_marker_absolute: bool,
}

/// State diagram database backed by a resettable store
#[derive(Debug)]
pub struct StateDatabase {
    state: ResettableState<StateRecords>,
}

impl StateDatabase {
    pub fn new() -> Self {
        Self {
            state: ResettableState::new(StateRecords::default),
        }
    }

    pub fn direction(&self) -> Direction {
        self.state.records().direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state.records_mut().direction = direction;
    }

    pub fn settings(&self) -> &StateSettings {
        &self.state.records().settings
    }

    pub fn settings_mut(&mut self) -> &mut StateSettings {
        &mut self.state.records_mut().settings
    }

    /// Declare a state, or relabel one that already exists
    pub fn add_state(&mut self, id: &str, label: Option<String>) {
        self.ensure_state(id);
        if let Some(label) = label {
            if let Some(state) = self.state.records_mut().states.iter_mut().find(|s| s.id == id) {
                state.label = label;
            }
        }
    }

    /// Ensure a state exists (creates an implicit state if needed)
    pub fn ensure_state(&mut self, id: &str) {
        let states = &mut self.state.records_mut().states;
        if states.iter().any(|s| s.id == id) {
            return;
        }

        let shape = if id == TERMINAL {
            NodeShape::Terminal
        } else {
            NodeShape::RoundedRect
        };
        trace!(state = id, "Adding implicit state");
        states.push(NodeData::with_shape(id, id, shape));
    }

    /// Add a transition, creating its endpoints if needed
    pub fn add_transition(&mut self, transition: EdgeData) {
        self.ensure_state(&transition.from);
        self.ensure_state(&transition.to);
        self.state.records_mut().transitions.push(transition);
    }

    pub fn states(&self) -> &[NodeData] {
        &self.state.records().states
    }

    pub fn transitions(&self) -> &[EdgeData] {
        &self.state.records().transitions
    }
}

impl Default for StateDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for StateDatabase {
    type Records = StateRecords;

    fn state(&self) -> &ResettableState<StateRecords> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ResettableState<StateRecords> {
        &mut self.state
    }

    fn node_count(&self) -> usize {
        self.states().len()
    }

    fn edge_count(&self) -> usize {
        self.transitions().len()
    }
}
