//! Core database trait for diagram state
//!
//! Each diagram implementation keeps its parsed data in a database backed by a
//! [`ResettableState`]. The database is owned by the diagram definition and
//! passed explicitly to the parser and renderer; clearing it rebuilds every
//! record from the store's factory.

use super::{DiagramError, ResettableState};

/// Core trait for diagram databases
///
/// Implementors expose their [`ResettableState`] and domain accessors; the
/// provided [`clear`](Database::clear) resets the store so a render never
/// observes data from a previous one.
pub trait Database: Send {
    /// The record set held in the resettable store
    type Records: Send + 'static;

    /// The backing store
    fn state(&self) -> &ResettableState<Self::Records>;

    /// The backing store, mutably
    fn state_mut(&mut self) -> &mut ResettableState<Self::Records>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// Reset every record to the factory defaults
    fn clear(&mut self) -> Result<(), DiagramError> {
        self.state_mut().reset()
    }

    /// True if a failed reset left the store unusable
    fn is_poisoned(&self) -> bool {
        self.state().is_poisoned()
    }

    /// Number of completed resets
    fn generation(&self) -> u64 {
        self.state().generation()
    }
}
