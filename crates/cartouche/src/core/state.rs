//! Resettable state storage
//!
//! Every diagram implementation keeps the data it parses in a
//! [`ResettableState`]. The store remembers the factory that produced its
//! defaults and can rebuild them on demand, so one implementation instance can
//! serve many renders without leaking data from one into the next.
//!
//! # Example
//!
//! ```rust
//! use cartouche::core::ResettableState;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Records {
//!     title: Option<String>,
//!     nodes: Vec<String>,
//! }
//!
//! let mut state = ResettableState::new(Records::default);
//! state.records_mut().title = Some("hi".to_string());
//! state.records_mut().nodes.push("A".to_string());
//!
//! state.reset().unwrap();
//! assert_eq!(state.records(), &Records::default());
//! ```

use std::fmt;

use tracing::{trace, warn};

use super::DiagramError;

type Factory<S> = Box<dyn Fn() -> Result<S, DiagramError> + Send + Sync>;

/// A mutable record store that can be rebuilt from its default factory
///
/// The factory is invoked afresh on every reset. Defaults are never cached,
/// so containers in the new generation (empty vectors, maps) are never shared
/// with a value handed out before the reset.
pub struct ResettableState<S> {
    init: Factory<S>,
    records: S,
    generation: u64,
    poisoned: bool,
}

impl<S: 'static> ResettableState<S> {
    /// Create a store from an infallible factory
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        let records = init();
        Self {
            init: Box::new(move || Ok(init())),
            records,
            generation: 0,
            poisoned: false,
        }
    }

    /// Create a store from a factory that may fail
    ///
    /// The factory runs once immediately to produce the initial records.
    pub fn try_new<F>(init: F) -> Result<Self, DiagramError>
    where
        F: Fn() -> Result<S, DiagramError> + Send + Sync + 'static,
    {
        let records = init()?;
        Ok(Self {
            init: Box::new(init),
            records,
            generation: 0,
            poisoned: false,
        })
    }

    /// Current records
    pub fn records(&self) -> &S {
        &self.records
    }

    /// Current records, mutably
    pub fn records_mut(&mut self) -> &mut S {
        &mut self.records
    }

    /// Number of successful resets since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True after a failed reset, until the next successful one
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Replace every field with the output of a fresh factory call
    ///
    /// The previous generation is dropped as a whole, so keys or fields the
    /// factory no longer emits cannot survive. If the factory fails the store
    /// is marked poisoned and the error is returned.
    pub fn reset(&mut self) -> Result<(), DiagramError> {
        self.take().map(drop)
    }

    /// Reset the store and return the previous generation's records
    pub fn take(&mut self) -> Result<S, DiagramError> {
        match (self.init)() {
            Ok(fresh) => {
                let previous = std::mem::replace(&mut self.records, fresh);
                self.generation += 1;
                self.poisoned = false;
                trace!(generation = self.generation, "State store reset");
                Ok(previous)
            }
            Err(err) => {
                warn!(error = %err, "State store reset failed");
                self.poisoned = true;
                Err(err)
            }
        }
    }
}

impl<S: Default + 'static> Default for ResettableState<S> {
    fn default() -> Self {
        Self::new(S::default)
    }
}

impl<S: fmt::Debug> fmt::Debug for ResettableState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResettableState")
            .field("records", &self.records)
            .field("generation", &self.generation)
            .field("poisoned", &self.poisoned)
            .finish_non_exhaustive()
    }
}
