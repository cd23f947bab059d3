//! Core abstractions for diagram processing
//!
//! Traits every diagram implementation plugs into (detector, database, parser,
//! renderer), the resettable state store behind each database, the typed
//! configuration and the registry that picks an implementation for a piece of
//! diagram text.

pub mod chumsky_utils;
mod config;
mod database;
mod definition;
mod detector;
mod error;
pub mod logging;
mod parser;
mod registry;
mod renderer;
mod state;
pub mod tag;
mod text;
mod types;

pub use config::*;
pub use database::*;
pub use definition::*;
pub use detector::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use registry::*;
pub use renderer::*;
pub use state::*;
pub use text::*;
pub use types::*;
