//! Core parser trait for diagram markup
//!
//! A parser consumes the diagram text and writes what it finds into the
//! diagram's database. Parsers hold no state of their own.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use cartouche::core::{Database, Parser};
/// use cartouche::plugins::flowchart::{FlowchartDatabase, FlowchartParser};
///
/// let parser = FlowchartParser::new();
/// let mut db = FlowchartDatabase::new();
/// parser.parse("graph TD\n  A --> B", &mut db).unwrap();
/// assert_eq!(db.node_count(), 2);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram markup into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;
}
