//! Flowchart parser implementation
//!
//! Splits the markup into statements and applies each parsed statement to the
//! database. The header must come first; every other statement is a node
//! chain.

use anyhow::Result;
use tracing::debug;

use super::chumsky_parser::{statement, Link, NodeRef, Statement};
use super::FlowchartDatabase;
use crate::core::chumsky_utils::{parse_located, statements};
use crate::core::{Database, DiagramError, EdgeData, Parser};

/// Flowchart parser implementation
#[derive(Debug, Default)]
pub struct FlowchartParser;

impl FlowchartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser<FlowchartDatabase> for FlowchartParser {
    fn parse(&self, input: &str, database: &mut FlowchartDatabase) -> Result<()> {
        let mut seen_header = false;

        for located in statements(input) {
            match parse_located(statement(), located)? {
                Statement::Header(direction) if !seen_header => {
                    database.set_direction(direction);
                    seen_header = true;
                }
                Statement::Header(_) => {
                    return Err(DiagramError::parse_error(
                        "unexpected second flowchart header".to_string(),
                        located.line,
                        located.column,
                    )
                    .into());
                }
                Statement::Chain(..) if !seen_header => {
                    return Err(missing_header(located.line).into());
                }
                Statement::Chain(head, links) => apply_chain(database, head, links),
            }
        }

        if !seen_header {
            return Err(missing_header(1).into());
        }

        debug!(
            direction = %database.direction(),
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            "Parsed flowchart"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}

fn missing_header(line: usize) -> DiagramError {
    DiagramError::parse_error(
        "expected a `flowchart` or `graph` header".to_string(),
        line,
        1,
    )
}

fn apply_chain(database: &mut FlowchartDatabase, head: NodeRef, links: Vec<Link>) {
    database.add_node(&head.id, head.label, head.shape);

    let mut previous = head.id;
    for link in links {
        let target = link.target;
        database.add_node(&target.id, target.label, target.shape);
        database.add_edge(
            EdgeData::new(previous, target.id.clone())
                .typed(link.edge_type)
                .labeled(link.label),
        );
        previous = target.id;
    }
}
