//! Class diagram parser
//!
//! Statements outside a class body go through the statement grammar; lines
//! inside `class Name { ... }` are members until the closing `}`.

use anyhow::Result;
use tracing::{debug, trace};

use super::chumsky_parser::{member, statement, Statement};
use super::database::{ClassDatabase, Relationship};
use crate::core::chumsky_utils::{parse_located, statements, Located};
use crate::core::{Database, DiagramError, Parser};

/// Class diagram parser
#[derive(Debug, Default)]
pub struct ClassParser;

impl ClassParser {
    pub fn new() -> Self {
        Self
    }

    fn apply(&self, statement: Statement, at: Located<'_>, database: &mut ClassDatabase) -> Result<()> {
        match statement {
            Statement::Header => {
                return Err(DiagramError::parse_error(
                    "unexpected second classDiagram header".to_string(),
                    at.line,
                    at.column,
                )
                .into());
            }
            Statement::Class { name, opens_body } => {
                database.add_class(&name);
                if opens_body {
                    trace!(class = %name, "Opened class body");
                    database.set_open_body(Some(name));
                }
            }
            Statement::Member { class, member } => database.add_member(&class, member),
            Statement::Relationship(parsed) => database.add_relationship(Relationship {
                from: parsed.from,
                to: parsed.to,
                kind: parsed.kind,
                label: parsed.label,
            }),
        }
        Ok(())
    }
}

impl Parser<ClassDatabase> for ClassParser {
    fn parse(&self, input: &str, database: &mut ClassDatabase) -> Result<()> {
        let mut remaining = statements(input);
        let header_line = match remaining.next() {
            Some(first) => {
                if parse_located(statement(), first)? != Statement::Header {
                    return Err(missing_header(first.line).into());
                }
                first.line
            }
            None => return Err(missing_header(1).into()),
        };

        let mut body_line = header_line;
        for located in remaining {
            if let Some(class) = database.open_body().map(str::to_string) {
                if located.text == "}" {
                    database.set_open_body(None);
                } else {
                    let parsed = parse_located(member(), located)?;
                    database.add_member(&class, parsed);
                }
                continue;
            }

            let parsed = parse_located(statement(), located)?;
            if matches!(parsed, Statement::Class { opens_body: true, .. }) {
                body_line = located.line;
            }
            self.apply(parsed, located, database)?;
        }

        if let Some(class) = database.open_body() {
            return Err(DiagramError::parse_error(
                format!("class body of `{class}` is never closed"),
                body_line,
                1,
            )
            .into());
        }

        debug!(
            class_count = database.node_count(),
            relationship_count = database.edge_count(),
            "Parsed class diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class"
    }
}

fn missing_header(line: usize) -> DiagramError {
    DiagramError::parse_error("expected a `classDiagram` header".to_string(), line, 1)
}
