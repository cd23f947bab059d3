//! State diagram parser using chumsky
//!
//! Parses state diagram syntax into the database, one statement at a time.

use anyhow::Result;
use chumsky::prelude::*;
use tracing::debug;

use super::database::{StateDatabase, TERMINAL};
use crate::core::chumsky_utils::{
    colon_label, identifier, inline_whitespace, parse_located, required_whitespace, statements,
    ParserExtra,
};
use crate::core::{Database, DiagramError, Direction, EdgeData, Parser as CoreParser};

/// Parsed state diagram statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `stateDiagram` or `stateDiagram-v2`
    Header,
    /// `direction LR`
    Direction(Direction),
    /// `state "description" as id`, `id : description` or a bare `id`
    StateDecl { id: String, label: Option<String> },
    /// `from --> to` or `from --> to : label`
    Transition {
        from: String,
        to: String,
        label: Option<String>,
    },
}

/// State diagram parser
#[derive(Debug, Default)]
pub struct StateParser;

impl StateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parser for one statement
    fn statement<'src>() -> impl chumsky::Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone
    {
        Self::header()
            .or(Self::direction())
            .or(Self::state_alias())
            .or(Self::transition())
            .or(Self::described_state())
    }

    fn header<'src>() -> impl chumsky::Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone
    {
        just("stateDiagram-v2")
            .or(just("stateDiagram"))
            .then_ignore(inline_whitespace())
            .then_ignore(end())
            .to(Statement::Header)
    }

    fn direction<'src>() -> impl chumsky::Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone
    {
        just("direction")
            .then(required_whitespace())
            .ignore_then(identifier())
            .try_map(|word, span| {
                Direction::parse(&word)
                    .map(Statement::Direction)
                    .ok_or_else(|| Rich::custom(span, format!("unknown direction `{word}`")))
            })
    }

    /// `[*]` or a state name
    fn state_ref<'src>() -> impl chumsky::Parser<'src, &'src str, String, ParserExtra<'src>> + Clone
    {
        just(TERMINAL).to(TERMINAL.to_string()).or(identifier())
    }

    fn quoted_string<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, String, ParserExtra<'src>> + Clone {
        just('"')
            .ignore_then(none_of('"').repeated().collect::<String>())
            .then_ignore(just('"'))
    }

    fn state_alias<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
        just("state")
            .then(required_whitespace())
            .ignore_then(Self::quoted_string())
            .then_ignore(required_whitespace())
            .then_ignore(just("as"))
            .then_ignore(required_whitespace())
            .then(identifier())
            .map(|(label, id)| Statement::StateDecl {
                id,
                label: Some(label),
            })
    }

    fn transition<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
        Self::state_ref()
            .then_ignore(just("-->").padded_by(inline_whitespace()))
            .then(Self::state_ref())
            .then(colon_label().or_not())
            .map(|((from, to), label)| Statement::Transition {
                from,
                to,
                label: label.filter(|label| !label.is_empty()),
            })
    }

    fn described_state<'src>(
    ) -> impl chumsky::Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
        identifier()
            .then(colon_label().or_not())
            .map(|(id, label)| Statement::StateDecl {
                id,
                label: label.filter(|label| !label.is_empty()),
            })
    }

    fn apply(statement: Statement, database: &mut StateDatabase) {
        match statement {
            Statement::Header => {}
            Statement::Direction(direction) => database.set_direction(direction),
            Statement::StateDecl { id, label } => database.add_state(&id, label),
            Statement::Transition { from, to, label } => {
                database.add_transition(EdgeData::new(from, to).labeled(label))
            }
        }
    }
}

impl CoreParser<StateDatabase> for StateParser {
    fn parse(&self, input: &str, database: &mut StateDatabase) -> Result<()> {
        let mut remaining = statements(input);

        match remaining.next() {
            Some(first) => {
                if parse_located(Self::statement(), first)? != Statement::Header {
                    return Err(missing_header(first.line).into());
                }
            }
            None => return Err(missing_header(1).into()),
        }

        for located in remaining {
            match parse_located(Self::statement(), located)? {
                Statement::Header => {
                    return Err(DiagramError::parse_error(
                        "unexpected second stateDiagram header".to_string(),
                        located.line,
                        located.column,
                    )
                    .into());
                }
                statement => Self::apply(statement, database),
            }
        }

        debug!(
            state_count = database.node_count(),
            transition_count = database.edge_count(),
            "Parsed state diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "state"
    }
}

fn missing_header(line: usize) -> DiagramError {
    DiagramError::parse_error(
        "expected a `stateDiagram` header".to_string(),
        line,
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chumsky_utils::parse_line;
    use crate::core::NodeShape;

    fn statement(line: &str) -> Statement {
        parse_line(StateParser::statement(), line, 1).unwrap()
    }

    fn parse(input: &str) -> Result<StateDatabase> {
        let mut db = StateDatabase::new();
        StateParser::new().parse(input, &mut db)?;
        Ok(db)
    }

    #[test]
    fn test_statements() {
        assert_eq!(statement("stateDiagram-v2"), Statement::Header);
        assert_eq!(statement("direction LR"), Statement::Direction(Direction::LeftRight));
        assert_eq!(
            statement("state \"Waiting for input\" as Idle"),
            Statement::StateDecl {
                id: "Idle".to_string(),
                label: Some("Waiting for input".to_string())
            }
        );
        assert_eq!(
            statement("Idle --> Busy : start"),
            Statement::Transition {
                from: "Idle".to_string(),
                to: "Busy".to_string(),
                label: Some("start".to_string())
            }
        );
        assert_eq!(
            statement("Busy: crunching"),
            Statement::StateDecl {
                id: "Busy".to_string(),
                label: Some("crunching".to_string())
            }
        );
    }

    #[test]
    fn test_terminal_transitions() {
        let db = parse("stateDiagram\n  [*] --> Idle\n  Idle --> [*]").unwrap();
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 2);
        assert_eq!(db.states()[0].shape, NodeShape::Terminal);
    }

    #[test]
    fn test_header_required_first() {
        assert!(parse("Idle --> Busy").is_err());
        assert!(parse("").is_err());
        assert!(parse("stateDiagram\nstateDiagram-v2").is_err());
    }

    #[test]
    fn test_invalid_statement_reports_line() {
        let err = parse("stateDiagram\n  A --> B\n  A ->> B").unwrap_err();
        match err.downcast_ref::<DiagramError>() {
            Some(DiagramError::ParseError { line, .. }) => assert_eq!(*line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
