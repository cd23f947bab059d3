//! Flowchart statement grammar
//!
//! Parses one flowchart statement at a time: the `flowchart`/`graph` header,
//! or a chain of nodes joined by connectors (`A[Start] -->|go| B --> C`).

use chumsky::prelude::*;

use crate::core::chumsky_utils::{
    enclosed, identifier, inline_whitespace, required_whitespace, ParserExtra,
};
use crate::core::{Direction, EdgeType, NodeShape};

/// A node mention, with its declaration if one is written inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: String,
    pub label: Option<String>,
    pub shape: Option<NodeShape>,
}

/// One hop of a chain: connector, optional label, target node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub edge_type: EdgeType,
    pub label: Option<String>,
    pub target: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `flowchart LR`, `graph`, `flowchart-elk TD`, ...
    Header(Direction),
    /// A node optionally followed by links; a lone node has no links
    Chain(NodeRef, Vec<Link>),
}

/// Parser for a single flowchart statement
pub fn statement<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    header().or(chain())
}

fn header<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    let keyword = choice((
        just("flowchart-elk"),
        just("flowchart-v2"),
        just("flowchart"),
        just("graph"),
    ));

    keyword
        .ignore_then(
            required_whitespace()
                .ignore_then(direction())
                .or_not(),
        )
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(|direction| Statement::Header(direction.unwrap_or_default()))
}

fn direction<'src>() -> impl Parser<'src, &'src str, Direction, ParserExtra<'src>> + Clone {
    identifier().try_map(|word, span| {
        Direction::parse(&word)
            .ok_or_else(|| Rich::custom(span, format!("unknown direction `{word}`")))
    })
}

fn chain<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    node()
        .then(link().repeated().collect::<Vec<_>>())
        .map(|(head, links)| Statement::Chain(head, links))
}

fn node<'src>() -> impl Parser<'src, &'src str, NodeRef, ParserExtra<'src>> + Clone {
    let circle = just("((")
        .ignore_then(none_of(')').repeated().collect::<String>())
        .then_ignore(just("))"))
        .map(|label| (label.trim().to_string(), NodeShape::Circle));

    let shape = choice((
        circle,
        enclosed('[', ']').map(|label| (label, NodeShape::Rectangle)),
        enclosed('(', ')').map(|label| (label, NodeShape::RoundedRect)),
        enclosed('{', '}').map(|label| (label, NodeShape::Diamond)),
    ));

    identifier()
        .then(shape.or_not())
        .map(|(id, declared)| match declared {
            Some((label, shape)) => NodeRef {
                id,
                label: Some(label),
                shape: Some(shape),
            },
            None => NodeRef {
                id,
                label: None,
                shape: None,
            },
        })
}

fn connector<'src>() -> impl Parser<'src, &'src str, EdgeType, ParserExtra<'src>> + Clone {
    choice((
        just("-.->").to(EdgeType::DottedArrow),
        just("==>").to(EdgeType::ThickArrow),
        just("-->").to(EdgeType::Arrow),
        just("---").to(EdgeType::Line),
    ))
}

fn link<'src>() -> impl Parser<'src, &'src str, Link, ParserExtra<'src>> + Clone {
    let label = inline_whitespace().ignore_then(enclosed('|', '|'));

    connector()
        .padded_by(inline_whitespace())
        .then(label.or_not())
        .then_ignore(inline_whitespace())
        .then(node())
        .map(|((edge_type, label), target)| Link {
            edge_type,
            label: label.filter(|label| !label.is_empty()),
            target,
        })
}
