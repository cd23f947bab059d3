//! Class diagram statement grammar

use chumsky::prelude::*;

use super::database::{Member, RelationshipKind, Visibility};
use crate::core::chumsky_utils::{
    colon_label, identifier, inline_whitespace, required_whitespace, ParserExtra,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRelationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `classDiagram` or `classDiagram-v2`
    Header,
    /// `class Name`, optionally opening a `{` body
    Class { name: String, opens_body: bool },
    /// `Name : +member`
    Member { class: String, member: Member },
    Relationship(ParsedRelationship),
}

/// Parser for a statement outside a class body
pub fn statement<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    header()
        .or(class_decl())
        .or(relationship().map(Statement::Relationship))
        .or(member_decl())
}

/// Parser for one line inside a class body
pub fn member<'src>() -> impl Parser<'src, &'src str, Member, ParserExtra<'src>> + Clone {
    one_of("+-#~")
        .or_not()
        .then(any().repeated().at_least(1).collect::<String>())
        .map(|(visibility, text)| Member {
            visibility: visibility.and_then(Visibility::from_char),
            text: text.trim().to_string(),
        })
}

fn header<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    just("classDiagram-v2")
        .or(just("classDiagram"))
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .to(Statement::Header)
}

fn class_decl<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    just("class")
        .ignore_then(required_whitespace())
        .ignore_then(identifier())
        .then(just('{').padded_by(inline_whitespace()).or_not())
        .map(|(name, brace)| Statement::Class {
            name,
            opens_body: brace.is_some(),
        })
}

fn relationship_kind<'src>(
) -> impl Parser<'src, &'src str, RelationshipKind, ParserExtra<'src>> + Clone {
    choice((
        just("<|--").to(RelationshipKind::Inheritance),
        just("..|>").to(RelationshipKind::Realization),
        just("*--").to(RelationshipKind::Composition),
        just("o--").to(RelationshipKind::Aggregation),
        just("..>").to(RelationshipKind::Dependency),
        just("-->").to(RelationshipKind::Association),
        just("..").to(RelationshipKind::DashedLink),
        just("--").to(RelationshipKind::Link),
    ))
}

fn relationship<'src>(
) -> impl Parser<'src, &'src str, ParsedRelationship, ParserExtra<'src>> + Clone {
    identifier()
        .then(relationship_kind().padded_by(inline_whitespace()))
        .then(identifier())
        .then(colon_label().or_not())
        .map(|(((from, kind), to), label)| ParsedRelationship {
            from,
            to,
            kind,
            label: label.filter(|label| !label.is_empty()),
        })
}

fn member_decl<'src>() -> impl Parser<'src, &'src str, Statement, ParserExtra<'src>> + Clone {
    identifier()
        .then_ignore(just(':').padded_by(inline_whitespace()))
        .then(member())
        .map(|(class, member)| Statement::Member { class, member })
}
