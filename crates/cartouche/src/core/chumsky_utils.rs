//! Shared chumsky combinators for the statement parsers
//!
//! Every plugin parses its diagram one statement at a time; these helpers
//! cover the pieces the statement grammars have in common and turn chumsky's
//! errors into [`DiagramError::ParseError`].

use chumsky::prelude::*;

use super::{tag, DiagramError};

/// Parser extra used by all statement grammars
pub type ParserExtra<'src> = extra::Err<Rich<'src, char>>;

/// Inline whitespace only (spaces and tabs, no newlines)
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, (), ParserExtra<'src>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// At least one space or tab
pub fn required_whitespace<'src>() -> impl Parser<'src, &'src str, (), ParserExtra<'src>> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// An identifier: letters, digits and underscores
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String, ParserExtra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
}

/// Text between a single-character opener and closer, trimmed
pub fn enclosed<'src>(
    open: char,
    close: char,
) -> impl Parser<'src, &'src str, String, ParserExtra<'src>> + Clone {
    just(open)
        .ignore_then(none_of(close).repeated().collect::<String>())
        .then_ignore(just(close))
        .map(|text| text.trim().to_string())
}

/// Rest of the line after `: `, trimmed
pub fn colon_label<'src>() -> impl Parser<'src, &'src str, String, ParserExtra<'src>> + Clone {
    just(':')
        .padded_by(inline_whitespace())
        .ignore_then(any().repeated().collect::<String>())
        .map(|text| text.trim().to_string())
}

/// A statement with the position where it starts in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<'a> {
    /// 1-based line number, counted from the start of the input
    pub line: usize,
    /// 1-based character column of the statement's first character
    pub column: usize,
    pub text: &'a str,
}

/// Run a statement grammar over one whole line
///
/// `line_number` is 1-based and only used for error reporting; columns are
/// counted from the start of `line`.
pub fn parse_line<'src, T>(
    parser: impl Parser<'src, &'src str, T, ParserExtra<'src>>,
    line: &'src str,
    line_number: usize,
) -> Result<T, DiagramError> {
    parse_located(
        parser,
        Located {
            line: line_number,
            column: 1,
            text: line,
        },
    )
}

/// Run a statement grammar over one located statement
///
/// Error columns are shifted so they point into the source line rather than
/// into the statement.
pub fn parse_located<'src, T>(
    parser: impl Parser<'src, &'src str, T, ParserExtra<'src>>,
    statement: Located<'src>,
) -> Result<T, DiagramError> {
    let text = statement.text;
    parser
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .parse(text)
        .into_result()
        .map_err(|errors| {
            let (message, offset) = errors
                .first()
                .map(|e| {
                    let start = e.span().start;
                    let chars = text.get(..start).map_or(start, |prefix| prefix.chars().count());
                    (e.to_string(), chars)
                })
                .unwrap_or_else(|| ("unrecognised statement".to_string(), 0));
            DiagramError::parse_error(message, statement.line, statement.column + offset)
        })
}

/// Split diagram text into located statements
///
/// Statements are separated by newlines or `;`. The preamble (front matter,
/// directives), blank statements and `%%` comments are dropped; line numbers
/// are 1-based and count from the start of `input`.
pub fn statements(input: &str) -> impl Iterator<Item = Located<'_>> {
    let body = tag::strip_preamble(input);
    let skipped = input[..input.len() - body.len()].matches('\n').count();

    body.lines().enumerate().flat_map(move |(index, raw)| {
        let parts: Vec<Located<'_>> = if raw.trim_start().starts_with("%%") {
            Vec::new()
        } else {
            let mut offset = 0;
            raw.split(';')
                .map(|part| {
                    let lead = part.len() - part.trim_start().len();
                    let located = Located {
                        line: skipped + index + 1,
                        column: raw[..offset + lead].chars().count() + 1,
                        text: part.trim(),
                    };
                    offset += part.len() + 1;
                    located
                })
                .collect()
        };
        parts.into_iter().filter(|part| !part.text.is_empty())
    })
}
