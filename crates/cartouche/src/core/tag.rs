//! Diagram type tag helpers
//!
//! Detectors are called either with a bare tag (`"flowchart-elk"`) or with the
//! full diagram text. Both go through the same helpers: the text is stripped
//! of anything that may precede the diagram header (blank lines, `%%`
//! comments, `%%{...}%%` directives, `---` front matter) and the first token
//! of the header line is the leading keyword.

/// Return the candidate starting at its first significant line
///
/// Leading whitespace is removed as well, so the result begins with the
/// diagram keyword when there is one.
pub fn strip_preamble(candidate: &str) -> &str {
    let mut rest = candidate.trim_start();

    if let Some(after) = front_matter_end(rest) {
        rest = after.trim_start();
    }

    loop {
        if rest.starts_with("%%") {
            rest = match rest.find('\n') {
                Some(pos) => rest[pos + 1..].trim_start(),
                None => "",
            };
        } else {
            return rest;
        }
    }
}

/// The first token of the first significant line, if any
///
/// Tokens end at whitespace or `;`, so `"graph TD; A-->B"` yields `"graph"`.
pub fn leading_keyword(candidate: &str) -> Option<&str> {
    let header = strip_preamble(candidate);
    let end = header
        .find(|c: char| c.is_whitespace() || c == ';')
        .unwrap_or(header.len());
    let keyword = &header[..end];
    (!keyword.is_empty()).then_some(keyword)
}

/// True when the candidate names `tag` exactly or starts with it
pub fn has_tag_prefix(candidate: &str, tag: &str) -> bool {
    !tag.is_empty() && strip_preamble(candidate).starts_with(tag)
}

/// Skip a `---` front matter block, returning what follows it
fn front_matter_end(text: &str) -> Option<&str> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end() == "---" {
            return Some(&text[offset..]);
        }
    }
    // Unterminated front matter is left to the parser to report.
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_keyword_of_bare_tag() {
        assert_eq!(leading_keyword("flowchart"), Some("flowchart"));
        assert_eq!(leading_keyword("flowchart-elk"), Some("flowchart-elk"));
        assert_eq!(leading_keyword("  graph  "), Some("graph"));
    }

    #[test]
    fn test_leading_keyword_of_text() {
        assert_eq!(leading_keyword("graph TD; A-->B"), Some("graph"));
        assert_eq!(leading_keyword("graph;A-->B"), Some("graph"));
        assert_eq!(
            leading_keyword("\n\nstateDiagram-v2\n  [*] --> Idle"),
            Some("stateDiagram-v2")
        );
    }

    #[test]
    fn test_leading_keyword_skips_comments_and_directives() {
        let input = "%% a comment\n%%{init: {\"theme\": \"dark\"}}%%\nclassDiagram\n  A <|-- B";
        assert_eq!(leading_keyword(input), Some("classDiagram"));
    }

    #[test]
    fn test_leading_keyword_skips_front_matter() {
        let input = "---\ntitle: Example\n---\nflowchart LR\n  A --> B";
        assert_eq!(leading_keyword(input), Some("flowchart"));
        assert!(strip_preamble(input).starts_with("flowchart LR"));
    }

    #[test]
    fn test_unterminated_front_matter_is_kept() {
        let input = "---\ntitle: Example\nflowchart LR";
        assert_eq!(leading_keyword(input), Some("---"));
    }

    #[test]
    fn test_leading_keyword_of_empty_input() {
        assert_eq!(leading_keyword(""), None);
        assert_eq!(leading_keyword("   \n\t "), None);
        assert_eq!(leading_keyword("%% only a comment"), None);
    }

    #[test]
    fn test_has_tag_prefix() {
        assert!(has_tag_prefix("flowchart-elk", "flowchart-elk"));
        assert!(has_tag_prefix("flowchart-elk TD\nA-->B", "flowchart-elk"));
        assert!(has_tag_prefix("  %% c\nflowchart-elk", "flowchart-elk"));
        assert!(!has_tag_prefix("flowchart", "flowchart-elk"));
        assert!(!has_tag_prefix("anything", ""));
    }
}
