//! Text outline builder shared by the renderers
//!
//! Renderers produce a plain-text outline of the parsed diagram: a header line
//! followed by indented rows whose first column is padded to a common display
//! width.

use unicode_width::UnicodeWidthStr;

/// Indentation applied to every outline row
const INDENT: &str = "  ";

/// A titled list of two-column rows
#[derive(Debug, Default)]
pub struct Outline {
    header: String,
    rows: Vec<(String, String)>,
}

impl Outline {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row; the key column is aligned across all rows
    pub fn row(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.rows.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the outline, one row per line
    pub fn finish(&self) -> String {
        let key_width = self
            .rows
            .iter()
            .map(|(key, _)| UnicodeWidthStr::width(key.as_str()))
            .max()
            .unwrap_or(0);

        let mut out = self.header.clone();
        for (key, value) in &self.rows {
            out.push('\n');
            out.push_str(INDENT);
            out.push_str(key);
            if !value.is_empty() {
                let pad = key_width - UnicodeWidthStr::width(key.as_str());
                out.push_str(&" ".repeat(pad + 1));
                out.push_str(value);
            }
        }
        out
    }
}
