//! Core error types for diagram resolution and processing
//!
//! This module defines the error taxonomy shared by the registry, the state
//! stores and the per-diagram pipeline.

use thiserror::Error;

/// Maximum number of characters of the candidate kept in an unresolved error
const CANDIDATE_EXCERPT_LEN: usize = 60;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("No diagram type detected matching given configuration for text: {candidate}")]
    UnknownDiagramType { candidate: String },

    #[error("Reset of {diagram} state failed: {message}")]
    ResetFailed { diagram: String, message: String },

    #[error("Diagram {id} is already registered")]
    DuplicateDiagram { id: String },

    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create an unresolved diagram error, keeping a short excerpt of the input
    pub fn unknown_diagram_type(candidate: &str) -> Self {
        let trimmed = candidate.trim();
        let mut excerpt: String = trimmed.chars().take(CANDIDATE_EXCERPT_LEN).collect();
        if trimmed.chars().count() > CANDIDATE_EXCERPT_LEN {
            excerpt.push_str("...");
        }
        Self::UnknownDiagramType { candidate: excerpt }
    }

    /// Create a new reset failure
    pub fn reset_failed(diagram: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResetFailed {
            diagram: diagram.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }

    /// Create a new config error
    pub fn config_error(message: String) -> Self {
        Self::ConfigError { message }
    }

    /// Returns true for failures that leave a state store unusable
    pub fn is_reset_failure(&self) -> bool {
        matches!(self, Self::ResetFailed { .. })
    }
}
