//! Core error types for diagram/graph translation
//!
//! Line-level problems are recoverable and never surface here as failures of a whole
//! translation; they are reported through [`crate::core::ParseReport`]. The variants
//! below abort the current translate or render call.

use thiserror::Error;

/// Core error types for the translation pipeline
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Missing diagram header: expected 'graph' or 'flowchart', found {found:?}")]
    MissingHeader { found: String },

    #[error("Unsupported arrow '{arrow}' at line {line}")]
    UnsupportedArrow { arrow: String, line: usize },

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Graph syntax error at line {line}: {message}")]
    GraphSyntax { line: usize, message: String },

    #[error("Ontology error: {message}")]
    Ontology { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl TranslateError {
    /// Create a missing header error
    pub fn missing_header(found: impl Into<String>) -> Self {
        Self::MissingHeader {
            found: found.into(),
        }
    }

    /// Create an unsupported arrow error
    pub fn unsupported_arrow(arrow: impl Into<String>, line: usize) -> Self {
        Self::UnsupportedArrow {
            arrow: arrow.into(),
            line,
        }
    }

    /// Create a malformed line error
    pub fn malformed_line(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    /// Create a graph syntax error
    pub fn graph_syntax(line: usize, message: impl Into<String>) -> Self {
        Self::GraphSyntax {
            line,
            message: message.into(),
        }
    }

    /// Create an ontology error
    pub fn ontology(message: impl Into<String>) -> Self {
        Self::Ontology {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// True for errors that reject a whole document rather than a single line
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedLine { .. })
    }
}
