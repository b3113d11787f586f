//! Core parser trait for diagram markup
//!
//! A parser reads diagram text and adds the triples it implies to a
//! [`TripleStore`]. Line-level problems do not fail the parse; they are
//! collected in the returned [`ParseReport`].

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use super::{TranslateError, TripleStore};

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use mermaidrdf::core::{Graph, Parser, TripleStore};
/// use mermaidrdf::plugins::flowchart::FlowchartParser;
///
/// let parser = FlowchartParser::new();
/// let mut graph = Graph::new();
/// let report = parser.parse("graph LR\n  A --> B", &mut graph).unwrap();
/// assert_eq!(report.lines_parsed, 1);
/// assert!(!graph.is_empty());
/// ```
pub trait Parser<S: TripleStore>: Send + Sync {
    /// Parse diagram markup into the provided store
    fn parse(&self, input: &str, store: &mut S) -> Result<ParseReport>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}

/// Why a diagram line produced no triples
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    Blank,
    TooShort,
    Comment,
    /// Structural keyword such as `subgraph` or `classDef`
    Directive(String),
    /// Line or node text does not match the node/arrow grammar
    Grammar(String),
}

impl SkipReason {
    /// Skips worth telling the author about
    pub fn is_notable(&self) -> bool {
        matches!(self, SkipReason::Directive(_) | SkipReason::Grammar(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Blank => write!(f, "blank line"),
            SkipReason::TooShort => write!(f, "line too short"),
            SkipReason::Comment => write!(f, "comment"),
            SkipReason::Directive(keyword) => write!(f, "unsupported keyword '{}'", keyword),
            SkipReason::Grammar(detail) => write!(f, "{}", detail),
        }
    }
}

/// A skipped line of diagram text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the diagram
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

impl SkippedLine {
    /// The skip as a recoverable error, for reporting
    pub fn to_error(&self) -> TranslateError {
        TranslateError::malformed_line(self.line, format!("{} in '{}'", self.reason, self.text))
    }
}

/// Outcome of parsing one diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Triples not present in the store before this parse
    pub triples_added: usize,
    /// Statements that produced triples
    pub lines_parsed: usize,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Skipped lines that are directives or grammar failures
    pub fn notable_skips(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped.iter().filter(|skip| skip.reason.is_notable())
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: ParseReport) {
        self.triples_added += other.triples_added;
        self.lines_parsed += other.lines_parsed;
        self.skipped.extend(other.skipped);
    }
}
