//! Flowchart translator
//!
//! Validates the diagram header, then tokenizes every statement, classifies
//! its nodes and resolves its edges into triples. A bad statement is skipped
//! and reported; a missing header or an unsupported arrow fails the whole
//! diagram.

use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, span, trace, warn, Level};

use super::chumsky_parser::ChumskyNodeParser;
use super::classifier::{local_term, NodeClassifier};
use super::resolver::RelationResolver;
use super::tokenizer::{split_statements, tokenize};
use crate::core::{
    ArrowKind, Direction, ParseReport, Parser, SkipReason, SkippedLine, TranslateError, Triple,
    TripleStore,
};
use crate::ontology::OntologyTables;

/// Header keywords accepted at the top of a diagram
pub const HEADER_KEYWORDS: &[&str] = &["graph", "flowchart"];

/// A parsed `graph LR; ...` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub keyword: &'a str,
    pub direction: Option<Direction>,
    /// Statements following the header on the same line
    pub rest: Option<&'a str>,
}

/// Parse a header line, `None` if it does not start with a header keyword
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let line = line.trim();
    let (head, rest) = match line.split_once(';') {
        Some((head, rest)) => (head, Some(rest)),
        None => (line, None),
    };

    let mut words = head.split_whitespace();
    let keyword = words.next()?;
    if !HEADER_KEYWORDS.contains(&keyword) {
        return None;
    }
    let direction = words.next().and_then(|d| d.parse().ok());
    Some(Header {
        keyword,
        direction,
        rest,
    })
}

/// Diagram→graph translator for flowcharts
pub struct FlowchartParser {
    nodes: ChumskyNodeParser,
    classifier: NodeClassifier,
    resolver: RelationResolver,
}

impl FlowchartParser {
    /// Parser using the built-in D3FEND tables
    pub fn new() -> Self {
        Self::with_tables(OntologyTables::shared())
    }

    pub fn with_tables(tables: Arc<OntologyTables>) -> Self {
        Self {
            nodes: ChumskyNodeParser::new(),
            classifier: NodeClassifier::new(Arc::clone(&tables)),
            resolver: RelationResolver::new(tables),
        }
    }

    /// Triples for one statement, or the reason it was skipped
    fn translate_statement(
        &self,
        statement: &str,
        line: usize,
    ) -> Result<Outcome, TranslateError> {
        let segments = match tokenize(statement) {
            Ok(segments) => segments,
            Err(reason) => return Ok(Outcome::Skipped(reason)),
        };

        let mut nodes = Vec::with_capacity(segments.len());
        for segment in &segments {
            match self.nodes.parse_node(segment.node) {
                Ok(node) => nodes.push(node),
                Err(err) => return Ok(Outcome::Skipped(SkipReason::Grammar(err.to_string()))),
            }
        }

        let mut triples = Vec::new();
        let mut seen = HashSet::new();
        let mut previous: Option<(String, &str, Option<&str>)> = None;

        for (node, segment) in nodes.iter().zip(&segments) {
            // repeats are classified again only when they carry a shape or label
            let first_sight = seen.insert(node.id.as_str());
            let subject = if first_sight || node.shape.is_some() || node.label.is_some() {
                let (subject, node_triples) = self.classifier.classify(node);
                triples.extend(node_triples);
                subject
            } else {
                local_term(&node.id)
            };

            if let Some((src, arrow, annotation)) = previous.take() {
                let kind = ArrowKind::from_token(arrow, line)?;
                triples.extend(self.resolver.resolve(&src, &subject, kind, annotation));
            }

            previous = segment
                .arrow
                .map(|arrow| (subject, arrow, segment.annotation));
        }

        Ok(Outcome::Triples(triples))
    }
}

enum Outcome {
    Triples(Vec<Triple>),
    Skipped(SkipReason),
}

impl Default for FlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TripleStore> Parser<S> for FlowchartParser {
    fn parse(&self, input: &str, store: &mut S) -> Result<ParseReport> {
        let parse_span = span!(Level::INFO, "parse_flowchart", input_len = input.len());
        let _enter = parse_span.enter();

        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text))
            .skip_while(|(_, text)| text.trim().is_empty());

        let (header_line, header_text) = lines.next().unwrap_or((0, ""));
        let header = parse_header(header_text).ok_or_else(|| {
            warn!(found = header_text.trim(), "Diagram does not start with a header");
            TranslateError::missing_header(header_text.trim())
        })?;
        debug!(keyword = header.keyword, direction = ?header.direction, "Parsed header");

        let statements = header
            .rest
            .into_iter()
            .flat_map(split_statements)
            .map(|statement| (header_line, statement))
            .chain(lines.flat_map(|(line, text)| {
                split_statements(text)
                    .into_iter()
                    .map(move |statement| (line, statement))
            }));

        let mut report = ParseReport::default();
        for (line, statement) in statements {
            match self.translate_statement(statement, line)? {
                Outcome::Triples(triples) => {
                    let count = triples.len();
                    let added = store.insert_all(triples);
                    report.triples_added += added;
                    report.lines_parsed += 1;
                    debug!(line, triple_count = count, added, "Translated statement");
                }
                Outcome::Skipped(reason) => {
                    if reason.is_notable() {
                        warn!(line, statement = statement.trim(), %reason, "Skipping statement");
                    } else {
                        trace!(line, %reason, "Skipping statement");
                    }
                    report.skipped.push(SkippedLine {
                        line,
                        text: statement.trim().to_string(),
                        reason,
                    });
                }
            }
        }

        info!(
            lines_parsed = report.lines_parsed,
            triples_added = report.triples_added,
            skipped = report.skipped.len(),
            "Flowchart translated"
        );
        Ok(report)
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn can_parse(&self, input: &str) -> bool {
        input
            .lines()
            .find(|line| !line.trim().is_empty())
            .and_then(parse_header)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Graph;

    fn translate(input: &str) -> (Graph, ParseReport) {
        let mut graph = Graph::new();
        let report = FlowchartParser::new().parse(input, &mut graph).unwrap();
        (graph, report)
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header("graph LR").unwrap();
        assert_eq!(header.keyword, "graph");
        assert_eq!(header.direction, Some(Direction::LeftRight));
        assert_eq!(header.rest, None);

        let header = parse_header("flowchart TD; A-->B").unwrap();
        assert_eq!(header.direction, Some(Direction::TopDown));
        assert_eq!(header.rest, Some(" A-->B"));

        assert_eq!(parse_header("graph").unwrap().direction, None);
        assert!(parse_header("sequenceDiagram").is_none());
        assert!(parse_header("graphs LR").is_none());
    }

    #[test]
    fn test_parser_metadata() {
        let parser = FlowchartParser::new();
        assert_eq!(<FlowchartParser as Parser<Graph>>::name(&parser), "flowchart");
        assert!(<FlowchartParser as Parser<Graph>>::can_parse(&parser, "\ngraph TD\nA-->B"));
        assert!(!<FlowchartParser as Parser<Graph>>::can_parse(&parser, "A-->B"));
    }

    #[test]
    fn test_missing_header_is_fatal() {
        let mut graph = Graph::new();
        let err = FlowchartParser::new()
            .parse("A --> B", &mut graph)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TranslateError>(),
            Some(TranslateError::MissingHeader { .. })
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_empty_body() {
        let (graph, report) = translate("graph LR\n\n");
        assert!(graph.is_empty());
        assert_eq!(report, ParseReport::default());
    }

    #[test]
    fn test_simple_chain() {
        let (graph, report) = translate("graph LR\n  A --> B --> C");
        assert_eq!(report.lines_parsed, 1);
        assert_eq!(graph.len(), 5);
        assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
        assert!(graph.contains(&Triple::named(":B", "d3f:accesses", ":C")));
    }

    #[test]
    fn test_header_statements_are_translated() {
        let (graph, _) = translate("graph LR; A-->B; B--oC");
        assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
        assert!(graph.contains(&Triple::named(":B", "d3f:reads", ":C")));
    }

    #[test]
    fn test_first_occurrence_classifies() {
        let (graph, _) = translate("graph LR\n  db[(mysql)] --> app --> db");
        assert!(graph.contains(&Triple::typed(":db", "d3f:DatabaseServer")));
        assert!(graph.contains(&Triple::named(":app", "d3f:accesses", ":db")));
    }

    #[test]
    fn test_skipped_lines_are_reported() {
        let input = "graph TD\n%% comment\nsubgraph Backend\n  A --> B\nend\n  A[unclosed --> B";
        let (graph, report) = translate(input);
        assert_eq!(report.lines_parsed, 1);
        let reasons: Vec<_> = report.skipped.iter().map(|s| (s.line, &s.reason)).collect();
        assert_eq!(reasons[0], (2, &SkipReason::Comment));
        assert_eq!(reasons[1], (3, &SkipReason::Directive("subgraph".to_string())));
        assert_eq!(reasons[2], (5, &SkipReason::TooShort));
        assert!(matches!(reasons[3], (6, SkipReason::Grammar(_))));
        assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
    }

    #[test]
    fn test_unsupported_arrow_is_fatal() {
        let mut graph = Graph::new();
        let err = FlowchartParser::new()
            .parse("graph LR\n  A -.-x B", &mut graph)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TranslateError>(),
            Some(TranslateError::UnsupportedArrow { line: 2, .. })
        ));
    }

    #[test]
    fn test_reparse_adds_nothing() {
        let mut graph = Graph::new();
        let parser = FlowchartParser::new();
        let input = "graph LR\n  A[nginx] -->|d3f:authenticates| B";
        let first = parser.parse(input, &mut graph).unwrap();
        let second = parser.parse(input, &mut graph).unwrap();
        assert!(first.triples_added > 0);
        assert_eq!(second.triples_added, 0);
    }
}
