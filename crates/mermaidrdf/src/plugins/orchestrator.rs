//! Pipeline orchestrator
//!
//! Wires the flowchart translator and renderer to shared ontology tables and
//! handles Markdown documents that embed several diagrams:
//! Markdown → diagrams → Translator → Graph → Renderer

use anyhow::Result;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, span, warn, Level};

use crate::core::{Graph, ParseReport, Parser, RenderConfig, Renderer, TripleStore};
use crate::ontology::OntologyTables;
use crate::plugins::flowchart::{FlowchartParser, FlowchartRenderer};

/// Opening fence of an embedded diagram
pub const MERMAID_FENCE: &str = "```mermaid";

static MERMAID_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid\r?\n(.*?)\r?\n```").expect("mermaid fence pattern is valid")
});

/// Trimmed bodies of all ```` ```mermaid ```` blocks, in document order
///
/// # Example
/// ```
/// use mermaidrdf::plugins::orchestrator::extract_diagrams;
///
/// let doc = "# Design\n\n```mermaid\ngraph LR\n  A --> B\n```\n";
/// assert_eq!(extract_diagrams(doc), vec!["graph LR\n  A --> B"]);
/// ```
pub fn extract_diagrams(text: &str) -> Vec<String> {
    MERMAID_BLOCK
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|body| body.as_str().trim().to_string())
        .collect()
}

/// True if the text embeds fenced diagrams rather than being one
pub fn is_markdown(text: &str) -> bool {
    text.contains(MERMAID_FENCE)
}

/// Coordinates translation and rendering with one set of ontology tables
pub struct Orchestrator {
    tables: Arc<OntologyTables>,
    parser: FlowchartParser,
    renderer: FlowchartRenderer,
}

impl Orchestrator {
    /// Orchestrator with the built-in D3FEND tables and default rendering
    pub fn new() -> Self {
        Self::with_tables(OntologyTables::shared())
    }

    /// Orchestrator using substituted ontology tables
    pub fn with_tables(tables: Arc<OntologyTables>) -> Self {
        Self {
            parser: FlowchartParser::with_tables(Arc::clone(&tables)),
            renderer: FlowchartRenderer::new(),
            tables,
        }
    }

    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.renderer = FlowchartRenderer::with_config(config);
        self
    }

    pub fn tables(&self) -> &OntologyTables {
        &self.tables
    }

    pub fn render_config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    /// Translate a diagram or Markdown document into a fresh graph
    pub fn translate(&self, input: &str) -> Result<(Graph, ParseReport)> {
        let mut graph = Graph::new();
        let report = self.translate_into(input, &mut graph)?;
        Ok((graph, report))
    }

    /// Translate a diagram or Markdown document, unioning into `graph`
    ///
    /// Line numbers in the report are relative to each diagram.
    pub fn translate_into(&self, input: &str, graph: &mut Graph) -> Result<ParseReport> {
        let translate_span = span!(Level::INFO, "translate", input_len = input.len());
        let _enter = translate_span.enter();

        let diagrams = if is_markdown(input) {
            let diagrams = extract_diagrams(input);
            debug!(diagram_count = diagrams.len(), "Extracted diagrams from Markdown");
            if diagrams.is_empty() {
                warn!("Markdown fence found but no complete diagram block");
            }
            diagrams
        } else {
            vec![input.to_string()]
        };

        let mut report = ParseReport::default();
        for (index, diagram) in diagrams.iter().enumerate() {
            let diagram_span = span!(Level::DEBUG, "pipeline_diagram", index);
            let _diagram_enter = diagram_span.enter();
            report.merge(self.parser.parse(diagram, graph)?);
        }

        info!(
            triples = graph.len(),
            triples_added = report.triples_added,
            skipped = report.skipped.len(),
            "Translation completed"
        );
        Ok(report)
    }

    /// Render a graph as diagram text
    pub fn render(&self, graph: &Graph) -> Result<String> {
        self.renderer.render(graph)
    }

    /// Translate then render, normalizing a diagram through its triples
    pub fn process(&self, input: &str) -> Result<String> {
        let process_span = span!(Level::INFO, "process_diagram", input_len = input.len());
        let _enter = process_span.enter();

        let (graph, _) = self.translate(input)?;
        let output = self.render(&graph)?;
        info!(output_len = output.len(), "Pipeline completed successfully");
        Ok(output)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
