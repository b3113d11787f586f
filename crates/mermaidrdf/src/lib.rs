//! mermaidrdf - Mermaid architecture diagrams as D3FEND triples, and back
//!
//! Translates Mermaid flowcharts into RDF triples typed with the D3FEND
//! security ontology, and renders triple graphs (for example produced from
//! Kubernetes manifests) back into flowcharts.
//!
//! # Quick Start
//!
//! ```rust
//! use mermaidrdf::translate;
//!
//! let graph = translate("graph LR\n  web[nginx] --> db[(mysql)]").unwrap();
//! let turtle = graph.to_turtle();
//! assert!(turtle.contains(":web a d3f:WebServer ."));
//! assert!(turtle.contains(":web d3f:accesses :db ."));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use mermaidrdf::prelude::*;
//!
//! let parser = FlowchartParser::new();
//! let mut graph = Graph::new();
//! let report = parser.parse("graph TD\n  A -->|d3f:reads| B", &mut graph).unwrap();
//! assert_eq!(report.lines_parsed, 1);
//! assert!(graph.contains(&Triple::named(":A", "d3f:reads", ":B")));
//!
//! let renderer = FlowchartRenderer::with_config(RenderConfig::new(Direction::TopDown));
//! let diagram = renderer.render(&graph).unwrap();
//! assert!(diagram.starts_with("graph TD"));
//! ```

pub mod core;
pub mod ontology;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use plugins::orchestrator::extract_diagrams;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ArrowKind, Direction, Graph, NodeShape, ParseReport, Parser, RenderConfig, Renderer,
        SkipReason, Term, TranslateError, Triple, TripleStore,
    };
    pub use crate::ontology::{OntologyTables, ResourceKind};
    pub use crate::plugins::flowchart::{FlowchartParser, FlowchartRenderer};
    pub use crate::plugins::orchestrator::Orchestrator;
}

/// Translate a diagram, or a Markdown document embedding diagrams, into a graph
///
/// Uses the built-in D3FEND tables. Malformed lines are skipped; a missing
/// header fails the whole document.
///
/// # Example
/// ```rust
/// use mermaidrdf::{translate, Triple, TripleStore};
///
/// let graph = translate("graph LR\n  A --> B --> C").unwrap();
/// assert_eq!(graph.len(), 5);
/// assert!(graph.contains(&Triple::named(":B", "d3f:accesses", ":C")));
/// ```
pub fn translate(diagram: &str) -> anyhow::Result<Graph> {
    use crate::plugins::orchestrator::Orchestrator;

    let (graph, _) = Orchestrator::new().translate(diagram)?;
    Ok(graph)
}

/// Translate into an existing graph, returning what was parsed and skipped
///
/// # Example
/// ```rust
/// use mermaidrdf::{translate_into, Graph};
///
/// let mut graph = Graph::new();
/// let first = translate_into("graph LR\n  A --> B", &mut graph).unwrap();
/// let again = translate_into("graph LR\n  A --> B", &mut graph).unwrap();
/// assert_eq!(first.triples_added, 3);
/// assert_eq!(again.triples_added, 0);
/// ```
pub fn translate_into(diagram: &str, graph: &mut Graph) -> anyhow::Result<ParseReport> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::new().translate_into(diagram, graph)
}

/// Render a graph as a flowchart with the default configuration
///
/// # Example
/// ```rust
/// use mermaidrdf::{render, Graph, Triple};
///
/// let graph: Graph = [
///     Triple::typed(":A", "d3f:DatabaseServer"),
///     Triple::named(":A", "d3f:accesses", ":B"),
/// ]
/// .into_iter()
/// .collect();
/// let diagram = render(&graph).unwrap();
/// assert!(diagram.contains("A --> |accesses| B"));
/// ```
pub fn render(graph: &Graph) -> anyhow::Result<String> {
    use crate::core::Renderer as _;
    use crate::plugins::flowchart::FlowchartRenderer;

    FlowchartRenderer::new().render(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_flowchart() {
        let graph = translate("graph TD\n    A --> B").unwrap();
        assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
    }

    #[test]
    fn test_translate_requires_header() {
        assert!(translate("A --> B").is_err());
    }

    #[test]
    fn test_translate_markdown() {
        let doc = "# Architecture\n\n```mermaid\ngraph LR\n  A --o B\n```\n";
        let graph = translate(doc).unwrap();
        assert!(graph.contains(&Triple::named(":A", "d3f:reads", ":B")));
    }

    #[test]
    fn test_render_empty_graph() {
        assert_eq!(render(&Graph::new()).unwrap(), "graph LR\n");
    }
}
