//! Core renderer trait for diagram output
//!
//! A renderer reads a [`TripleStore`] and produces diagram text.

use anyhow::Result;

use super::TripleStore;

/// Core trait for graph renderers
///
/// # Example
/// ```
/// use mermaidrdf::core::{Graph, Renderer, Triple, TripleStore};
/// use mermaidrdf::plugins::flowchart::FlowchartRenderer;
///
/// let mut graph = Graph::new();
/// graph.insert(Triple::typed(":A", ":Node"));
///
/// let renderer = FlowchartRenderer::new();
/// let output = renderer.render(&graph).unwrap();
/// assert!(output.starts_with("graph LR"));
/// ```
pub trait Renderer<S: TripleStore>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the store into the output format
    fn render(&self, store: &S) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
