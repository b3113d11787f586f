//! Graph→diagram renderer
//!
//! Rendering runs in two phases. The parse phase resolves every recognized
//! node's [`ResourceKind`], builds its label, and collects edges and the
//! containment tree. The render phase places every child under at most one
//! parent, then writes the header, standalone node declarations, edges and
//! the subgraph blocks, nested the way the children were placed.

use anyhow::Result;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, span, trace, Level};

use super::containment::{ContainmentTree, Placement};
use crate::core::vocab::{local_name, EDGE_PREDICATES, HAS_CHILD, RDFS_LABEL};
use crate::core::{compose_label, RenderConfig, Renderer, TranslateError, TripleStore};
use crate::ontology::ResourceKind;

/// Characters that would end a label early when re-parsed
const LABEL_DELIMITERS: &[char] = &['[', ']', '(', ')', '{', '}', '|'];

/// Diagram id for a term: `:A` → `A`, `<urn:k8s:ns/Pod/x>` → `urn_k8s_ns_Pod_x`
pub fn sanitize_id(term: &str) -> String {
    let term = term.strip_prefix(':').unwrap_or(term);
    term.trim_start_matches('<')
        .trim_end_matches('>')
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Label text safe to place between shape delimiters
fn quote_label(label: &str) -> String {
    let label = label.replace('"', "#quot;");
    if label.contains(LABEL_DELIMITERS) {
        format!("\"{}\"", label)
    } else {
        label
    }
}

/// A recognized node ready to be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderNode {
    id: String,
    kind: ResourceKind,
    label: String,
}

impl RenderNode {
    /// `id<open>label<close>`
    fn declaration(&self) -> String {
        let (open, close) = self.kind.profile().shape.delimiters();
        format!("{}{}{}{}", self.id, open, quote_label(&self.label), close)
    }

    fn is_standalone(&self) -> bool {
        self.kind.profile().standalone
    }
}

/// Output of the parse phase
#[derive(Debug, Default)]
struct Scene {
    nodes: BTreeMap<String, RenderNode>,
    edges: BTreeSet<String>,
    tree: ContainmentTree,
}

impl Scene {
    /// Collect nodes, edges and containment from the store
    fn parse<S: TripleStore>(store: &S, config: &RenderConfig) -> Result<Self> {
        let mut kinds: BTreeMap<&str, ResourceKind> = BTreeMap::new();
        for triple in store.triples().filter(|t| t.is_type_assertion()) {
            let (Some(subject), Some(class)) = (triple.subject.as_named(), triple.object.as_named())
            else {
                continue;
            };
            let Some(kind) = ResourceKind::from_type_term(class) else {
                continue;
            };
            kinds
                .entry(subject)
                .and_modify(|current| {
                    if rank(kind) > rank(*current) {
                        *current = kind;
                    }
                })
                .or_insert(kind);
        }

        let mut scene = Scene::default();
        for (&subject, &kind) in &kinds {
            let id = diagram_id(subject)?;

            let labels: Vec<&str> = store
                .objects(subject, RDFS_LABEL)
                .filter(|term| term.is_literal())
                .map(|term| term.as_str())
                .collect();
            let parts = [kind.icon(), local_name(subject)].into_iter().chain(labels);
            let label = compose_label(parts, config.wrap_width);
            trace!(id = %id, %kind, label = %label, "Recognized node");

            for triple in store.triples_about(subject) {
                let Some(object) = triple.object.as_named() else {
                    continue;
                };
                let predicate = local_name(triple.predicate.as_str());
                if predicate == HAS_CHILD {
                    scene.tree.add_child(id.clone(), diagram_id(object)?);
                } else if EDGE_PREDICATES.contains(&predicate) {
                    scene
                        .edges
                        .insert(format!("{} --> |{}| {}", id, predicate, diagram_id(object)?));
                }
            }

            scene.nodes.insert(id.clone(), RenderNode { id, kind, label });
        }

        debug!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            "Parsed graph for rendering"
        );
        Ok(scene)
    }

    /// Write the diagram text
    fn render(&self, config: &RenderConfig) -> String {
        let placement = self.placement();

        let mut lines = vec![format!("graph {}", config.direction)];
        lines.extend(
            self.nodes
                .values()
                .filter(|node| node.is_standalone())
                .filter(|node| !placement.is_placed(&node.id))
                .filter(|node| !placement.has_children(&node.id))
                .map(RenderNode::declaration),
        );
        lines.extend(self.edges.iter().cloned());
        for root in placement.roots() {
            self.write_subgraph(root, &placement, 0, &mut lines);
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    /// Claim each child for the first parent, in id order, that may show it
    fn placement(&self) -> Placement<'_> {
        let mut placement = Placement::new();
        for parent in self.tree.parents() {
            let kind = self.kind_of(parent);
            if !kind.profile().nests_children {
                trace!(parent, %kind, "Kind does not nest children");
                continue;
            }
            for child in self.tree.children(parent) {
                if !kind.admits_child(child) {
                    continue;
                }
                if !placement.place(parent, child) {
                    trace!(parent, child, "Child already placed or encloses parent");
                }
            }
        }
        placement
    }

    fn kind_of(&self, id: &str) -> ResourceKind {
        self.nodes.get(id).map_or(ResourceKind::Node, |node| node.kind)
    }

    /// One subgraph block, with nested blocks for children that are parents too
    fn write_subgraph(
        &self,
        parent: &str,
        placement: &Placement<'_>,
        depth: usize,
        lines: &mut Vec<String>,
    ) {
        let indent = "    ".repeat(depth);
        let label = self.nodes.get(parent).map_or(parent, |node| node.label.as_str());
        lines.push(format!("{}subgraph {}[{}]", indent, parent, quote_label(label)));
        for &child in placement.children(parent) {
            if placement.has_children(child) {
                self.write_subgraph(child, placement, depth + 1, lines);
                continue;
            }
            let line = match self.nodes.get(child) {
                Some(child_node) if child_node.is_standalone() => child_node.declaration(),
                _ => child.to_string(),
            };
            lines.push(format!("{}    {}", indent, line));
        }
        lines.push(format!("{}end", indent));
    }
}

/// Ordering key when a subject has several recognized types
fn rank(kind: ResourceKind) -> (u8, Reverse<ResourceKind>) {
    (kind.specificity(), Reverse(kind))
}

fn diagram_id(term: &str) -> Result<String, TranslateError> {
    let id = sanitize_id(term);
    if id.is_empty() {
        return Err(TranslateError::render(format!(
            "cannot derive a diagram id from '{}'",
            term
        )));
    }
    Ok(id)
}

/// Graph→diagram renderer for flowcharts
#[derive(Debug, Clone, Default)]
pub struct FlowchartRenderer {
    config: RenderConfig,
}

impl FlowchartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl<S: TripleStore> Renderer<S> for FlowchartRenderer {
    type Output = String;

    fn render(&self, store: &S) -> Result<String> {
        let render_span = span!(Level::INFO, "render_flowchart", triples = store.len());
        let _enter = render_span.enter();

        let scene = Scene::parse(store, &self.config)?;
        let output = scene.render(&self.config);

        info!(
            nodes = scene.nodes.len(),
            lines = output.lines().count(),
            "Graph rendered"
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn format(&self) -> &'static str {
        "mermaid"
    }
}
