//! Node classifier
//!
//! Turns a parsed node into its base triples: generic typing, shape-implied
//! class, label, keyword-inferred classes and artifacts, and `d3f:` classes
//! written inline in the label. Classification is additive; no match is not an
//! error.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::trace;

use super::chumsky_parser::NodeRef;
use crate::core::vocab::{d3f, NODE, RDFS_LABEL};
use crate::core::Triple;
use crate::ontology::OntologyTables;

/// Inline class reference such as `d3f:WebServer`
static INLINE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"d3f:[A-Z][A-Za-z0-9._-]*").expect("inline class pattern is valid")
});

/// Diagram-local name for a node id
pub fn local_term(id: &str) -> String {
    format!(":{}", id)
}

pub struct NodeClassifier {
    tables: Arc<OntologyTables>,
}

impl NodeClassifier {
    pub fn new(tables: Arc<OntologyTables>) -> Self {
        Self { tables }
    }

    /// Canonical subject and base triples for `node`
    pub fn classify(&self, node: &NodeRef) -> (String, Vec<Triple>) {
        let subject = local_term(&node.id);
        let mut triples = vec![Triple::typed(&subject, NODE)];

        if let Some(class) = node.shape.and_then(|shape| shape.implied_class()) {
            triples.push(Triple::typed(&subject, class));
        }
        if let Some(label) = &node.label {
            triples.push(Triple::with_literal(&subject, RDFS_LABEL, label));
        }

        let text = node.match_text();
        for class in self.tables.classes_for(text) {
            triples.push(Triple::typed(&subject, class));
        }
        for artifact in self.tables.artifacts_for(text) {
            triples.push(Triple::named(&subject, d3f::RELATED, artifact));
        }

        if let Some(label) = &node.label {
            for found in INLINE_CLASS.find_iter(label) {
                let class = found.as_str().trim_end_matches('.');
                triples.push(Triple::typed(&subject, class));
            }
        }

        trace!(subject = %subject, triple_count = triples.len(), "Classified node");
        (subject, triples)
    }
}
