//! Ontology tables
//!
//! Keyword→class mappings, the whitelist of annotation predicates, and the
//! implied-relation rules. Tables are read-only once built and shared through
//! `Arc`, so tests can inject their own.

mod d3fend;
mod kinds;

pub use kinds::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

use crate::core::vocab::{is_d3f, D3F_PREFIX};
use crate::core::{TranslateError, Triple};

static D3FEND: LazyLock<Arc<OntologyTables>> = LazyLock::new(|| Arc::new(d3fend::tables()));

/// Keywords that, found in a text, imply a set of classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub keywords: Vec<String>,
    pub classes: Vec<String>,
}

impl KeywordGroup {
    pub fn new(keywords: &[&str], classes: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// True if any keyword occurs in `haystack`, which must already be lowercase
    fn occurs_in(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

/// Slot of an implied triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateTerm {
    /// Source of the asserted relation
    Subject,
    /// Destination of the asserted relation
    Object,
    Fixed(String),
}

impl TemplateTerm {
    pub fn fixed(term: impl Into<String>) -> Self {
        TemplateTerm::Fixed(term.into())
    }

    fn resolve<'a>(&'a self, src: &'a str, dst: &'a str) -> &'a str {
        match self {
            TemplateTerm::Subject => src,
            TemplateTerm::Object => dst,
            TemplateTerm::Fixed(term) => term,
        }
    }
}

/// A triple emitted whenever a given predicate is asserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleTemplate {
    pub subject: TemplateTerm,
    pub predicate: String,
    pub object: TemplateTerm,
}

impl TripleTemplate {
    pub fn new(subject: TemplateTerm, predicate: impl Into<String>, object: TemplateTerm) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Substitute the relation endpoints
    pub fn instantiate(&self, src: &str, dst: &str) -> Triple {
        Triple::named(
            self.subject.resolve(src, dst),
            &self.predicate,
            self.object.resolve(src, dst),
        )
    }
}

/// Read-only lookup tables consulted by the classifier, resolver and renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyTables {
    /// Label keywords implying `rdf:type` classes
    pub class_keywords: Vec<KeywordGroup>,
    /// Label and annotation keywords implying related artifacts
    pub artifact_keywords: Vec<KeywordGroup>,
    /// Bare names of predicates accepted as `d3f:` annotations
    pub predicates: BTreeSet<String>,
    /// Implied triples keyed by prefixed predicate
    pub inferred: BTreeMap<String, Vec<TripleTemplate>>,
}

impl OntologyTables {
    /// Built-in D3FEND tables
    pub fn d3fend() -> Self {
        d3fend::tables()
    }

    /// Process-wide copy of the built-in tables
    pub fn shared() -> Arc<Self> {
        Arc::clone(&D3FEND)
    }

    /// Tables with nothing in them; every lookup comes back empty
    pub fn empty() -> Self {
        Self {
            class_keywords: Vec::new(),
            artifact_keywords: Vec::new(),
            predicates: BTreeSet::new(),
            inferred: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TranslateError> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        debug!(
            class_groups = tables.class_keywords.len(),
            artifact_groups = tables.artifact_keywords.len(),
            predicates = tables.predicates.len(),
            "Loaded ontology tables"
        );
        Ok(tables)
    }

    /// Load tables from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TranslateError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading ontology tables");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TranslateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), TranslateError> {
        for group in self.class_keywords.iter().chain(&self.artifact_keywords) {
            if group.keywords.iter().any(|k| k.is_empty()) {
                return Err(TranslateError::ontology("empty keyword in keyword group"));
            }
            if group.keywords.iter().any(|k| *k != k.to_lowercase()) {
                return Err(TranslateError::ontology(format!(
                    "keywords must be lowercase: {:?}",
                    group.keywords
                )));
            }
            if let Some(class) = group.classes.iter().find(|c| !is_d3f(c)) {
                return Err(TranslateError::ontology(format!(
                    "keyword groups map to d3f: classes, found '{}'",
                    class
                )));
            }
        }
        for predicate in self.predicates.iter() {
            if predicate.contains(':') {
                return Err(TranslateError::ontology(format!(
                    "predicate whitelist takes bare names, found '{}'",
                    predicate
                )));
            }
        }
        Ok(())
    }

    /// Classes implied by keywords in `text`, over all matching groups
    pub fn classes_for(&self, text: &str) -> Vec<&str> {
        matching_classes(&self.class_keywords, text)
    }

    /// Artifacts implied by keywords in `text`, over all matching groups
    pub fn artifacts_for(&self, text: &str) -> Vec<&str> {
        matching_classes(&self.artifact_keywords, text)
    }

    /// Artifact groups listing `icon` (e.g. `fa-envelope`) as a keyword
    pub fn artifact_groups_for<'a>(&'a self, icon: &'a str) -> impl Iterator<Item = &'a KeywordGroup> {
        self.artifact_keywords
            .iter()
            .filter(move |group| group.keywords.iter().any(|k| k == icon))
    }

    /// True if `predicate` (`d3f:name`) names a whitelisted predicate
    pub fn is_predicate(&self, predicate: &str) -> bool {
        predicate
            .strip_prefix(D3F_PREFIX)
            .is_some_and(|name| self.predicates.contains(name))
    }

    /// Templates registered for `predicate`
    pub fn implied(&self, predicate: &str) -> &[TripleTemplate] {
        self.inferred
            .get(predicate)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for OntologyTables {
    fn default() -> Self {
        Self::d3fend()
    }
}

fn matching_classes<'a>(groups: &'a [KeywordGroup], text: &str) -> Vec<&'a str> {
    let haystack = text.to_lowercase();
    let mut classes: Vec<&str> = Vec::new();
    for group in groups.iter().filter(|group| group.occurs_in(&haystack)) {
        for class in &group.classes {
            if !classes.contains(&class.as_str()) {
                classes.push(class);
            }
        }
    }
    classes
}
