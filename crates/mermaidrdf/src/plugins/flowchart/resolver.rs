//! Relation resolver
//!
//! Decides the triples of one edge from its arrow kind and optional
//! annotation. Rules are tried in order and the first one that applies wins:
//!
//! 1. no annotation: the arrow's default predicate
//! 2. a whitelisted `d3f:` predicate: that predicate plus its implied triples
//! 3. otherwise the default predicate, plus
//!    - the first `d3f:` artifact token: `src produces X`, `dst uses X`, or
//!    - the first font-icon token: the same pair for every class of every
//!      artifact group listing the icon
//!
//! Only the first artifact token of an annotation is used.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace};

use crate::core::vocab::d3f;
use crate::core::{ArrowKind, Triple};
use crate::ontology::OntologyTables;

static ARTIFACT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"d3f:[A-Za-z0-9._-]+").expect("artifact pattern is valid"));

static ICON_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"fab?:(fa-[a-z0-9-]+)").expect("icon pattern is valid"));

pub struct RelationResolver {
    tables: Arc<OntologyTables>,
}

impl RelationResolver {
    pub fn new(tables: Arc<OntologyTables>) -> Self {
        Self { tables }
    }

    /// Triples for the edge `src -> dst`
    pub fn resolve(
        &self,
        src: &str,
        dst: &str,
        arrow: ArrowKind,
        annotation: Option<&str>,
    ) -> Vec<Triple> {
        let default = Triple::named(src, arrow.default_predicate(), dst);

        let Some(annotation) = annotation else {
            return vec![default];
        };

        if self.tables.is_predicate(annotation) {
            debug!(src, dst, predicate = annotation, "Direct ontology relation");
            let mut triples = vec![Triple::named(src, annotation, dst)];
            triples.extend(
                self.tables
                    .implied(annotation)
                    .iter()
                    .map(|template| template.instantiate(src, dst)),
            );
            return triples;
        }

        let mut triples = vec![default];

        if let Some(artifact) = ARTIFACT_TOKEN.find(annotation) {
            trace!(src, dst, artifact = artifact.as_str(), "Artifact in annotation");
            triples.extend(exchange(src, dst, artifact.as_str()));
            return triples;
        }

        if let Some(icon) = ICON_TOKEN.captures(annotation).and_then(|c| c.get(1)) {
            trace!(src, dst, icon = icon.as_str(), "Icon in annotation");
            for group in self.tables.artifact_groups_for(icon.as_str()) {
                for class in &group.classes {
                    triples.extend(exchange(src, dst, class));
                }
            }
        }

        triples
    }
}

/// `src produces artifact` and `dst uses artifact`
fn exchange(src: &str, dst: &str, artifact: &str) -> [Triple; 2] {
    [
        Triple::named(src, d3f::PRODUCES, artifact),
        Triple::named(dst, d3f::USES, artifact),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(arrow: ArrowKind, annotation: Option<&str>) -> Vec<String> {
        RelationResolver::new(OntologyTables::shared())
            .resolve(":A", ":B", arrow, annotation)
            .iter()
            .map(Triple::to_string)
            .collect()
    }

    #[test]
    fn test_default_predicates() {
        assert_eq!(resolve(ArrowKind::Solid, None), vec![":A d3f:accesses :B ."]);
        assert_eq!(resolve(ArrowKind::Circle, None), vec![":A d3f:reads :B ."]);
        assert_eq!(resolve(ArrowKind::Open, None), vec![":A :connected :B ."]);
    }

    #[test]
    fn test_whitelisted_predicate_replaces_default() {
        assert_eq!(
            resolve(ArrowKind::Solid, Some("d3f:reads")),
            vec![":A d3f:reads :B ."]
        );
    }

    #[test]
    fn test_authenticates_expansion() {
        assert_eq!(
            resolve(ArrowKind::Solid, Some("d3f:authenticates")),
            vec![
                ":A d3f:authenticates :B .",
                ":A d3f:produces d3f:LoginSession .",
                ":B d3f:uses d3f:LoginSession .",
                ":A d3f:produces d3f:AuthenticationLog .",
            ]
        );
    }

    #[test]
    fn test_unknown_predicate_falls_through_to_artifact() {
        assert_eq!(
            resolve(ArrowKind::Solid, Some("d3f:teleports")),
            vec![
                ":A d3f:accesses :B .",
                ":A d3f:produces d3f:teleports .",
                ":B d3f:uses d3f:teleports .",
            ]
        );
    }

    #[test]
    fn test_only_first_artifact_is_used() {
        assert_eq!(
            resolve(ArrowKind::Solid, Some("via d3f:DatabaseQuery and d3f:Email")),
            vec![
                ":A d3f:accesses :B .",
                ":A d3f:produces d3f:DatabaseQuery .",
                ":B d3f:uses d3f:DatabaseQuery .",
            ]
        );
    }

    #[test]
    fn test_icon_annotation() {
        assert_eq!(
            resolve(ArrowKind::Solid, Some("via fa:fa-envelope")),
            vec![
                ":A d3f:accesses :B .",
                ":A d3f:produces d3f:Email .",
                ":B d3f:uses d3f:Email .",
            ]
        );
    }

    #[test]
    fn test_only_first_icon_is_used() {
        let triples = resolve(ArrowKind::Solid, Some("fa:fa-clock fa:fa-envelope"));
        assert!(triples.contains(&":A d3f:produces d3f:TaskSchedule .".to_string()));
        assert!(!triples.contains(&":A d3f:produces d3f:Email .".to_string()));
    }

    #[test]
    fn test_unmatched_annotation_keeps_default() {
        assert_eq!(
            resolve(ArrowKind::Circle, Some("nightly backup")),
            vec![":A d3f:reads :B ."]
        );
        assert_eq!(
            resolve(ArrowKind::Solid, Some("fa:fa-unknown")),
            vec![":A d3f:accesses :B ."]
        );
    }
}
