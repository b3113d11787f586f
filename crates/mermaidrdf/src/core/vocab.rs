//! Vocabulary constants shared by the translator and the renderer.
//!
//! Terms are kept in prefixed form (`d3f:accesses`, `:Node`). The prefix table
//! below is what [`crate::core::Graph::to_turtle`] declares.

/// Prefix declarations written in front of every serialized graph.
pub const PREFIXES: &[(&str, &str)] = &[
    ("", "https://par-tec.it/example#"),
    ("d3f", "http://d3fend.mitre.org/ontologies/d3fend.owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("k8s", "urn:k8s:"),
];

/// Prefix of D3FEND ontology terms.
pub const D3F_PREFIX: &str = "d3f:";

pub const RDF_TYPE: &str = "rdf:type";
pub const RDFS_LABEL: &str = "rdfs:label";

/// Generic type of every diagram-local node.
pub const NODE: &str = ":Node";
/// Fallback relation for plain lines (`---`, `-.-`).
pub const CONNECTED: &str = ":connected";

pub mod d3f {
    pub const ACCESSES: &str = "d3f:accesses";
    pub const READS: &str = "d3f:reads";
    pub const PRODUCES: &str = "d3f:produces";
    pub const USES: &str = "d3f:uses";
    pub const RELATED: &str = "d3f:related";
    pub const AUTHENTICATES: &str = "d3f:authenticates";

    pub const DATABASE_SERVER: &str = "d3f:DatabaseServer";
    pub const SERVER: &str = "d3f:Server";
    pub const LOGIN_SESSION: &str = "d3f:LoginSession";
    pub const AUTHENTICATION_LOG: &str = "d3f:AuthenticationLog";
}

/// Containment relation produced by the manifest mapper.
pub const HAS_CHILD: &str = "hasChild";

/// Relations the renderer draws as edges, by local name.
pub const EDGE_PREDICATES: &[&str] = &["executes", "exposes", "accesses"];

/// Local part of a prefixed name or IRI: whatever follows the last `#`, `/` or `:`.
pub fn local_name(term: &str) -> &str {
    let term = term.trim_start_matches('<').trim_end_matches('>');
    term.rsplit(['#', '/', ':']).next().unwrap_or(term)
}

/// True when `term` is a D3FEND term.
pub fn is_d3f(term: &str) -> bool {
    term.starts_with(D3F_PREFIX)
}
