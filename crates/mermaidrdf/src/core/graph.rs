//! Triple model and the store seam
//!
//! The translator only needs a set of `(subject, predicate, object)` tuples with
//! union and simple pattern iteration. [`TripleStore`] captures that contract so a
//! full RDF engine can stand behind it; [`Graph`] is the in-memory implementation
//! used by the pipeline and the tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

use super::vocab::{PREFIXES, RDF_TYPE};
use super::TranslateError;

/// A node or value in a triple
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Term {
    /// Prefixed name (`:A`, `d3f:Email`) or bracketed IRI (`<urn:k8s:ns>`)
    Named(String),
    /// Plain string literal
    Literal(String),
}

impl Term {
    pub fn named(name: impl Into<String>) -> Self {
        Term::Named(name.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(value.into())
    }

    /// Name of a named term, `None` for literals
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Term::Named(name) => Some(name),
            Term::Literal(_) => None,
        }
    }

    /// Raw text of the term regardless of its kind
    pub fn as_str(&self) -> &str {
        match self {
            Term::Named(s) | Term::Literal(s) => s,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Named(name) => write!(f, "{}", name),
            Term::Literal(value) => write!(f, "\"\"\"{}\"\"\"", escape_literal(value)),
        }
    }
}

/// A subject–predicate–object statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Triple between three named terms
    pub fn named(subject: &str, predicate: &str, object: &str) -> Self {
        Self::new(
            Term::named(subject),
            Term::named(predicate),
            Term::named(object),
        )
    }

    /// Triple whose object is a literal
    pub fn with_literal(subject: &str, predicate: &str, value: &str) -> Self {
        Self::new(
            Term::named(subject),
            Term::named(predicate),
            Term::literal(value),
        )
    }

    /// `subject rdf:type class`
    pub fn typed(subject: &str, class: &str) -> Self {
        Self::named(subject, RDF_TYPE, class)
    }

    pub fn is_type_assertion(&self) -> bool {
        self.predicate.as_str() == RDF_TYPE
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let predicate = if self.is_type_assertion() {
            "a"
        } else {
            self.predicate.as_str()
        };
        write!(f, "{} {} {} .", self.subject, predicate, self.object)
    }
}

/// Storage contract for triple sets
///
/// Inserts have set semantics: adding a triple twice is harmless.
pub trait TripleStore {
    /// Insert a triple, returning true if it was not present yet
    fn insert(&mut self, triple: Triple) -> bool;

    /// Check whether a triple is present
    fn contains(&self, triple: &Triple) -> bool;

    /// Iterate over all triples
    fn triples(&self) -> impl Iterator<Item = &Triple>;

    /// Remove every triple
    fn clear(&mut self);

    /// Number of distinct triples
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert many triples, returning how many were new
    fn insert_all<I: IntoIterator<Item = Triple>>(&mut self, triples: I) -> usize {
        triples
            .into_iter()
            .map(|triple| self.insert(triple))
            .filter(|added| *added)
            .count()
    }

    /// All triples with the given predicate
    fn triples_with_predicate<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Triple> {
        self.triples()
            .filter(move |triple| triple.predicate.as_str() == predicate)
    }

    /// All triples about `subject`
    fn triples_about<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Triple> {
        self.triples()
            .filter(move |triple| triple.subject.as_named() == Some(subject))
    }

    /// Objects of `(subject, predicate, ?)`
    fn objects<'a>(&'a self, subject: &'a str, predicate: &'a str) -> impl Iterator<Item = &'a Term> {
        self.triples_about(subject)
            .filter(move |triple| triple.predicate.as_str() == predicate)
            .map(|triple| &triple.object)
    }
}

/// In-memory triple set with deterministic iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    triples: BTreeSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another graph into this one
    pub fn union(&mut self, other: &Graph) -> usize {
        self.insert_all(other.triples.iter().cloned())
    }

    /// Serialize as Turtle: prefix declarations, then one statement per line
    pub fn to_turtle(&self) -> String {
        let mut out = String::new();
        for (prefix, iri) in PREFIXES {
            out.push_str(&format!("@prefix {}: <{}> .\n", prefix, iri));
        }
        out.push('\n');
        for triple in &self.triples {
            out.push_str(&triple.to_string());
            out.push('\n');
        }
        out
    }

    /// Read the line-oriented Turtle subset written by [`Graph::to_turtle`]
    ///
    /// Every statement must fit on one line. `@prefix`, `#` comments and blank
    /// lines are ignored.
    pub fn parse_statements(text: &str) -> Result<Self, TranslateError> {
        let mut graph = Graph::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("@prefix") {
                continue;
            }
            let triple = parse_statement(line)
                .map_err(|message| TranslateError::graph_syntax(line_no, message))?;
            trace!(line = line_no, %triple, "Read statement");
            graph.insert(triple);
        }
        debug!(triple_count = graph.len(), "Parsed graph statements");
        Ok(graph)
    }
}

impl TripleStore for Graph {
    fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    fn clear(&mut self) {
        self.triples.clear();
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

fn parse_statement(line: &str) -> Result<Triple, String> {
    let body = line
        .strip_suffix('.')
        .ok_or_else(|| format!("statement must end with '.': {}", line))?
        .trim_end();

    let (subject, rest) = split_term(body).ok_or("missing subject")?;
    let (predicate, object) = split_term(rest.trim_start()).ok_or("missing predicate")?;
    let object = object.trim();
    if object.is_empty() {
        return Err("missing object".to_string());
    }

    let predicate = if predicate == "a" { RDF_TYPE } else { predicate };
    let object = parse_object(object)?;
    Ok(Triple::new(Term::named(subject), Term::named(predicate), object))
}

fn split_term(text: &str) -> Option<(&str, &str)> {
    let end = text.find(char::is_whitespace)?;
    Some((&text[..end], &text[end..]))
}

fn parse_object(text: &str) -> Result<Term, String> {
    if let Some(inner) = text
        .strip_prefix("\"\"\"")
        .and_then(|s| s.strip_suffix("\"\"\""))
    {
        return unescape_literal(inner).map(Term::literal);
    }
    if let Some(inner) = text.strip_prefix('"') {
        let inner = inner
            .strip_suffix('"')
            .ok_or_else(|| format!("unterminated literal: {}", text))?;
        return unescape_literal(inner).map(Term::literal);
    }
    if text.contains(char::is_whitespace) {
        return Err(format!("unexpected tokens in object: {}", text));
    }
    Ok(Term::named(text))
}

/// Turtle string escapes for `\\`, `"` and line breaks
fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_literal(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => return Err(format!("unknown escape '\\{}' in literal", other)),
            None => return Err("literal ends with a lone '\\'".to_string()),
        }
    }
    Ok(out)
}
