//! Node grammar using chumsky
//!
//! Parses the text of a single node, `id` optionally followed by a bracketed
//! label, into a [`NodeRef`].

use anyhow::Result;
use chumsky::prelude::*;

use crate::core::chumsky_utils::word;
use crate::core::NodeShape;

/// A node as written in a diagram line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: String,
    pub shape: Option<NodeShape>,
    pub label: Option<String>,
}

impl NodeRef {
    /// Text used for keyword matching: the label, or the id without one
    pub fn match_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Chumsky-based node parser
pub struct ChumskyNodeParser;

impl ChumskyNodeParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse node text such as `A`, `db[(mysql)]` or `web["Web (public)"]`
    pub fn parse_node(&self, input: &str) -> Result<NodeRef> {
        let parser = Self::node_parser().then_ignore(end());

        parser
            .parse(input)
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Invalid node '{}': {:?}", input, errors))
    }

    fn node_parser<'src>() -> impl Parser<'src, &'src str, NodeRef> + Clone {
        let node_id = word().labelled("node identifier");

        // Two-character delimiters must be tried before their one-character prefixes
        let shape = Self::shaped(NodeShape::Hexagon)
            .or(Self::shaped(NodeShape::Cylinder))
            .or(Self::shaped(NodeShape::Subroutine))
            .or(Self::shaped(NodeShape::Circle))
            .or(Self::shaped(NodeShape::Parallelogram))
            .or(Self::shaped(NodeShape::Rectangle))
            .or(Self::shaped(NodeShape::RoundedRect))
            .or(Self::shaped(NodeShape::Diamond));

        node_id
            .then(shape.or_not())
            .map(|(id, shaped): (&str, Option<(NodeShape, &str)>)| match shaped {
                Some((shape, label)) => NodeRef {
                    id: id.to_string(),
                    shape: Some(shape),
                    label: clean_label(label),
                },
                None => NodeRef {
                    id: id.to_string(),
                    shape: None,
                    label: None,
                },
            })
            .labelled("node definition")
    }

    /// `open label close`
    ///
    /// A double-quoted label may contain the closing delimiter; otherwise the
    /// label runs up to the first one.
    fn shaped<'src>(
        shape: NodeShape,
    ) -> impl Parser<'src, &'src str, (NodeShape, &'src str)> + Clone {
        let (open, close) = shape.delimiters();

        let quoted = any()
            .filter(|c: &char| *c != '"')
            .repeated()
            .to_slice()
            .delimited_by(just('"'), just('"'))
            .padded()
            .then_ignore(just(close));
        let bare = any()
            .and_is(just(close).not())
            .repeated()
            .to_slice()
            .then_ignore(just(close));

        just(open)
            .ignore_then(quoted.or(bare))
            .map(move |label| (shape, label))
    }
}

impl Default for ChumskyNodeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim, drop surrounding double quotes, and map empty labels to `None`
fn clean_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim();
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}
