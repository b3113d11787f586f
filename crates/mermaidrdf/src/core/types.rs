//! Core data types shared by the translator and the renderer

use std::fmt;
use std::str::FromStr;

use super::vocab::{d3f, CONNECTED};
use super::TranslateError;

/// Node shapes recognized in diagram text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Rounded rectangle: `A(label)`
    RoundedRect,
    /// Diamond: `A{label}`
    Diamond,
    /// Circle: `A((label))`
    Circle,
    /// Hexagon: `A{{label}}`
    Hexagon,
    /// Subroutine: `A[[label]]`
    Subroutine,
    /// Cylinder (database): `A[(label)]`
    Cylinder,
    /// Parallelogram: `A[/label/]`
    Parallelogram,
}

impl NodeShape {
    /// All shapes, two-character delimiters first
    pub const ALL: [NodeShape; 8] = [
        NodeShape::Hexagon,
        NodeShape::Cylinder,
        NodeShape::Subroutine,
        NodeShape::Circle,
        NodeShape::Parallelogram,
        NodeShape::Rectangle,
        NodeShape::RoundedRect,
        NodeShape::Diamond,
    ];

    /// Opening and closing delimiters
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::RoundedRect => ("(", ")"),
            NodeShape::Diamond => ("{", "}"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::Hexagon => ("{{", "}}"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Cylinder => ("[(", ")]"),
            NodeShape::Parallelogram => ("[/", "/]"),
        }
    }

    /// Ontology class implied by the shape alone
    pub fn implied_class(&self) -> Option<&'static str> {
        match self {
            NodeShape::Cylinder => Some(d3f::DATABASE_SERVER),
            NodeShape::Subroutine => Some(d3f::SERVER),
            _ => None,
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Rectangle => write!(f, "rectangle"),
            NodeShape::RoundedRect => write!(f, "rounded"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Circle => write!(f, "circle"),
            NodeShape::Hexagon => write!(f, "hexagon"),
            NodeShape::Subroutine => write!(f, "subroutine"),
            NodeShape::Cylinder => write!(f, "cylinder"),
            NodeShape::Parallelogram => write!(f, "parallelogram"),
        }
    }
}

/// Arrow kinds, each mapped to a default relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    /// Ends in `->`: `-->`, `-.->`, `---->`
    Solid,
    /// Ends in `-o`: `--o`, `-.-o`
    Circle,
    /// Ends in `-` without a head: `---`, `-.-`
    Open,
}

impl ArrowKind {
    /// Classify an arrow token by its suffix
    ///
    /// A token without a recognized suffix (`-.-x`) is rejected: the tokenizer
    /// accepted it, so the grammar and the relation table disagree.
    pub fn from_token(token: &str, line: usize) -> Result<Self, TranslateError> {
        if token.ends_with("->") {
            Ok(ArrowKind::Solid)
        } else if token.ends_with("-o") {
            Ok(ArrowKind::Circle)
        } else if token.ends_with('-') {
            Ok(ArrowKind::Open)
        } else {
            Err(TranslateError::unsupported_arrow(token, line))
        }
    }

    /// Predicate used when an edge carries no annotation
    pub fn default_predicate(&self) -> &'static str {
        match self {
            ArrowKind::Solid => d3f::ACCESSES,
            ArrowKind::Circle => d3f::READS,
            ArrowKind::Open => CONNECTED,
        }
    }
}

impl fmt::Display for ArrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrowKind::Solid => write!(f, "-->"),
            ArrowKind::Circle => write!(f, "--o"),
            ArrowKind::Open => write!(f, "---"),
        }
    }
}

/// Flow direction written in the diagram header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Top to bottom (TD or TB)
    TopDown,
    /// Left to right (LR)
    #[default]
    LeftRight,
    /// Right to left (RL)
    RightLeft,
    /// Bottom to top (BT)
    BottomUp,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TopDown),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "BT" => Ok(Direction::BottomUp),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Direction written in the `graph` header
    pub direction: Direction,
    /// Label width after which a `<br>` is inserted
    pub wrap_width: usize,
}

impl RenderConfig {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            direction: Direction::LeftRight,
            wrap_width: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_kind_from_token() {
        assert_eq!(ArrowKind::from_token("-->", 1).unwrap(), ArrowKind::Solid);
        assert_eq!(ArrowKind::from_token("-.->", 1).unwrap(), ArrowKind::Solid);
        assert_eq!(ArrowKind::from_token("--o", 1).unwrap(), ArrowKind::Circle);
        assert_eq!(ArrowKind::from_token("-.-o", 1).unwrap(), ArrowKind::Circle);
        assert_eq!(ArrowKind::from_token("---", 1).unwrap(), ArrowKind::Open);
        assert_eq!(ArrowKind::from_token("-.-", 1).unwrap(), ArrowKind::Open);
    }

    #[test]
    fn test_arrow_kind_rejects_cross_head() {
        let err = ArrowKind::from_token("-.-x", 4).unwrap_err();
        assert!(matches!(
            err,
            TranslateError::UnsupportedArrow { ref arrow, line: 4 } if arrow == "-.-x"
        ));
    }

    #[test]
    fn test_default_predicates() {
        assert_eq!(ArrowKind::Solid.default_predicate(), "d3f:accesses");
        assert_eq!(ArrowKind::Circle.default_predicate(), "d3f:reads");
        assert_eq!(ArrowKind::Open.default_predicate(), ":connected");
    }

    #[test]
    fn test_shape_delimiters() {
        assert_eq!(NodeShape::Cylinder.delimiters(), ("[(", ")]"));
        assert_eq!(NodeShape::Subroutine.delimiters(), ("[[", "]]"));
        assert_eq!(NodeShape::Rectangle.delimiters(), ("[", "]"));
    }

    #[test]
    fn test_shape_implied_class() {
        assert_eq!(
            NodeShape::Cylinder.implied_class(),
            Some("d3f:DatabaseServer")
        );
        assert_eq!(NodeShape::Subroutine.implied_class(), Some("d3f:Server"));
        assert_eq!(NodeShape::Hexagon.implied_class(), None);
    }

    #[test]
    fn test_direction_round_trip() {
        for dir in ["TD", "LR", "RL", "BT"] {
            let parsed: Direction = dir.parse().unwrap();
            assert_eq!(parsed.to_string(), dir);
        }
        assert_eq!("tb".parse::<Direction>().unwrap(), Direction::TopDown);
        assert!("XY".parse::<Direction>().is_err());
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.direction, Direction::LeftRight);
        assert_eq!(config.wrap_width, 20);
        assert_eq!(
            RenderConfig::new(Direction::TopDown).with_wrap_width(0).wrap_width,
            0
        );
    }
}
