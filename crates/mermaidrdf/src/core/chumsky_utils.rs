//! Shared chumsky parser utilities
//!
//! Small combinators reused by the diagram node grammar.

use chumsky::prelude::*;

/// Parse a word identifier: one or more letters, digits or underscores.
///
/// Letters and digits are Unicode-aware, matching what diagram authors can type
/// as node ids.
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Parse a Mermaid-style comment (%% to end of line).
pub fn mermaid_comment<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just("%%").ignore_then(none_of('\n').repeated()).ignored()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word() {
        let parser = word().then_ignore(end());
        assert_eq!(parser.parse("web_1").into_result().ok(), Some("web_1"));
        assert_eq!(parser.parse("città").into_result().ok(), Some("città"));
        assert!(parser.parse("web-1").into_result().is_err());
        assert!(parser.parse("").into_result().is_err());
    }

    #[test]
    fn test_mermaid_comment() {
        let parser = mermaid_comment().then_ignore(end());
        assert!(parser.parse("%% this is a comment").into_result().is_ok());
        assert!(parser.parse("% not a comment").into_result().is_err());
    }
}
