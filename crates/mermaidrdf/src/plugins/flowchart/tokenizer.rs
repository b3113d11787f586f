//! Line tokenizer
//!
//! Splits one diagram statement into `(node, arrow, annotation)` groups. The
//! scanner only looks for arrows outside node brackets and quotes, so labels
//! such as `A[a --> b]` stay intact.

use chumsky::Parser as _;
use tracing::trace;

use crate::core::chumsky_utils::mermaid_comment;
use crate::core::SkipReason;

/// Statements shorter than this are ignored.
pub const MIN_STATEMENT_LEN: usize = 5;

/// Keywords whose statements are structural, not node chains.
pub const DIRECTIVES: &[&str] = &[
    "subgraph",
    "end",
    "classDef",
    "class",
    "style",
    "linkStyle",
    "click",
    "direction",
];

/// One node of a chain with the arrow and annotation that follow it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub node: &'a str,
    pub arrow: Option<&'a str>,
    pub annotation: Option<&'a str>,
}

/// Split a physical line into `;`-separated statements, ignoring `;` inside brackets and quotes
pub fn split_statements(line: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth = depth.saturating_sub(1),
            ';' if depth == 0 && !in_quotes => {
                statements.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    statements.push(&line[start..]);
    statements
}

/// Tokenize a statement into segments
///
/// The last segment never has an arrow. Blank, short, comment and directive
/// statements are rejected with the matching [`SkipReason`].
pub fn tokenize(statement: &str) -> Result<Vec<Segment<'_>>, SkipReason> {
    let statement = statement.trim();
    if statement.is_empty() {
        return Err(SkipReason::Blank);
    }
    if mermaid_comment().parse(statement).into_result().is_ok() {
        return Err(SkipReason::Comment);
    }
    if statement.chars().count() < MIN_STATEMENT_LEN {
        return Err(SkipReason::TooShort);
    }
    if let Some(keyword) = leading_directive(statement) {
        return Err(SkipReason::Directive(keyword.to_string()));
    }

    let flat = split_arrows(statement);
    trace!(?flat, "Split statement on arrows");
    let segments = group(flat);

    if let Some(empty) = segments.iter().position(|s| s.node.is_empty()) {
        let detail = if empty == 0 {
            "missing node before arrow"
        } else {
            "missing node after arrow"
        };
        return Err(SkipReason::Grammar(detail.to_string()));
    }
    Ok(segments)
}

/// Directive keyword the statement starts with, as a whole word
fn leading_directive(statement: &str) -> Option<&'static str> {
    let end = statement
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(statement.len());
    let first = &statement[..end];
    DIRECTIVES.iter().copied().find(|keyword| *keyword == first)
}

/// Flat `node, arrow, annotation, node, ...` list, like a regex split with two groups
fn split_arrows(statement: &str) -> Vec<Option<&str>> {
    let mut flat = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut node_start = 0;
    let mut idx = 0;

    while idx < statement.len() {
        let rest = &statement[idx..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c == '-' && depth == 0 && !in_quotes {
            if let Some(len) = arrow_len(rest) {
                flat.push(Some(statement[node_start..idx].trim()));
                flat.push(Some(&rest[..len]));

                let (annotation, consumed) = annotation_after(&rest[len..]);
                flat.push(annotation);

                idx += len + consumed;
                node_start = idx;
                continue;
            }
        }

        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth = depth.saturating_sub(1),
            _ => {}
        }
        idx += c.len_utf8();
    }

    flat.push(Some(statement[node_start..].trim()));
    flat
}

/// Length of the arrow at the start of `text`: `-->`, `--o`, or `-[.-]+-[>ox]?`
fn arrow_len(text: &str) -> Option<usize> {
    if text.starts_with("-->") || text.starts_with("--o") {
        return Some(3);
    }

    let run = text
        .find(|c: char| c != '-' && c != '.')
        .unwrap_or(text.len());
    let body = &text[..run];
    // Longest prefix ending in '-' with at least one character in between
    let end = body.rfind('-')? + 1;
    if end < 3 {
        return None;
    }
    let head = text[end..].chars().next();
    match head {
        Some('>' | 'o' | 'x') if end == run => Some(end + 1),
        _ => Some(end),
    }
}

/// Optional `|annotation|` after an arrow, with surrounding whitespace
///
/// Returns the trimmed annotation (`None` when absent or blank) and the number
/// of bytes consumed. An opening pipe without a closing one is left in place.
fn annotation_after(text: &str) -> (Option<&str>, usize) {
    let after_ws = text.trim_start();
    let leading = text.len() - after_ws.len();

    let Some(body) = after_ws.strip_prefix('|') else {
        return (None, leading);
    };
    let Some(close) = annotation_close(body) else {
        return (None, leading);
    };

    let annotation = body[..close].trim();
    let tail = &body[close + 1..];
    let trailing = tail.len() - tail.trim_start().len();
    let consumed = leading + 1 + close + 1 + trailing;
    ((!annotation.is_empty()).then_some(annotation), consumed)
}

/// Closing pipe of an annotation: the last pipe before the next arrow
///
/// Pipes inside brackets or quotes belong to the target node.
fn annotation_close(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut close = None;

    for (idx, c) in body.char_indices() {
        if depth == 0 && !in_quotes {
            if c == '-' && arrow_len(&body[idx..]).is_some() {
                break;
            }
            if c == '|' {
                close = Some(idx);
            }
        }
        match c {
            '"' => in_quotes = !in_quotes,
            '[' | '(' | '{' if !in_quotes => depth += 1,
            ']' | ')' | '}' if !in_quotes => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    close
}

/// Pad the flat list to a multiple of three and group it
fn group(mut flat: Vec<Option<&str>>) -> Vec<Segment<'_>> {
    let rem = flat.len() % 3;
    if rem != 0 {
        flat.resize(flat.len() + 3 - rem, None);
    }
    flat.chunks(3)
        .map(|chunk| Segment {
            node: chunk[0].unwrap_or_default(),
            arrow: chunk[1],
            annotation: chunk[2],
        })
        .collect()
}
