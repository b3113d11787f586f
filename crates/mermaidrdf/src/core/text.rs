//! Label text helpers
//!
//! Widths are display columns, so wide glyphs count double.

use unicode_width::UnicodeWidthStr;

/// Line break used inside diagram labels.
pub const LABEL_BREAK: &str = "<br>";

/// Greedily pack words into lines of at most `max_width` columns.
///
/// A word wider than `max_width` gets a line of its own. `max_width == 0`
/// disables wrapping.
///
/// ```
/// use mermaidrdf::core::wrap_label;
///
/// assert_eq!(wrap_label("This is a long label", 10), vec!["This is a", "long label"]);
/// ```
pub fn wrap_label(label: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || label.width() <= max_width {
        return vec![label.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for word in label.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.width() + 1 + word.width() <= max_width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    lines
}

/// Join label parts into one display label.
///
/// Repeated words are dropped (first occurrence wins) and the result is wrapped
/// at `max_width` with [`LABEL_BREAK`].
///
/// ```
/// use mermaidrdf::core::compose_label;
///
/// let label = compose_label(["fa:fa-cube", "web", "web frontend"], 20);
/// assert_eq!(label, "fa:fa-cube web<br>frontend");
/// ```
pub fn compose_label<'a, I>(parts: I, max_width: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words: Vec<&str> = Vec::new();
    for word in parts.into_iter().flat_map(str::split_whitespace) {
        if !words.contains(&word) {
            words.push(word);
        }
    }
    wrap_label(&words.join(" "), max_width).join(LABEL_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_is_kept() {
        assert_eq!(wrap_label("mysql", 20), vec!["mysql"]);
        assert_eq!(wrap_label("", 10), vec![""]);
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        assert_eq!(wrap_label("Hello World", 0), vec!["Hello World"]);
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        assert_eq!(
            wrap_label("a fa:fa-network-wired b", 8),
            vec!["a", "fa:fa-network-wired", "b"]
        );
    }

    #[test]
    fn test_wide_glyphs() {
        // "日本" is 4 columns, "語テスト" is 8
        assert_eq!(wrap_label("日本 語テスト", 6), vec!["日本", "語テスト"]);
    }

    #[test]
    fn test_compose_dedups_words() {
        assert_eq!(compose_label(["mysql", "mysql"], 20), "mysql");
        assert_eq!(
            compose_label(["fa:fa-database", "db", "db mysql primary"], 20),
            "fa:fa-database db<br>mysql primary"
        );
    }

    #[test]
    fn test_compose_without_wrapping() {
        assert_eq!(
            compose_label(["a very long label that never wraps"], 0),
            "a very long label that never wraps"
        );
    }
}
