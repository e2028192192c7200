//! Small text helpers shared by the sub-extractors.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMBEDDED_MARKERS: Regex = Regex::new(r"\[0*\d+\]|【0*\d+】").unwrap();
}

/// Collapse all runs of whitespace to single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove embedded paragraph markers (both bracket conventions).
pub fn strip_markers(s: &str) -> String {
    EMBEDDED_MARKERS.replace_all(s, "").into_owned()
}

/// Truncate to at most `max` characters without splitting a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\n  b\tc "), "a b c");
    }

    #[test]
    fn test_strip_markers_both_conventions() {
        assert_eq!(strip_markers("a [0001] b 【0002】 c"), "a  b  c");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        // 1050-1150°C — the degree sign is multi-byte
        assert_eq!(truncate_chars("°C°C", 2), "°C");
    }
}
