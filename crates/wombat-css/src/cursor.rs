//! Anchored scanning primitive for the selector compiler.
//!
//! Every token matcher is built from [`Cursor::try_consume`]: an anchored,
//! case-insensitive pattern match against the unconsumed suffix of the
//! selector. The suffix only ever shrinks, so the driver loop can detect a
//! stuck scan by comparing [`Cursor::rest`] across one iteration.

use regex::{Captures, Regex};

/// The unconsumed suffix of the selector being compiled.
///
/// Matchers narrow the suffix on success and leave it untouched on failure.
/// Each recursive scan (the argument of `:not(...)`) gets its own cursor
/// over a fresh sub-slice, so no matcher ever has to undo consumption.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    /// Start a scan over the full selector text.
    pub fn new(selector: &'a str) -> Self {
        Self { rest: selector }
    }

    /// The unconsumed suffix.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    /// True once the whole selector has been consumed.
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Drop whitespace from both ends of the suffix.
    ///
    /// Trimming the trailing end as well keeps a selector like `"div "` from
    /// compiling its trailing space as a descendant combinator.
    pub fn trim(&mut self) {
        self.rest = self.rest.trim();
    }

    /// True if the unconsumed suffix starts with `prefix`.
    pub fn starts_with(&self, prefix: char) -> bool {
        self.rest.starts_with(prefix)
    }

    /// Apply `pattern` at the current scan position.
    ///
    /// On a match, the cursor advances past the whole match and the capture
    /// groups are returned; otherwise the cursor is unchanged and `None` is
    /// returned. Patterns must carry a leading `^` (and `(?i)` where the
    /// grammar is case-insensitive) so a match can only occur at the anchor.
    pub fn try_consume(&mut self, pattern: &Regex) -> Option<Captures<'a>> {
        let caps = pattern.captures(self.rest)?;
        let matched = caps.get(0)?;
        debug_assert_eq!(matched.start(), 0, "selector patterns must be anchored");
        self.rest = &self.rest[matched.end()..];
        Some(caps)
    }
}

/// Text of capture group `index`, or `""` when the group did not participate
/// in the match. Matchers treat absent and empty captures identically.
pub(crate) fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |capture| capture.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static WORD: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^([a-z]+)(-([a-z]+))?").unwrap());

    #[test]
    fn test_try_consume_advances_past_match() {
        let mut cursor = Cursor::new("div.note");
        let caps = cursor.try_consume(&WORD).unwrap();
        assert_eq!(group(&caps, 1), "div");
        assert_eq!(cursor.rest(), ".note");
    }

    #[test]
    fn test_try_consume_leaves_cursor_unchanged_on_failure() {
        let mut cursor = Cursor::new("#id");
        assert!(cursor.try_consume(&WORD).is_none());
        assert_eq!(cursor.rest(), "#id");
    }

    #[test]
    fn test_try_consume_is_case_insensitive() {
        let mut cursor = Cursor::new("DIV rest");
        let caps = cursor.try_consume(&WORD).unwrap();
        assert_eq!(group(&caps, 1), "DIV");
    }

    #[test]
    fn test_group_is_empty_for_missing_capture() {
        let mut cursor = Cursor::new("first");
        let caps = cursor.try_consume(&WORD).unwrap();
        assert_eq!(group(&caps, 3), "");
    }

    #[test]
    fn test_trim_drops_whitespace_on_both_ends() {
        let mut cursor = Cursor::new("  div  ");
        cursor.trim();
        assert_eq!(cursor.rest(), "div");
    }
}
