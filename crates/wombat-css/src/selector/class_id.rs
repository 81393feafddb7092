//! Class and ID selector recognition.

use std::sync::LazyLock;

use regex::Regex;

use crate::cursor::{Cursor, group};

/// [§ 6.4 Class selectors](https://www.w3.org/TR/selectors-3/#class-html) and
/// [§ 6.5 ID selectors](https://www.w3.org/TR/selectors-3/#id-selectors):
/// `.class` or `#id`.
static CLASS_OR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([#.])([a-z0-9*_-]+)").unwrap());

/// Recognize one `.class` or `#id` token and return its predicate.
///
/// `#id` compiles to an exact `@id` comparison. `.class` compiles to a
/// whole-token search: `@class` is whitespace-normalized and padded with one
/// space on each side, so `.art` cannot match `class="article"`.
pub(super) fn match_class_or_id(cursor: &mut Cursor<'_>) -> Option<String> {
    let caps = cursor.try_consume(&CLASS_OR_ID)?;
    let name = group(&caps, 2);

    if group(&caps, 1) == "#" {
        Some(format!("@id = '{name}'"))
    } else {
        Some(format!(
            "contains(concat(' ', normalize-space(@class), ' '), ' {name} ')"
        ))
    }
}
