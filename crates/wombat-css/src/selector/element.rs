//! Type selector recognition.

use std::sync::LazyLock;

use regex::Regex;

use crate::cursor::{Cursor, group};

/// [§ 6.1 Type selector](https://www.w3.org/TR/selectors-3/#type-selectors)
/// with an optional [namespace prefix](https://www.w3.org/TR/selectors-3/#typenmsp):
/// `tag` or `ns|tag`. The universal `*` scans like a tag name.
static ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z0-9*_-]+)(\|([a-z0-9*_-]+))?").unwrap());

/// Recognize a type selector and return its XPath name test.
///
/// `ns|tag` compiles to `ns:tag`; binding the prefix to a namespace URI is
/// the evaluating layer's job. Returns `None` when the scan position holds
/// no type selector - the driver substitutes the universal selector then.
pub(super) fn match_element(cursor: &mut Cursor<'_>) -> Option<String> {
    let caps = cursor.try_consume(&ELEMENT)?;
    let tag = group(&caps, 1);
    let local = group(&caps, 3);

    if local.is_empty() {
        Some(tag.to_string())
    } else {
        Some(format!("{tag}:{local}"))
    }
}
