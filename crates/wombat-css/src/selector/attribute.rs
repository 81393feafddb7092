//! Attribute selector and negation recognition.

use std::sync::LazyLock;

use regex::Regex;
use wombat_common::warning::warn_once;

use super::{class_id, element, pseudo};
use crate::cursor::{Cursor, group};

/// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
/// with a comparison operator: `[attr operator 'value']`. The value must be
/// quoted; the operator is one of `=`, `~=`, `|=`, `^=`, `$=`, `*=`.
static ATTRIBUTE_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\[\s*([^~|^$*=\s]+)\s*([~|^$*]?=)\s*["']([^"]*)["']\s*\]"#).unwrap()
});

/// [§ 6.3.1 Attribute presence](https://www.w3.org/TR/selectors-3/#attribute-representation):
/// `[attr]`, reached only when the operator form does not match.
static ATTRIBUTE_EXISTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[([^\]]*)\]").unwrap());

/// [§ 6.6.7 The negation pseudo-class](https://www.w3.org/TR/selectors-3/#negation):
/// `:not(argument)`. One optional closing parenthesis is allowed inside the
/// argument so a nested functional form (`:not(:nth-child(2))`) captures
/// whole.
static NEGATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^:not\((.*?\)?)\)").unwrap());

/// Recognize one attribute, negation, or pseudo-class condition.
///
/// Dispatch order: attribute-with-operator, attribute-exists, then - only
/// when no bracket form could be closed - `:not(...)`, then pseudo-classes.
/// A `[` that neither bracket form consumes stops the compound: nothing is
/// consumed here and the driver's progress check fails the whole compile.
pub(super) fn match_attribute(cursor: &mut Cursor<'_>) -> Option<String> {
    if let Some(predicate) = match_attribute_with_operator(cursor) {
        return Some(predicate);
    }
    if let Some(predicate) = match_attribute_exists(cursor) {
        return Some(predicate);
    }
    if cursor.starts_with('[') {
        // Unclosable bracket; leave the stuck position for the driver.
        return None;
    }
    if let Some(caps) = cursor.try_consume(&NEGATION) {
        let argument = group(&caps, 1);
        if let Some(inner) = match_negation_argument(argument) {
            return Some(format!("not({inner})"));
        }
        // The :not(...) text is already consumed; it contributes no
        // predicate and the scan continues after it.
        warn_once(
            "CSS",
            &format!("ignoring :not() with unsupported argument {argument:?}"),
        );
    }
    pseudo::match_pseudo_class(cursor)
}

/// [§ 6.3.2 Substring matching attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-substrings)
/// and the exact/list/hyphen forms of [§ 6.3.1](https://www.w3.org/TR/selectors-3/#attribute-representation).
///
/// Each operator maps onto an XPath 1.0 string predicate over `@attr`.
fn match_attribute_with_operator(cursor: &mut Cursor<'_>) -> Option<String> {
    let caps = cursor.try_consume(&ATTRIBUTE_OPERATOR)?;
    let attribute = group(&caps, 1);
    let operator = group(&caps, 2);
    let value = group(&caps, 3);

    Some(match operator {
        "!=" => format!("@{attribute} != '{value}'"),
        // "whitespace-separated list of words, one of which is exactly value"
        "~=" => format!("contains(concat(' ', @{attribute}, ' '),concat(' ', '{value}', ' '))"),
        // "exactly value or beginning with value immediately followed by -"
        "|=" => {
            format!("@{attribute} = '{value}' or starts-with(@{attribute},concat('{value}', '-'))")
        }
        "^=" => format!("starts-with(@{attribute}, '{value}')"),
        // XPath 1.0 has no ends-with(); spell it out with substring().
        "$=" => format!(
            "substring(@{attribute}, string-length(@{attribute}) - string-length('{value}') + 1, string-length('{value}')) = '{value}'"
        ),
        "*=" => format!("contains(@{attribute}, '{value}')"),
        // Plain `=`: exact match.
        _ => format!("@{attribute} = '{value}'"),
    })
}

/// [§ 6.3.1](https://www.w3.org/TR/selectors-3/#attribute-representation)
/// `[attr]` - "the element carries the attribute, whatever its value".
fn match_attribute_exists(cursor: &mut Cursor<'_>) -> Option<String> {
    let caps = cursor.try_consume(&ATTRIBUTE_EXISTS)?;
    let attribute = group(&caps, 1);
    Some(format!("@{attribute}"))
}

/// [§ 6.6.7 Negation](https://www.w3.org/TR/selectors-3/#negation)
///
/// "The negation pseudo-class, :not(X), is a functional notation taking a
/// simple selector (excluding the negation pseudo-class itself) as an
/// argument."
///
/// The argument is scanned on its own sub-cursor: attribute and
/// pseudo-class conditions first (nested `:not(...)` included, so
/// `:not(:not(div))` compiles), then a type selector as a `self::` test,
/// then a class or ID condition.
fn match_negation_argument(argument: &str) -> Option<String> {
    let mut cursor = Cursor::new(argument);

    if let Some(predicate) = match_attribute(&mut cursor) {
        return Some(predicate);
    }
    if let Some(name) = element::match_element(&mut cursor) {
        return Some(format!("self::{name}"));
    }
    class_id::match_class_or_id(&mut cursor)
}
