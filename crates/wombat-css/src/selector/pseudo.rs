//! Structural and content pseudo-class recognition.

use std::sync::LazyLock;

use regex::Regex;
use wombat_common::warning::warn_once;

use crate::cursor::{Cursor, group};

/// [§ 6.6 Pseudo-classes](https://www.w3.org/TR/selectors-3/#pseudo-classes):
/// `:name` or `:name(argument)`. Parentheses, quotes, digits, and signs are
/// part of the capture so the parameterized forms below see the whole
/// argument text.
static PSEUDO_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^:(['()a-z0-9_+-]+)").unwrap());

/// [§ 6.6.4 Structural pseudo-classes](https://www.w3.org/TR/selectors-3/#structural-pseudos):
/// `nth-child`/`nth-last-child` with an `odd`, `even`, or integer argument.
static NTH_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(nth-child|nth-last-child)\(\s*(odd|even|\d+)\s*\)").unwrap()
});

/// `nth-child`/`nth-last-child` with an `an+b` argument (`2n`, `-n+2`,
/// `3n+1`, ...).
static NTH_LINEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(nth-child|nth-last-child)\(\s*(-?\d*)n(\+\d+)?\s*\)").unwrap()
});

/// `nth-of-type` with an `odd`, `even`, or integer argument.
static NTH_OF_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nth-of-type\((odd|even|\d+)\)").unwrap());

/// The non-standard `:contains('text')` content pseudo-class, a scraping
/// convenience carried over from the library's query dialect.
static CONTAINS_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)contains\(["'](.*?)["']\)"#).unwrap());

/// Which sibling axis a structural pseudo-class counts along.
#[derive(Debug, Clone, Copy)]
enum SiblingAxis {
    /// `nth-child` counts the siblings before the element.
    Preceding,
    /// `nth-last-child` counts the siblings after it.
    Following,
}

impl SiblingAxis {
    /// The node-set the predicates count: `preceding-sibling::*` or
    /// `following-sibling::*`.
    const fn node_set(self) -> &'static str {
        match self {
            Self::Preceding => "preceding-sibling::*",
            Self::Following => "following-sibling::*",
        }
    }
}

/// Recognize one pseudo-class and return its predicate.
///
/// The `:name(...)` text is consumed as soon as the grammar matches, so an
/// unrecognized pseudo-class disappears from the scan without contributing
/// a predicate and the selector as a whole still compiles: `div:hover`
/// becomes `//div`, with a warning on stderr.
pub(super) fn match_pseudo_class(cursor: &mut Cursor<'_>) -> Option<String> {
    let caps = cursor.try_consume(&PSEUDO_CLASS)?;
    let pseudo = group(&caps, 1);

    match pseudo {
        "first-child" => Some("count(preceding-sibling::*) = 0".to_string()),
        "last-child" => Some("count(following-sibling::*) = 0".to_string()),
        "only-child" => {
            Some("count(preceding-sibling::*) = 0 and count(following-sibling::*) = 0".to_string())
        }
        // The of-type variants lean on the evaluator: position() within an
        // XPath step counts only nodes the name test already selected.
        "first-of-type" => Some("position() = 1".to_string()),
        "last-of-type" => Some("position() = last()".to_string()),
        "only-of-type" => Some("last() = 1".to_string()),
        "empty" => Some("not(node())".to_string()),
        "root" => Some("not(parent::*)".to_string()),
        _ => match_parameterized(pseudo),
    }
}

/// [§ 6.6.4 Structural pseudo-classes](https://www.w3.org/TR/selectors-3/#structural-pseudos)
///
/// Recognize the argument-taking pseudo-classes against the already
/// captured `name(argument)` text. Returns `None` for anything
/// unrecognized; the text is gone from the scan either way.
fn match_parameterized(pseudo: &str) -> Option<String> {
    if let Some(caps) = NTH_KEYWORD.captures(pseudo) {
        let axis = sibling_axis(group(&caps, 1));
        return match group(&caps, 2) {
            "odd" => Some(nth(axis, 2, 1)),
            "even" => Some(nth(axis, 2, 0)),
            count => count.parse().ok().map(|position| nth(axis, 0, position)),
        };
    }

    if let Some(caps) = NTH_LINEAR.captures(pseudo) {
        let axis = sibling_axis(group(&caps, 1));
        let step = match group(&caps, 2) {
            // "n+2" means every position from the offset on.
            "" => 1,
            "-" => -1,
            digits => digits.parse().ok()?,
        };
        let raw_offset = group(&caps, 3);
        let offset = if raw_offset.is_empty() {
            0
        } else {
            // The capture keeps its sign: "+2" parses as 2.
            raw_offset.parse().ok()?
        };
        return Some(nth(axis, step, offset));
    }

    if let Some(caps) = NTH_OF_TYPE.captures(pseudo) {
        return Some(match group(&caps, 1) {
            "odd" => "(position() >= 1) and (((position()-1) mod 2) = 0)".to_string(),
            "even" => "(position() mod 2) = 0".to_string(),
            position => format!("position() = {position}"),
        });
    }

    if let Some(caps) = CONTAINS_TEXT.captures(pseudo) {
        let text = group(&caps, 1);
        return Some(format!("contains(., '{text}')"));
    }

    warn_once(
        "CSS",
        &format!("dropping unsupported pseudo-class ':{pseudo}'"),
    );
    None
}

/// `nth-child` positions count from the start of the sibling list,
/// `nth-last-child` positions from the end.
fn sibling_axis(name: &str) -> SiblingAxis {
    if name == "nth-child" {
        SiblingAxis::Preceding
    } else {
        SiblingAxis::Following
    }
}

/// Compile an `an+b` sibling-position formula into a predicate over `axis`.
///
/// With C standing for `count(axis-sibling::*) + 1`, the element's 1-based
/// position from that end:
/// - `a = 0`: the position is exactly `b`, expressed as a sibling count.
/// - `a > 0`: `C >= b` and `C - b` divisible by `a`.
/// - `a < 0`: `C <= b`, with the divisibility clause only when `|a| != 1`.
///
/// `nth-child(0)` therefore yields `count(preceding-sibling::*) = -1`, a
/// predicate no element satisfies; callers rely on it compiling rather than
/// erroring.
fn nth(axis: SiblingAxis, a: i64, b: i64) -> String {
    let siblings = axis.node_set();

    if a == 0 {
        return format!("count({siblings}) = {}", b - 1);
    }

    if a > 0 {
        if b == 0 {
            return format!("((count({siblings}) + 1) mod {a}) = 0");
        }
        return format!(
            "((count({siblings}) + 1) >= {b}) and ((((count({siblings}) + 1)-{b}) mod {a}) = 0)"
        );
    }

    let step = a.unsigned_abs();
    let mut predicate = format!("(count({siblings}) + 1) <= {b}");
    if step != 1 {
        predicate.push_str(&format!(
            " and ((((count({siblings}) + 1)-{b}) mod {step}) = 0)"
        ));
    }
    predicate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_zero_step_is_a_sibling_count() {
        assert_eq!(
            nth(SiblingAxis::Preceding, 0, 3),
            "count(preceding-sibling::*) = 2"
        );
    }

    #[test]
    fn test_nth_zero_step_on_following_axis() {
        assert_eq!(
            nth(SiblingAxis::Following, 0, 2),
            "count(following-sibling::*) = 1"
        );
    }

    #[test]
    fn test_nth_positive_step_without_offset() {
        assert_eq!(
            nth(SiblingAxis::Preceding, 3, 0),
            "((count(preceding-sibling::*) + 1) mod 3) = 0"
        );
    }

    #[test]
    fn test_nth_positive_step_with_offset() {
        assert_eq!(
            nth(SiblingAxis::Preceding, 2, 1),
            "((count(preceding-sibling::*) + 1) >= 1) and \
             ((((count(preceding-sibling::*) + 1)-1) mod 2) = 0)"
        );
    }

    #[test]
    fn test_nth_negative_unit_step_is_an_upper_bound() {
        assert_eq!(
            nth(SiblingAxis::Preceding, -1, 2),
            "(count(preceding-sibling::*) + 1) <= 2"
        );
    }

    #[test]
    fn test_nth_negative_step_adds_divisibility_clause() {
        assert_eq!(
            nth(SiblingAxis::Preceding, -2, 4),
            "(count(preceding-sibling::*) + 1) <= 4 and \
             ((((count(preceding-sibling::*) + 1)-4) mod 2) = 0)"
        );
    }

    #[test]
    fn test_nth_zero_zero_is_always_false() {
        assert_eq!(
            nth(SiblingAxis::Preceding, 0, 0),
            "count(preceding-sibling::*) = -1"
        );
    }
}
