//! CSS selector compilation per [Selectors Level 3](https://www.w3.org/TR/selectors-3/).
//!
//! The compiler is a single forward scan: each iteration recognizes one
//! compound selector (type selector, then class/ID conditions, then
//! attribute and pseudo-class conditions), emits one XPath step, and
//! consumes the combinator that follows it. A scan position that fails to
//! advance fails the whole compile - partial output is never returned.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::cursor::{Cursor, group};

mod attribute;
mod class_id;
mod element;
mod pseudo;

/// [§ 8 Combinators](https://www.w3.org/TR/selectors-3/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
///
/// Each variant carries the XPath fragment it compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 8.1 Descendant combinator](https://www.w3.org/TR/selectors-3/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two sequences
    /// of simple selectors." `A B` compiles to `//`.
    Descendant,

    /// [§ 8.2 Child combinator](https://www.w3.org/TR/selectors-3/#child-combinators)
    /// "A child combinator describes a childhood relationship between two
    /// elements." `A > B` compiles to `/`.
    Child,

    /// [§ 8.3.1 Adjacent sibling combinator](https://www.w3.org/TR/selectors-3/#adjacent-sibling-combinators)
    /// "The elements represented by the two sequences share the same parent
    /// in the document tree and the element represented by the first
    /// sequence immediately precedes the element represented by the second
    /// one." `A + B` compiles to `/following-sibling::*[1]/self::`.
    AdjacentSibling,

    /// [§ 8.3.2 General sibling combinator](https://www.w3.org/TR/selectors-3/#general-sibling-combinators)
    /// `A ~ B` - B follows A somewhere among its siblings. Compiles to
    /// `/following-sibling::`.
    GeneralSibling,

    /// [§ 5 Groups of selectors](https://www.w3.org/TR/selectors-3/#grouping)
    /// `A, B` - the union of both matches. Unlike the other combinators this
    /// restarts the location path from the document root: ` | //`.
    Union,
}

impl Combinator {
    /// The XPath fragment this combinator contributes between two steps.
    #[must_use]
    pub const fn as_xpath(self) -> &'static str {
        match self {
            Self::Descendant => "//",
            Self::Child => "/",
            Self::AdjacentSibling => "/following-sibling::*[1]/self::",
            Self::GeneralSibling => "/following-sibling::",
            Self::Union => " | //",
        }
    }
}

/// Error returned when a selector cannot be compiled.
///
/// There is exactly one failure kind: the scan stopped making progress,
/// which covers unclosable attribute brackets and any position where no
/// part of the grammar matches. The partially built XPath is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable CSS selector: {selector:?}")]
pub struct UnparsableSelector {
    /// The selector text that failed to compile.
    pub selector: String,
}

/// A CSS selector compiled to its equivalent XPath 1.0 expression.
///
/// The expression addresses elements from the document root (it starts with
/// `//`). When evaluating relative to an inner context node, prefix it with
/// `.`; namespace prefixes (`ns|tag` compiles to `ns:tag`) must be bound by
/// the evaluating layer.
///
/// Serializes to `{"css": ..., "xpath": ...}`. Deserialization is not
/// offered: a `CssSelector` can only be obtained through a successful
/// [`CssSelector::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssSelector {
    css: String,
    xpath: String,
}

impl CssSelector {
    /// Compile a CSS selector into an XPath 1.0 location path.
    ///
    /// The whole selector must be consumed by the scan; trailing garbage or
    /// an unclosable `[` fails the compile as a unit.
    ///
    /// # Errors
    ///
    /// Returns [`UnparsableSelector`] when the scan stops making progress
    /// before consuming the whole selector.
    pub fn parse(selector: &str) -> Result<Self, UnparsableSelector> {
        match scan(selector) {
            Some(xpath) => Ok(Self {
                css: selector.to_string(),
                xpath,
            }),
            None => Err(UnparsableSelector {
                selector: selector.to_string(),
            }),
        }
    }

    /// The source selector text.
    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }

    /// The compiled XPath expression.
    #[must_use]
    pub fn xpath(&self) -> &str {
        &self.xpath
    }
}

impl fmt::Display for CssSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.xpath)
    }
}

/// Compile `selector` and return just the XPath text.
///
/// # Errors
///
/// Returns [`UnparsableSelector`] when the selector cannot be compiled.
pub fn css_to_xpath(selector: &str) -> Result<String, UnparsableSelector> {
    CssSelector::parse(selector).map(|compiled| compiled.xpath)
}

/// [§ 8 Combinators](https://www.w3.org/TR/selectors-3/#combinators):
/// whitespace, `>`, `+`, `~`, or the grouping comma, with optional
/// surrounding whitespace.
static COMBINATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([\s>+~,])\s*").unwrap());

/// Recognize the separator between two compound selectors.
///
/// Returns `None` at end of input (no combinator is appended after the last
/// step) and on any non-combinator character, which the driver then reports
/// through its progress check.
fn match_combinator(cursor: &mut Cursor<'_>) -> Option<Combinator> {
    let caps = cursor.try_consume(&COMBINATOR)?;
    Some(match group(&caps, 1) {
        ">" => Combinator::Child,
        "+" => Combinator::AdjacentSibling,
        "~" => Combinator::GeneralSibling,
        "," => Combinator::Union,
        // Bare whitespace between two compound selectors.
        _ => Combinator::Descendant,
    })
}

/// Single forward scan translating the selector into a location path.
///
/// Per iteration: trim whitespace, resolve the element name (the universal
/// selector is implied when no type selector is present), collect class/ID
/// predicates, collect attribute/pseudo-class predicates, consume the
/// combinator, and append the finished step. The scan succeeds only when
/// the cursor is fully consumed; an iteration that consumes nothing proves
/// the remainder unparsable and fails the compile.
fn scan(selector: &str) -> Option<String> {
    let mut xpath = String::from("//");
    let mut cursor = Cursor::new(selector);
    let mut previous = cursor.rest();

    while !cursor.is_empty() {
        cursor.trim();

        let element =
            element::match_element(&mut cursor).unwrap_or_else(|| String::from("*"));

        let mut predicates = Vec::new();
        while let Some(predicate) = class_id::match_class_or_id(&mut cursor) {
            predicates.push(predicate);
        }
        while let Some(predicate) = attribute::match_attribute(&mut cursor) {
            predicates.push(predicate);
        }

        let combinator = match_combinator(&mut cursor);

        xpath.push_str(&element);
        if !predicates.is_empty() {
            xpath.push('[');
            xpath.push_str(&predicates.join(" and "));
            xpath.push(']');
        }
        if let Some(combinator) = combinator {
            xpath.push_str(combinator.as_xpath());
        }

        // A position that did not advance never will; bail out instead of
        // rescanning the same unparsable remainder forever.
        if cursor.rest() == previous {
            return None;
        }
        previous = cursor.rest();
    }

    Some(xpath)
}
