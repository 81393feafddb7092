//! CSS selector to XPath 1.0 compilation for the Wombat query toolkit.
//!
//! # Scope
//!
//! This crate implements a single-pass, left-to-right compiler from CSS
//! selector strings ([Selectors Level 3](https://www.w3.org/TR/selectors-3/))
//! to equivalent XPath 1.0 location paths:
//!
//! - Type, universal, and namespaced (`ns|tag`) selectors
//! - Class and ID selectors
//! - Attribute selectors: presence and all six comparison operators
//! - Structural pseudo-classes (`:first-child`, `:nth-child(an+b)`, ...)
//! - The negation pseudo-class `:not(...)`, including nesting
//! - The non-standard `:contains('text')` content pseudo-class
//! - Combinators: descendant, child (`>`), adjacent sibling (`+`),
//!   general sibling (`~`), and grouping (`,`)
//!
//! # Not Implemented
//!
//! - Pseudo-elements (`::before`, ...) and UI-state pseudo-classes (`:hover`)
//! - Selector specificity, stylesheet parsing, style application
//! - DOM construction and XPath *evaluation* - the surrounding document
//!   layer evaluates the produced expression, prefixes it with `.` when the
//!   context node is not the root, and supplies namespace-prefix bindings
//!
//! # Example
//!
//! ```
//! use wombat_css::css_to_xpath;
//!
//! let xpath = css_to_xpath("div > span.note").unwrap();
//! assert_eq!(
//!     xpath,
//!     "//div/span[contains(concat(' ', normalize-space(@class), ' '), ' note ')]"
//! );
//! ```

mod cursor;
/// Selector scanning and XPath generation per [Selectors Level 3](https://www.w3.org/TR/selectors-3/).
pub mod selector;

pub use selector::{Combinator, CssSelector, UnparsableSelector, css_to_xpath};
