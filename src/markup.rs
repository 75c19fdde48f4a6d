//! Tolerant markup parsing for scraped HTML/XML pages.
//!
//! This module turns raw markup into a tree of [`MarkupNode`]s and offers the
//! lookups the document extractor needs.
//!
//! # Overview
//!
//! The parser never fails: missing closing tags are repaired when an enclosing
//! tag closes (or at end of input), stray closing tags are ignored, and
//! unterminated tags, quotes and comments simply end at end of input.
//!
//! ```text
//! raw markup → MarkupParser → pseudo-root MarkupNode
//!                                  ↓
//!          elements_by_name / elements_by_attribute / navigate
//!                                  ↓
//!                         content(ignore) → plain text
//! ```
//!
//! # Examples
//!
//! ```
//! use kensaku::markup::MarkupParser;
//!
//! let root = MarkupParser::parse("<html><title>Hi</title><body><p>one<br>two</body></html>");
//! let body = root.elements_by_name("body")[0];
//! assert_eq!(body.content(&[]), "onetwo");
//! ```

pub mod node;
pub mod parser;

pub use node::{Element, MarkupNode};
pub use parser::MarkupParser;

/// Tag names that never have children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Check if `name` is a void element.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
