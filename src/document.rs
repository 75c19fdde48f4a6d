//! Documents and page extraction.
//!
//! - [`Document`] - id, source URL, title/body text and segmented words
//! - [`DocumentExtractor`] - picks title and body text out of a markup tree
//!   according to an [`ExtractionConfig`]

#[allow(clippy::module_inception)]
pub mod document;
pub mod extractor;

pub use document::Document;
pub use extractor::{DocumentExtractor, Extracted, ExtractionConfig};
