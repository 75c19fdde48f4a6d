//! # Kensaku
//!
//! An inverted index builder and ranked query engine for scraped document
//! corpora, with dictionary-based segmentation of CJK text.
//!
//! ## Features
//!
//! - Tolerant markup parser producing an owned element tree
//! - Reverse maximum-match word segmentation over a word dictionary
//! - AVL ordered map and fixed-bucket chained hash map containers
//! - Inverted index with two interchangeable backends
//! - Multi-term queries ranked by term coverage
//! - Parallel indexing pipeline with per-document failure isolation

pub mod analysis;
pub mod batch;
pub mod cli;
pub mod collections;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod markup;
pub mod pipeline;
pub mod text;

/// Externally assigned document identifier.
pub type DocId = u32;

pub mod prelude {
    pub use crate::DocId;
    pub use crate::analysis::{Dictionary, DictionarySegmenter};
    pub use crate::batch::UrlRecord;
    pub use crate::config::KensakuConfig;
    pub use crate::document::Document;
    pub use crate::error::{KensakuError, Result};
    pub use crate::index::{IndexBackend, InvertedIndex, QueryHit};
    pub use crate::pipeline::{Corpus, IndexingPipeline};
    pub use crate::text::Text;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
