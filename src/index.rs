//! Inverted index construction and ranked lookup.
//!
//! The index maps each term to an [`IndexTerm`]: total occurrences, number of
//! documents, and postings ordered by per-document count. Two interchangeable
//! backends implement [`InvertedIndex`]:
//!
//! - [`TreeInvertedIndex`] - AVL ordered map, term-ordered traversal
//! - [`HashInvertedIndex`] - fixed-bucket chained hash map
//!
//! # Examples
//!
//! ```
//! use kensaku::index::{IndexBackend, new_index};
//! use kensaku::text::Text;
//!
//! let mut index = new_index(IndexBackend::Hash);
//! index.add_occurrence(Text::from("a"), 1, 1);
//! index.add_occurrence(Text::from("b"), 1, 2);
//! index.add_occurrence(Text::from("a"), 2, 4);
//!
//! let hits = index.query(&[Text::from("a"), Text::from("b")]);
//! assert_eq!(hits[0].doc_id, 1);
//! assert_eq!(hits[0].total, 3);
//! assert_eq!(hits[1].doc_id, 2);
//! ```

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::DocId;
use crate::error::{KensakuError, Result};
use crate::text::Text;

pub mod hash;
pub mod query;
pub mod term;
pub mod tree;

pub use hash::HashInvertedIndex;
pub use query::QueryHit;
pub use term::{IndexTerm, Posting};
pub use tree::TreeInvertedIndex;

/// Which map backs the inverted index.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    /// AVL ordered map
    #[default]
    Tree,
    /// Chained hash map
    Hash,
}

impl fmt::Display for IndexBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexBackend::Tree => write!(f, "tree"),
            IndexBackend::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for IndexBackend {
    type Err = KensakuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tree" | "avl" => Ok(IndexBackend::Tree),
            "hash" => Ok(IndexBackend::Hash),
            other => Err(KensakuError::invalid_argument(format!(
                "unknown index backend: {other}"
            ))),
        }
    }
}

/// Term-to-postings map with ranked multi-term lookup.
pub trait InvertedIndex: Send + Sync + fmt::Debug {
    /// Record `count` occurrences of `term` in `doc_id`, creating the term
    /// entry on first use.
    fn add_occurrence(&mut self, term: Text, doc_id: DocId, count: usize);

    /// Entry for `term`.
    fn term(&self, term: &Text) -> Option<&IndexTerm>;

    /// Number of distinct terms.
    fn term_count(&self) -> usize;

    /// Visit every term entry in the backend's traversal order.
    fn for_each_term(&self, visit: &mut dyn FnMut(&IndexTerm));

    /// The backend kind.
    fn backend(&self) -> IndexBackend;

    /// Ranked documents matching any of `terms`. See [`query::rank`].
    fn query(&self, terms: &[Text]) -> Vec<QueryHit> {
        query::rank(self, terms)
    }

    /// The `n` terms with the most occurrences, most frequent first. Ties are
    /// broken by term order.
    fn top_terms(&self, n: usize) -> Vec<(Text, usize)> {
        let mut terms = Vec::with_capacity(self.term_count());
        self.for_each_term(&mut |entry| {
            terms.push((entry.term().clone(), entry.total_occurrences()));
        });
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(n);
        terms
    }
}

/// Create an empty index with the given backend.
pub fn new_index(backend: IndexBackend) -> Box<dyn InvertedIndex> {
    match backend {
        IndexBackend::Tree => Box::new(TreeInvertedIndex::new()),
        IndexBackend::Hash => Box::new(HashInvertedIndex::new()),
    }
}
