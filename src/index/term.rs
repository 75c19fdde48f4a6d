//! Index entries: terms and their postings.

use std::cmp::Ordering;

use serde::Serialize;

use crate::DocId;
use crate::collections::{Comparator, SortedList};
use crate::text::Text;

/// Occurrences of a term in one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Posting {
    /// Handle into the corpus document table.
    pub doc_id: DocId,
    /// Number of occurrences in the document.
    pub count: usize,
}

/// Orders postings by occurrence count, highest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByCountDesc;

impl Comparator<Posting> for ByCountDesc {
    fn compare(&self, a: &Posting, b: &Posting) -> Ordering {
        b.count.cmp(&a.count)
    }
}

/// A term with its aggregate counts and postings.
#[derive(Clone, Debug)]
pub struct IndexTerm {
    term: Text,
    total_occurrences: usize,
    document_count: usize,
    postings: SortedList<Posting, ByCountDesc>,
}

impl IndexTerm {
    /// Create an entry with no postings.
    pub fn new(term: Text) -> Self {
        IndexTerm {
            term,
            total_occurrences: 0,
            document_count: 0,
            postings: SortedList::new(),
        }
    }

    /// The term text.
    pub fn term(&self) -> &Text {
        &self.term
    }

    /// Occurrences across all documents.
    pub fn total_occurrences(&self) -> usize {
        self.total_occurrences
    }

    /// Number of distinct documents containing the term.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Postings, highest count first. Equal counts keep insertion order.
    pub fn postings(&self) -> &SortedList<Posting, ByCountDesc> {
        &self.postings
    }

    /// Posting of `doc_id`, if the term occurs in it.
    pub fn posting(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings.first_of(|posting| posting.doc_id == doc_id)
    }

    /// Record `count` more occurrences in `doc_id`.
    ///
    /// An existing posting is incremented and moved to keep the list ordered;
    /// otherwise a new posting is inserted and the document count grows.
    pub fn add_occurrence(&mut self, doc_id: DocId, count: usize) {
        let updated = self
            .postings
            .modify_first_of(|posting| posting.doc_id == doc_id, |posting| {
                posting.count += count
            });
        if !updated {
            self.postings.insert(Posting { doc_id, count });
            self.document_count += 1;
        }
        self.total_occurrences += count;
    }
}
