//! Inverted index over the AVL ordered map.

use super::term::IndexTerm;
use super::{IndexBackend, InvertedIndex};
use crate::DocId;
use crate::collections::OrderedMap;
use crate::text::Text;

/// Terms kept in an [`OrderedMap`]; traversal is in term order.
#[derive(Debug, Default)]
pub struct TreeInvertedIndex {
    terms: OrderedMap<Text, IndexTerm>,
}

impl TreeInvertedIndex {
    pub fn new() -> Self {
        TreeInvertedIndex {
            terms: OrderedMap::new(),
        }
    }
}

impl InvertedIndex for TreeInvertedIndex {
    fn add_occurrence(&mut self, term: Text, doc_id: DocId, count: usize) {
        match self.terms.get_mut(&term) {
            Some(entry) => entry.add_occurrence(doc_id, count),
            None => {
                let mut entry = IndexTerm::new(term.clone());
                entry.add_occurrence(doc_id, count);
                self.terms.insert(term, entry);
            }
        }
    }

    fn term(&self, term: &Text) -> Option<&IndexTerm> {
        self.terms.get(term)
    }

    fn term_count(&self) -> usize {
        self.terms.len()
    }

    fn for_each_term(&self, visit: &mut dyn FnMut(&IndexTerm)) {
        self.terms.for_each_inorder(|_, entry| visit(entry));
    }

    fn backend(&self) -> IndexBackend {
        IndexBackend::Tree
    }
}
