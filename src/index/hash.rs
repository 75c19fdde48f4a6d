//! Inverted index over the chained hash map.

use super::term::IndexTerm;
use super::{IndexBackend, InvertedIndex};
use crate::DocId;
use crate::collections::ChainedHashMap;
use crate::text::{Text, TextHasher};

/// Terms kept in a [`ChainedHashMap`] bucketed by [`TextHasher`]; traversal
/// is in bucket order.
#[derive(Debug, Default)]
pub struct HashInvertedIndex {
    terms: ChainedHashMap<Text, IndexTerm, TextHasher>,
}

impl HashInvertedIndex {
    pub fn new() -> Self {
        HashInvertedIndex {
            terms: ChainedHashMap::new(),
        }
    }
}

impl InvertedIndex for HashInvertedIndex {
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
        self.terms.for_each(|_, entry| visit(entry));
    }

    fn backend(&self) -> IndexBackend {
        IndexBackend::Hash
    }
}
