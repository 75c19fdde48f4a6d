//! The indexed corpus: document table plus inverted index.

use std::fmt;

use crate::DocId;
use crate::analysis::{Tokenizer, WhitespaceTokenizer};
use crate::collections::OrderedMap;
use crate::document::Document;
use crate::error::{KensakuError, Result};
use crate::index::{IndexBackend, InvertedIndex, QueryHit, new_index};
use crate::text::Text;

/// Committed documents, keyed by id, and the index built from their words.
pub struct Corpus {
    documents: OrderedMap<DocId, Document>,
    index: Box<dyn InvertedIndex>,
}

impl Corpus {
    /// Create an empty corpus indexed with `backend`.
    pub fn new(backend: IndexBackend) -> Self {
        Corpus {
            documents: OrderedMap::new(),
            index: new_index(backend),
        }
    }

    /// Index `document` under the distinct-word counts in `counts` and store it.
    ///
    /// Fails without touching the corpus when the id is already taken.
    pub fn commit(&mut self, document: Document, counts: &OrderedMap<Text, usize>) -> Result<()> {
        let id = document.id();
        if self.documents.contains_key(&id) {
            return Err(KensakuError::DuplicateDocument(id));
        }
        counts.for_each_inorder(|word, &count| {
            self.index.add_occurrence(word.clone(), id, count);
        });
        self.documents.insert(id, document);
        Ok(())
    }

    /// Look up a committed document.
    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Committed documents in id order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn index(&self) -> &dyn InvertedIndex {
        self.index.as_ref()
    }

    /// Ranked documents for `terms`.
    pub fn query(&self, terms: &[Text]) -> Vec<QueryHit> {
        self.index.query(terms)
    }

    /// Ranked documents for a space-delimited query line.
    pub fn query_str(&self, query: &str) -> Result<Vec<QueryHit>> {
        let terms: Vec<Text> = WhitespaceTokenizer::new()
            .tokenize(query)?
            .map(|token| token.to_text())
            .collect();
        Ok(self.query(&terms))
    }
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corpus")
            .field("documents", &self.documents.len())
            .field("terms", &self.index.term_count())
            .field("backend", &self.index.backend())
            .finish()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Corpus::new(IndexBackend::default())
    }
}
