//! The indexed document.

use crate::DocId;
use crate::collections::{LinkedList, OrderedMap};
use crate::text::Text;

/// A scraped page after segmentation.
///
/// Once committed, documents are owned by the corpus document table and are
/// referred to from postings by their [`DocId`].
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    id: DocId,
    url: String,
    title: Text,
    body: Text,
    words: LinkedList<Text>,
}

impl Document {
    /// Create a document with extracted title/body text and its words.
    pub fn new(id: DocId, title: Text, body: Text, words: LinkedList<Text>) -> Self {
        Document {
            id,
            url: String::new(),
            title,
            body,
            words,
        }
    }

    /// Create a document holding only a word sequence.
    pub fn from_words<I, S>(id: DocId, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Text>,
    {
        Document::new(
            id,
            Text::new(),
            Text::new(),
            words.into_iter().map(Into::into).collect(),
        )
    }

    /// Set the URL the document was fetched from.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = url.into();
        self
    }

    /// Externally assigned id.
    pub fn id(&self) -> DocId {
        self.id
    }

    /// Source URL, empty when unknown.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extracted title.
    pub fn title(&self) -> &Text {
        &self.title
    }

    /// Extracted, decoded body.
    pub fn body(&self) -> &Text {
        &self.body
    }

    /// Segmented words in reading order.
    pub fn words(&self) -> &LinkedList<Text> {
        &self.words
    }

    /// Number of occurrences of `word`.
    pub fn count_word(&self, word: &Text) -> usize {
        self.words.iter().filter(|w| *w == word).count()
    }

    /// Occurrence count of every distinct word, keyed by word.
    pub fn word_counts(&self) -> OrderedMap<Text, usize> {
        let mut counts = OrderedMap::new();
        for word in &self.words {
            match counts.get_mut(word) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word.clone(), 1);
                }
            }
        }
        counts
    }
}
