//! Ranked multi-term queries.
//!
//! Every document matching at least one query term gets a hit. Hits are
//! ordered by coverage (number of distinct query terms found in the document),
//! highest first; documents with equal coverage keep the order in which the
//! query first reached them.

use serde::Serialize;

use super::InvertedIndex;
use crate::DocId;
use crate::collections::OrderedMap;
use crate::text::Text;

/// One ranked query result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QueryHit {
    pub doc_id: DocId,
    /// Occurrences of all matched terms in the document.
    pub total: usize,
    /// Number of distinct query terms found in the document.
    pub coverage: usize,
}

/// Run `terms` against `index`.
///
/// Repeated query terms count once. Terms missing from the index contribute
/// nothing, and an empty term list yields no hits.
pub fn rank<I: InvertedIndex + ?Sized>(index: &I, terms: &[Text]) -> Vec<QueryHit> {
    let mut seen: OrderedMap<Text, ()> = OrderedMap::new();
    let mut slots: OrderedMap<DocId, usize> = OrderedMap::new();
    let mut hits: Vec<QueryHit> = Vec::new();

    for term in terms {
        if seen.insert(term.clone(), ()).is_some() {
            continue;
        }
        let Some(entry) = index.term(term) else {
            continue;
        };

        for posting in entry.postings() {
            match slots.get(&posting.doc_id) {
                Some(&slot) => {
                    hits[slot].total += posting.count;
                    hits[slot].coverage += 1;
                }
                None => {
                    slots.insert(posting.doc_id, hits.len());
                    hits.push(QueryHit {
                        doc_id: posting.doc_id,
                        total: posting.count,
                        coverage: 1,
                    });
                }
            }
        }
    }

    // stable: ties keep discovery order
    hits.sort_by(|a, b| b.coverage.cmp(&a.coverage));
    hits
}

/// Format hits as `(id,total) ` tokens, one line per query.
pub fn format_hits(hits: &[QueryHit]) -> String {
    hits.iter()
        .map(|hit| format!("({},{}) ", hit.doc_id, hit.total))
        .collect()
}
