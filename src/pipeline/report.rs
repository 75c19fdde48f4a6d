//! Outcome of an indexing batch.

use std::time::Duration;

use serde::Serialize;

use crate::DocId;
use crate::error::KensakuError;

/// Counts and failures of one `index_batch` call.
#[derive(Debug, Default)]
pub struct IndexingReport {
    /// Records submitted.
    pub total: usize,

    /// Documents committed to the corpus.
    pub indexed: usize,

    /// Documents dropped, with the reason.
    pub failed: Vec<(DocId, KensakuError)>,

    /// Wall-clock time of the batch.
    pub elapsed: Duration,
}

impl IndexingReport {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Serializable view of the report.
    pub fn summary(&self) -> IndexingSummary {
        IndexingSummary {
            total: self.total,
            indexed: self.indexed,
            failed: self
                .failed
                .iter()
                .map(|(doc_id, error)| FailureSummary {
                    doc_id: *doc_id,
                    error: error.to_string(),
                })
                .collect(),
            elapsed_ms: self.elapsed.as_millis(),
        }
    }
}

/// [`IndexingReport`] with errors rendered as text.
#[derive(Debug, Clone, Serialize)]
pub struct IndexingSummary {
    pub total: usize,
    pub indexed: usize,
    pub failed: Vec<FailureSummary>,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub doc_id: DocId,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let report = IndexingReport {
            total: 3,
            indexed: 2,
            failed: vec![(9, KensakuError::DuplicateDocument(9))],
            elapsed: Duration::from_millis(12),
        };
        assert!(!report.is_complete());
        let summary = report.summary();
        assert_eq!(summary.failed[0].doc_id, 9);
        assert_eq!(summary.failed[0].error, "Duplicate document id: 9");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["elapsed_ms"], 12);
        assert_eq!(json["indexed"], 2);
    }
}
