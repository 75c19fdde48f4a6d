//! Configuration for the indexing pipeline.

use serde::{Deserialize, Serialize};

/// Worker pool and failure policy of an [`IndexingPipeline`](super::IndexingPipeline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of worker threads (None = number of CPUs).
    pub thread_pool_size: Option<usize>,

    /// Keep going when single documents fail. When false, the first
    /// per-document error is returned once the batch has finished.
    pub allow_partial_failures: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: None,
            allow_partial_failures: true,
        }
    }
}

impl PipelineConfig {
    /// Effective worker count.
    pub fn worker_count(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get).max(1)
    }
}
