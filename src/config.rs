//! Top-level configuration.
//!
//! Every section has defaults, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "pipeline": { "thread_pool_size": 16 },
//!   "index": { "backend": "hash" },
//!   "extraction": { "title_attribute": "id=\"thread_subject\"", "body_attribute": "class=\"t_f\"" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::DEFAULT_CJK_STOP_CHARS;
use crate::document::ExtractionConfig;
use crate::error::Result;
use crate::index::IndexBackend;
use crate::pipeline::PipelineConfig;

/// Complete configuration of an indexing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KensakuConfig {
    pub pipeline: PipelineConfig,
    pub index: IndexConfig,
    pub extraction: ExtractionConfig,
    pub segmenter: SegmenterConfig,
}

impl KensakuConfig {
    /// Load a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a JSON configuration.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Index settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub backend: IndexBackend,
}

/// Segmenter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Punctuation never emitted as a one-character word, in addition to
    /// whitespace and ASCII.
    pub stop_chars: Vec<char>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            stop_chars: DEFAULT_CJK_STOP_CHARS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = KensakuConfig::from_json("{}").unwrap();
        assert_eq!(config, KensakuConfig::default());
        assert_eq!(config.index.backend, IndexBackend::Tree);
        assert_eq!(config.segmenter.stop_chars.len(), DEFAULT_CJK_STOP_CHARS.len());
    }

    #[test]
    fn test_partial_override() {
        let config = KensakuConfig::from_json(
            r#"{
                "pipeline": { "thread_pool_size": 4, "allow_partial_failures": false },
                "index": { "backend": "hash" },
                "extraction": { "body_attribute": "class=\"t_f\"" },
                "segmenter": { "stop_chars": ["。"] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.pipeline.thread_pool_size, Some(4));
        assert!(!config.pipeline.allow_partial_failures);
        assert_eq!(config.index.backend, IndexBackend::Hash);
        assert_eq!(config.extraction.body_attribute.as_deref(), Some("class=\"t_f\""));
        assert_eq!(config.extraction.body_tag, "body");
        assert_eq!(config.segmenter.stop_chars, vec!['。']);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"index": {{"backend": "tree"}}}}"#).unwrap();
        file.flush().unwrap();
        let config = KensakuConfig::from_file(file.path()).unwrap();
        assert_eq!(config.index.backend, IndexBackend::Tree);

        assert!(KensakuConfig::from_json("{\"index\": {\"backend\": \"btree\"}}").is_err());
        assert!(KensakuConfig::from_file("/nonexistent/kensaku.json").is_err());
    }
}
