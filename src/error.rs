//! Error types for the Kensaku library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`KensakuError`] enum. Lookups that simply miss (absent keys, unmatched
//! query terms, predicates with no match) are not errors: they are reported
//! through `Option` or `bool` returns.
//!
//! # Examples
//!
//! ```
//! use kensaku::error::{KensakuError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KensakuError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::DocId;

/// The main error type for Kensaku operations.
#[derive(Error, Debug)]
pub enum KensakuError {
    /// I/O errors (dictionary files, URL batches, query files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A position or slice bound outside of the valid range.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Substring search was asked to look for an empty pattern.
    #[error("Search pattern is empty")]
    EmptyPattern,

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed textual input (URL batch lines, config values, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The fetch collaborator could not retrieve a document.
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Title/body extraction failed for a fetched document.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A document with the same id was already committed.
    #[error("Duplicate document id: {0}")]
    DuplicateDocument(DocId),

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited-text reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors reported by external collaborators
    #[error("Collaborator error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with KensakuError.
pub type Result<T> = std::result::Result<T, KensakuError>;

impl KensakuError {
    /// Create a new out-of-range error.
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        KensakuError::OutOfRange(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KensakuError::InvalidArgument(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        KensakuError::Parse(msg.into())
    }

    /// Create a new fetch error.
    pub fn fetch<U: Into<String>, S: Into<String>>(url: U, msg: S) -> Self {
        KensakuError::Fetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a new extraction error.
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        KensakuError::Extraction(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KensakuError::Other(msg.into())
    }

    /// Whether this error only affects a single document of a batch.
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            KensakuError::Fetch { .. }
                | KensakuError::Extraction(_)
                | KensakuError::DuplicateDocument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KensakuError::out_of_range("left > right");
        assert_eq!(error.to_string(), "Out of range: left > right");

        let error = KensakuError::fetch("http://a", "timed out");
        assert_eq!(error.to_string(), "Fetch error for http://a: timed out");

        let error = KensakuError::DuplicateDocument(7);
        assert_eq!(error.to_string(), "Duplicate document id: 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = KensakuError::from(io_error);

        match error {
            KensakuError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_per_document_classification() {
        assert!(KensakuError::extraction("no body").is_per_document());
        assert!(KensakuError::DuplicateDocument(1).is_per_document());
        assert!(!KensakuError::EmptyPattern.is_per_document());
    }
}
