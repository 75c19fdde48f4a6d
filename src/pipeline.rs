//! Parallel corpus indexing.
//!
//! An [`IndexingPipeline`] takes a batch of `(id, url)` records, fetches and
//! parses every page on a fixed-size worker pool, and commits each finished
//! document into a shared [`Corpus`]. Fetching, parsing, extraction and
//! segmentation run without synchronization; only the commit of a document
//! (duplicate check, postings update, table insert) holds the corpus lock.
//!
//! Pages that cannot be fetched or extracted are dropped and listed in the
//! [`IndexingReport`]; the rest of the batch carries on.

pub mod config;
pub mod corpus;
pub mod decode;
pub mod engine;
pub mod fetch;
pub mod report;

pub use config::PipelineConfig;
pub use corpus::Corpus;
pub use decode::{Decoder, EntityDecoder, IdentityDecoder};
pub use engine::IndexingPipeline;
pub use fetch::{Fetcher, FileFetcher, MemoryFetcher};
pub use report::IndexingReport;
