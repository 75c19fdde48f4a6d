//! The parallel indexing engine.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};
use parking_lot::{Mutex, MutexGuard};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::config::PipelineConfig;
use super::corpus::Corpus;
use super::decode::Decoder;
use super::fetch::Fetcher;
use super::report::IndexingReport;
use crate::DocId;
use crate::analysis::{Dictionary, DictionarySegmenter, StopChars, Tokenizer};
use crate::batch::UrlRecord;
use crate::collections::LinkedList;
use crate::config::KensakuConfig;
use crate::document::{Document, DocumentExtractor};
use crate::error::{KensakuError, Result};
use crate::markup::MarkupParser;
use crate::text::Text;

/// Outcome of one record, tagged with its position in the batch.
type Outcome = (usize, DocId, Result<()>);

/// Builds a [`Corpus`] from URL batches on a fixed-size worker pool.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use kensaku::analysis::Dictionary;
/// use kensaku::batch::UrlRecord;
/// use kensaku::config::KensakuConfig;
/// use kensaku::pipeline::{EntityDecoder, IndexingPipeline, MemoryFetcher};
///
/// let mut dictionary = Dictionary::new();
/// dictionary.add_words(["数据", "结构"]);
/// let fetcher = MemoryFetcher::new()
///     .with_page("p1", "<title>数据结构</title><body>数据&amp;结构</body>");
///
/// let pipeline = IndexingPipeline::new(
///     &KensakuConfig::default(),
///     Arc::new(dictionary),
///     Arc::new(fetcher),
///     Arc::new(EntityDecoder),
/// )
/// .unwrap();
/// let report = pipeline.index_batch(&[UrlRecord::new(1, "p1")]).unwrap();
/// assert_eq!(report.indexed, 1);
///
/// let corpus = pipeline.into_corpus();
/// assert_eq!(corpus.query_str("数据").unwrap()[0].total, 2);
/// ```
pub struct IndexingPipeline {
    config: PipelineConfig,
    thread_pool: ThreadPool,
    segmenter: DictionarySegmenter,
    extractor: DocumentExtractor,
    fetcher: Arc<dyn Fetcher>,
    decoder: Arc<dyn Decoder>,
    corpus: Mutex<Corpus>,
}

impl IndexingPipeline {
    /// Create a pipeline with an empty corpus.
    pub fn new(
        config: &KensakuConfig,
        dictionary: Arc<Dictionary>,
        fetcher: Arc<dyn Fetcher>,
        decoder: Arc<dyn Decoder>,
    ) -> Result<Self> {
        let pipeline_config = config.pipeline.clone();
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(pipeline_config.worker_count())
            .thread_name(|i| format!("kensaku-index-{i}"))
            .build()
            .map_err(|e| KensakuError::ThreadPool(format!("Failed to create thread pool: {e}")))?;

        let stop_chars = StopChars::new(config.segmenter.stop_chars.iter().copied());

        Ok(IndexingPipeline {
            config: pipeline_config,
            thread_pool,
            segmenter: DictionarySegmenter::with_stop_chars(dictionary, stop_chars),
            extractor: DocumentExtractor::new(config.extraction.clone()),
            fetcher,
            decoder,
            corpus: Mutex::new(Corpus::new(config.index.backend)),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    pub fn segmenter(&self) -> &DictionarySegmenter {
        &self.segmenter
    }

    /// Fetch, segment and commit every record of `records`.
    ///
    /// Records are processed in parallel with no ordering between them.
    /// Failed records are dropped and listed in the report in batch order.
    /// When partial failures are disallowed, the first failure is returned
    /// instead, after the whole batch has run.
    pub fn index_batch(&self, records: &[UrlRecord]) -> Result<IndexingReport> {
        let started = Instant::now();
        let (tx, rx) = crossbeam_channel::unbounded::<Outcome>();

        self.thread_pool.scope(|scope| {
            for (position, record) in records.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let outcome = self.process_record(record);
                    let _ = tx.send((position, record.id, outcome));
                });
            }
        });
        drop(tx);

        let report = self.collect(records.len(), rx.into_iter().collect(), started);
        self.finish(report)
    }

    /// Commit already segmented documents, in parallel.
    pub fn index_documents(&self, documents: Vec<Document>) -> Result<IndexingReport> {
        let started = Instant::now();
        let total = documents.len();

        let outcomes: Vec<Outcome> = self.thread_pool.install(|| {
            documents
                .into_par_iter()
                .enumerate()
                .map(|(position, document)| {
                    let id = document.id();
                    (position, id, self.commit(document))
                })
                .collect()
        });

        let report = self.collect(total, outcomes, started);
        self.finish(report)
    }

    /// Read access to the corpus. Holding the guard blocks commits.
    pub fn corpus(&self) -> MutexGuard<'_, Corpus> {
        self.corpus.lock()
    }

    /// Consume the pipeline, keeping the corpus.
    pub fn into_corpus(self) -> Corpus {
        self.corpus.into_inner()
    }

    /// Turn one record into a committed document.
    fn process_record(&self, record: &UrlRecord) -> Result<()> {
        let markup = self
            .fetcher
            .fetch(&record.url)
            .map_err(|e| KensakuError::fetch(&record.url, format!("{e:#}")))?;

        let root = MarkupParser::parse(&markup);
        let extracted = self.extractor.extract(&root)?;
        let body = if self.extractor.config().decode_entities {
            self.decoder.decode(&extracted.body)
        } else {
            extracted.body
        };

        let sentence = format!("{body}{}", extracted.title);
        let words: LinkedList<Text> = self
            .segmenter
            .tokenize(&sentence)?
            .map(|token| token.to_text())
            .collect();

        let title = Text::from(extracted.title);
        let document =
            Document::new(record.id, title, Text::from(body), words).with_url(&record.url);
        self.commit(document)
    }

    /// Count words outside the lock, then commit under it.
    fn commit(&self, document: Document) -> Result<()> {
        let id = document.id();
        let counts = document.word_counts();
        let distinct = counts.len();

        self.corpus.lock().commit(document, &counts)?;
        debug!("Committed document {id} ({distinct} distinct words)");
        Ok(())
    }

    fn collect(&self, total: usize, mut outcomes: Vec<Outcome>, started: Instant) -> IndexingReport {
        outcomes.sort_by_key(|(position, _, _)| *position);

        let mut report = IndexingReport {
            total,
            ..Default::default()
        };
        for (_, doc_id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.indexed += 1,
                Err(e) => {
                    if e.is_per_document() {
                        warn!("Dropping document {doc_id}: {e}");
                    } else {
                        error!("Document {doc_id} failed: {e}");
                    }
                    report.failed.push((doc_id, e));
                }
            }
        }
        report.elapsed = started.elapsed();

        info!(
            "Indexed {}/{} documents ({} failed) in {:?}",
            report.indexed,
            report.total,
            report.failed_count(),
            report.elapsed
        );
        report
    }

    fn finish(&self, mut report: IndexingReport) -> Result<IndexingReport> {
        if !self.config.allow_partial_failures && !report.failed.is_empty() {
            let (_, error) = report.failed.swap_remove(0);
            return Err(error);
        }
        Ok(report)
    }
}

impl std::fmt::Debug for IndexingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexingPipeline")
            .field("config", &self.config)
            .field("workers", &self.worker_count())
            .field("fetcher", &self.fetcher)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::pipeline::{EntityDecoder, IdentityDecoder, MemoryFetcher};

    fn dictionary() -> Arc<Dictionary> {
        let mut dictionary = Dictionary::new();
        dictionary.add_words(["挖掘机", "维修", "发动机", "液压", "系统"]);
        Arc::new(dictionary)
    }

    fn fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_page(
                "p1",
                "<html><head><title>挖掘机维修</title></head><body>发动机液压系统</body></html>",
            )
            .with_page("p2", "<body>液压系统，液压&amp;维修</body>")
            .with_page("p3", "<body>发动机</body>")
    }

    fn pipeline(config: KensakuConfig, fetcher: MemoryFetcher) -> IndexingPipeline {
        IndexingPipeline::new(
            &config,
            dictionary(),
            Arc::new(fetcher),
            Arc::new(EntityDecoder),
        )
        .unwrap()
    }

    fn config(workers: usize) -> KensakuConfig {
        let mut config = KensakuConfig::default();
        config.pipeline.thread_pool_size = Some(workers);
        config
    }

    fn records() -> Vec<UrlRecord> {
        vec![
            UrlRecord::new(1, "p1"),
            UrlRecord::new(2, "p2"),
            UrlRecord::new(3, "p3"),
        ]
    }

    #[test]
    fn test_index_batch() {
        let pipeline = pipeline(config(2), fetcher());
        assert_eq!(pipeline.worker_count(), 2);

        let report = pipeline.index_batch(&records()).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.indexed, 3);
        assert!(report.is_complete());

        let corpus = pipeline.corpus();
        let p1 = corpus.document(1).unwrap();
        assert_eq!(p1.title().as_string(), "挖掘机维修");
        assert_eq!(p1.body().as_string(), "发动机液压系统");
        assert_eq!(p1.url(), "p1");
        let words: Vec<String> = p1.words().iter().map(Text::as_string).collect();
        assert_eq!(words, vec!["发动机", "液压", "系统", "挖掘机", "维修"]);

        let p2 = corpus.document(2).unwrap();
        assert_eq!(p2.body().as_string(), "液压系统，液压&维修");
        assert_eq!(p2.count_word(&Text::from("液压")), 2);

        let hits = corpus.query_str("液压 维修").unwrap();
        let ranked: Vec<(DocId, usize)> = hits.iter().map(|h| (h.doc_id, h.total)).collect();
        assert_eq!(ranked.len(), 2);
        assert!(ranked.contains(&(1, 2)));
        assert!(ranked.contains(&(2, 3)));
    }

    #[test]
    fn test_failures_are_dropped_and_reported() {
        let pipeline = pipeline(config(4), fetcher());
        let mut batch = records();
        batch.push(UrlRecord::new(4, "missing"));
        batch.push(UrlRecord::new(1, "p3"));

        // one of the two records with id 1 loses the race
        let report = pipeline.index_batch(&batch).unwrap();
        assert_eq!(report.total, 5);
        assert_eq!(report.indexed, 3);
        assert_eq!(report.failed_count(), 2);
        assert!(report.failed.iter().any(|(id, e)| {
            *id == 4 && matches!(e, KensakuError::Fetch { .. })
        }));
        assert!(report.failed.iter().any(|(id, e)| {
            *id == 1 && matches!(e, KensakuError::DuplicateDocument(1))
        }));

        let corpus = pipeline.corpus();
        assert!(corpus.document(4).is_none());
        assert_eq!(corpus.document_count(), 3);
    }

    #[test]
    fn test_disallowed_partial_failures() {
        let mut config = config(1);
        config.pipeline.allow_partial_failures = false;
        let pipeline = pipeline(config, fetcher());

        let batch = vec![UrlRecord::new(1, "p1"), UrlRecord::new(2, "nowhere")];
        let result = pipeline.index_batch(&batch);
        assert!(matches!(result, Err(KensakuError::Fetch { .. })));
        assert_eq!(pipeline.corpus().document_count(), 1);
    }

    #[test]
    fn test_extraction_failure() {
        let mut config = config(1);
        config.extraction.body_attribute = Some("class=\"t_f\"".to_string());
        let pipeline = pipeline(config, fetcher());

        let report = pipeline.index_batch(&[UrlRecord::new(1, "p1")]).unwrap();
        assert_eq!(report.indexed, 0);
        assert!(matches!(report.failed[0].1, KensakuError::Extraction(_)));
    }

    #[test]
    fn test_decoding_disabled() {
        let mut config = config(1);
        config.extraction.decode_entities = false;
        let pipeline = IndexingPipeline::new(
            &config,
            dictionary(),
            Arc::new(fetcher()),
            Arc::new(IdentityDecoder),
        )
        .unwrap();
        pipeline.index_batch(&[UrlRecord::new(2, "p2")]).unwrap();
        let corpus = pipeline.into_corpus();
        assert_eq!(
            corpus.document(2).unwrap().body().as_string(),
            "液压系统，液压&amp;维修"
        );
    }

    #[test]
    fn test_index_documents() {
        let pipeline = pipeline(config(3), MemoryFetcher::new());
        let documents = vec![
            Document::from_words(1, ["a", "b"]),
            Document::from_words(2, ["a"]),
            Document::from_words(2, ["b"]),
        ];
        let report = pipeline.index_documents(documents).unwrap();
        assert_eq!(report.indexed, 2);
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].1, KensakuError::DuplicateDocument(2)));

        let empty = pipeline.index_batch(&[]).unwrap();
        assert_eq!(empty.total, 0);
        assert_eq!(empty.indexed, 0);
    }
}
