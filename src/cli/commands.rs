//! Command implementations for the kensaku CLI.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::analysis::{Dictionary, DictionarySegmenter, StopChars, Tokenizer, WhitespaceTokenizer};
use crate::batch::load_url_batch;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::KensakuConfig;
use crate::error::Result;
use crate::index::query::format_hits;
use crate::pipeline::{
    Corpus, Decoder, EntityDecoder, FileFetcher, IdentityDecoder, IndexingPipeline,
    IndexingReport,
};

/// Execute a CLI command.
pub fn execute_command(args: KensakuArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Run(run_args) => run_queries(run_args, &config, &args),
        Command::Search(search_args) => search_corpus(search_args, &config, &args),
        Command::Segment(segment_args) => segment_text(segment_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args),
    }
}

/// Configuration from `--config`, or the defaults.
fn load_config(args: &KensakuArgs) -> Result<KensakuConfig> {
    match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            KensakuConfig::from_file(path)
        }
        None => Ok(KensakuConfig::default()),
    }
}

/// Merge every dictionary file into one dictionary.
pub fn load_dictionary(paths: &[PathBuf]) -> Result<Dictionary> {
    let mut dictionary = Dictionary::new();
    for path in paths {
        dictionary.add_file(path)?;
    }
    Ok(dictionary)
}

/// Fetch, segment and index the URL batch named by `build`.
pub fn build_corpus(build: &BuildArgs, config: &KensakuConfig) -> Result<(Corpus, IndexingReport)> {
    let mut config = config.clone();
    build.apply(&mut config);

    let records = load_url_batch(&build.urls, !build.no_header)?;
    info!("Loaded {} URLs from {}", records.len(), build.urls.display());

    let dictionary = Arc::new(load_dictionary(&build.dictionary.dictionaries)?);
    let fetcher = match &build.root {
        Some(root) => FileFetcher::with_root(root),
        None => FileFetcher::new(),
    };
    let decoder: Arc<dyn Decoder> = if config.extraction.decode_entities {
        Arc::new(EntityDecoder)
    } else {
        Arc::new(IdentityDecoder)
    };

    let pipeline = IndexingPipeline::new(&config, dictionary, Arc::new(fetcher), decoder)?;
    let report = pipeline.index_batch(&records)?;
    Ok((pipeline.into_corpus(), report))
}

/// Answer every line of the query file and write one result line per query.
fn run_queries(args: &RunArgs, config: &KensakuConfig, cli_args: &KensakuArgs) -> Result<()> {
    let (corpus, report) = build_corpus(&args.build, config)?;

    let start_time = Instant::now();
    let reader = BufReader::new(File::open(&args.queries)?);
    let mut writer = BufWriter::new(File::create(&args.output)?);
    let mut queries = 0;

    for line in reader.lines() {
        let line = line?;
        let hits = corpus.query_str(line.trim_end_matches('\r'))?;
        writeln!(writer, "{}", format_hits(&hits))?;
        queries += 1;
    }
    writer.flush()?;

    output_result(
        "Queries completed",
        &RunResult {
            documents_indexed: report.indexed,
            documents_failed: report.failed_count(),
            queries,
            result_file: args.output.to_string_lossy().to_string(),
            indexing_ms: report.elapsed.as_millis() as u64,
            query_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Run a single query and show the best hits with their titles.
fn search_corpus(args: &SearchArgs, config: &KensakuConfig, cli_args: &KensakuArgs) -> Result<()> {
    let (corpus, _) = build_corpus(&args.build, config)?;

    let start_time = Instant::now();
    let hits = corpus.query_str(&args.query)?;
    let duration = start_time.elapsed();

    let shown = hits
        .iter()
        .take(args.limit)
        .map(|hit| {
            let (title, url) = corpus
                .document(hit.doc_id)
                .map(|doc| (doc.title().as_string(), doc.url().to_string()))
                .unwrap_or_default();
            SearchHit {
                doc_id: hit.doc_id,
                total: hit.total,
                coverage: hit.coverage,
                title,
                url,
            }
        })
        .collect();

    output_result(
        "Search completed",
        &SearchResults {
            query: WhitespaceTokenizer::new()
                .tokenize(&args.query)?
                .map(|token| token.text)
                .collect(),
            hits: shown,
            total_hits: hits.len(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Segment text without building a corpus.
fn segment_text(args: &SegmentArgs, config: &KensakuConfig, cli_args: &KensakuArgs) -> Result<()> {
    let dictionary = Arc::new(load_dictionary(&args.dictionary.dictionaries)?);
    let stop_chars = StopChars::new(config.segmenter.stop_chars.iter().copied());
    let segmenter = DictionarySegmenter::with_stop_chars(dictionary, stop_chars);

    let words = segmenter
        .tokenize(&args.text)?
        .map(|token| token.text)
        .collect();

    output_result(
        "Segmentation completed",
        &SegmentResult {
            text: args.text.clone(),
            words,
        },
        cli_args,
    )
}

/// Show document and term counts and the most frequent terms.
fn show_stats(args: &StatsArgs, config: &KensakuConfig, cli_args: &KensakuArgs) -> Result<()> {
    let (corpus, report) = build_corpus(&args.build, config)?;
    let index = corpus.index();

    let top_terms = index
        .top_terms(args.top)
        .into_iter()
        .map(|(term, occurrences)| TermStats {
            documents: index.term(&term).map(|t| t.document_count()).unwrap_or(0),
            term: term.as_string(),
            occurrences,
        })
        .collect();

    output_result(
        "Statistics collected",
        &CorpusStats {
            backend: index.backend().to_string(),
            total_documents: corpus.document_count(),
            failed_documents: report.failed_count(),
            total_terms: index.term_count(),
            top_terms,
        },
        cli_args,
    )
}
