//! Command line argument parsing for the kensaku CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::KensakuConfig;
use crate::index::IndexBackend;

/// Kensaku - inverted index builder and ranked query engine for scraped pages
#[derive(Parser, Debug, Clone)]
#[command(name = "kensaku")]
#[command(about = "Build an inverted index over scraped pages and run ranked queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KensakuArgs {
    /// Verbosity level (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", env = "KENSAKU_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KensakuArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Index a URL batch and answer a file of queries
    Run(RunArgs),

    /// Index a URL batch and run a single query
    Search(SearchArgs),

    /// Segment text with the dictionaries
    Segment(SegmentArgs),

    /// Index a URL batch and show corpus statistics
    Stats(StatsArgs),
}

/// Dictionary files shared by every command that segments text.
#[derive(Args, Debug, Clone, Default)]
pub struct DictionaryArgs {
    /// Dictionary file, one word per line (repeatable)
    #[arg(short = 'd', long = "dictionary", value_name = "DICTIONARY_FILE")]
    pub dictionaries: Vec<PathBuf>,
}

/// Arguments for building a corpus from a URL batch
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// URL batch file (`id,url` per line)
    #[arg(short, long, value_name = "URL_FILE")]
    pub urls: PathBuf,

    /// The URL batch has no header line
    #[arg(long)]
    pub no_header: bool,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Directory relative page paths are resolved against
    #[arg(long, value_name = "DIRECTORY")]
    pub root: Option<PathBuf>,

    /// Number of indexing threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Index backend
    #[arg(short, long)]
    pub backend: Option<IndexBackend>,
}

impl BuildArgs {
    /// Apply command line overrides on top of `config`.
    pub fn apply(&self, config: &mut KensakuConfig) {
        if let Some(threads) = self.threads {
            config.pipeline.thread_pool_size = Some(threads);
        }
        if let Some(backend) = self.backend {
            config.index.backend = backend;
        }
    }
}

/// Arguments for the batch query run
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Query file, one space-delimited query per line
    #[arg(long, value_name = "QUERY_FILE")]
    pub queries: PathBuf,

    /// Result file, one line of `(id,total) ` tokens per query
    #[arg(short, long, value_name = "RESULT_FILE", default_value = "result.txt")]
    pub output: PathBuf,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Space-delimited query terms
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to show
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for segmentation
#[derive(Parser, Debug, Clone)]
pub struct SegmentArgs {
    /// Text to segment
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Number of most frequent terms to list
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args() {
        let args = KensakuArgs::try_parse_from([
            "kensaku",
            "run",
            "--urls",
            "url.csv",
            "-d",
            "words.dic",
            "--dictionary",
            "extra.dic",
            "--queries",
            "query.txt",
            "--threads",
            "16",
            "--backend",
            "hash",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
        let Command::Run(run) = &args.command else {
            panic!("expected run");
        };
        assert_eq!(run.build.dictionary.dictionaries.len(), 2);
        assert_eq!(run.output, PathBuf::from("result.txt"));
        assert!(!run.build.no_header);

        let mut config = KensakuConfig::default();
        run.build.apply(&mut config);
        assert_eq!(config.pipeline.thread_pool_size, Some(16));
        assert_eq!(config.index.backend, IndexBackend::Hash);
    }

    #[test]
    fn test_global_flags_and_verbosity() {
        let args = KensakuArgs::try_parse_from([
            "kensaku", "segment", "数据结构", "-vv", "-f", "json", "--pretty",
        ])
        .unwrap();
        assert_eq!(args.verbosity(), 3);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert!(matches!(args.command, Command::Segment(ref s) if s.text == "数据结构"));

        let args = KensakuArgs::try_parse_from(["kensaku", "-q", "-v", "segment", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_missing_required_arguments() {
        assert!(KensakuArgs::try_parse_from(["kensaku", "search", "数据"]).is_err());
        assert!(KensakuArgs::try_parse_from(["kensaku", "run", "--urls", "u.csv"]).is_err());
        assert!(
            KensakuArgs::try_parse_from(["kensaku", "stats", "-u", "u.csv", "-b", "btree"])
                .is_err()
        );
    }
}
