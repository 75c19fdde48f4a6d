//! Output formatting for CLI commands.

use std::collections::HashSet;
use std::io::{self, Write};

use serde::Serialize;

use crate::DocId;
use crate::cli::args::{KensakuArgs, OutputFormat};
use crate::error::Result;

/// Result of a batch query run.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub documents_indexed: usize,
    pub documents_failed: usize,
    pub queries: usize,
    pub result_file: String,
    pub indexing_ms: u64,
    pub query_ms: u64,
}

/// One displayed search hit.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub total: usize,
    pub coverage: usize,
    pub title: String,
    pub url: String,
}

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: Vec<String>,
    pub hits: Vec<SearchHit>,
    pub total_hits: usize,
    pub duration_ms: u64,
}

impl SearchResults {
    /// Query terms counted once each, the way hit coverage counts them.
    pub fn distinct_terms(&self) -> usize {
        self.query.iter().collect::<HashSet<_>>().len()
    }
}

/// Words produced by the segmenter.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub text: String,
    pub words: Vec<String>,
}

/// A frequent term.
#[derive(Debug, Serialize)]
pub struct TermStats {
    pub term: String,
    pub occurrences: usize,
    pub documents: usize,
}

/// Corpus statistics.
#[derive(Debug, Serialize)]
pub struct CorpusStats {
    pub backend: String,
    pub total_documents: usize,
    pub failed_documents: usize,
    pub total_terms: usize,
    pub top_terms: Vec<TermStats>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for RunResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Documents indexed: {}", self.documents_indexed)?;
        writeln!(out, "Documents failed: {}", self.documents_failed)?;
        writeln!(out, "Queries: {}", self.queries)?;
        writeln!(out, "Results written to: {}", self.result_file)?;
        writeln!(
            out,
            "Indexing time: {}ms, query time: {}ms",
            self.indexing_ms, self.query_ms
        )
    }
}

impl HumanOutput for SearchResults {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Search Results:")?;
        writeln!(out, "═══════════════")?;

        for (i, hit) in self.hits.iter().enumerate() {
            writeln!(out)?;
            writeln!(
                out,
                "Result {}: document {} ({} occurrences, {} of {} terms)",
                i + 1,
                hit.doc_id,
                hit.total,
                hit.coverage,
                self.distinct_terms()
            )?;
            writeln!(out, "─────────────")?;
            if !hit.title.is_empty() {
                writeln!(out, "title: {}", hit.title)?;
            }
            if !hit.url.is_empty() {
                writeln!(out, "url: {}", hit.url)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Total hits: {}", self.total_hits)?;
        writeln!(out, "Search time: {}ms", self.duration_ms)
    }
}

impl HumanOutput for SegmentResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.words.join(" "))
    }
}

impl HumanOutput for CorpusStats {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Corpus Statistics:")?;
        writeln!(out, "══════════════════")?;
        writeln!(out, "Index backend: {}", self.backend)?;
        writeln!(out, "Total documents: {}", self.total_documents)?;
        writeln!(out, "Failed documents: {}", self.failed_documents)?;
        writeln!(out, "Total terms: {}", self.total_terms)?;

        if !self.top_terms.is_empty() {
            writeln!(out)?;
            writeln!(out, "Top Terms:")?;
            writeln!(out, "──────────")?;
            for term in &self.top_terms {
                writeln!(
                    out,
                    "  {} ({} occurrences in {} documents)",
                    term.term, term.occurrences, term.documents
                )?;
            }
        }
        Ok(())
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T>(message: &str, result: &T, args: &KensakuArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result to `out` in the selected format.
pub fn write_result<T>(out: &mut dyn Write, message: &str, result: &T, args: &KensakuArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    fn args(extra: &[&str]) -> KensakuArgs {
        let mut argv = vec!["kensaku"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["segment", "x"]);
        KensakuArgs::try_parse_from(argv).unwrap()
    }

    fn render<T: Serialize + HumanOutput>(result: &T, args: &KensakuArgs) -> String {
        let mut out = Vec::new();
        write_result(&mut out, "Done", result, args).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_human_segment() {
        let result = SegmentResult {
            text: "数据结构".to_string(),
            words: vec!["数据".to_string(), "结构".to_string()],
        };
        assert_eq!(render(&result, &args(&[])), "数据 结构\n");
        assert!(render(&result, &args(&["-v"])).starts_with("Done\n\n"));
    }

    #[test]
    fn test_json_output() {
        let result = SearchResults {
            query: vec!["a".to_string()],
            hits: vec![SearchHit {
                doc_id: 3,
                total: 2,
                coverage: 1,
                title: "T".to_string(),
                url: String::new(),
            }],
            total_hits: 1,
            duration_ms: 0,
        };
        let rendered = render(&result, &args(&["-f", "json"]));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["hits"][0]["doc_id"], 3);
        assert_eq!(value["total_hits"], 1);
        assert_eq!(rendered.lines().count(), 1);

        let pretty = render(&result, &args(&["-f", "json", "--pretty"]));
        assert!(pretty.lines().count() > 1);
    }

    #[test]
    fn test_human_search_counts_repeated_terms_once() {
        let result = SearchResults {
            query: vec!["数据".to_string(), "结构".to_string(), "数据".to_string()],
            hits: vec![SearchHit {
                doc_id: 7,
                total: 5,
                coverage: 2,
                title: "数据结构".to_string(),
                url: String::new(),
            }],
            total_hits: 1,
            duration_ms: 0,
        };
        assert_eq!(result.distinct_terms(), 2);

        let rendered = render(&result, &args(&[]));
        assert!(rendered.contains("Result 1: document 7 (5 occurrences, 2 of 2 terms)"));
        assert!(rendered.contains("title: 数据结构"));
        assert!(!rendered.contains("url:"));
    }

    #[test]
    fn test_human_stats() {
        let stats = CorpusStats {
            backend: "tree".to_string(),
            total_documents: 2,
            failed_documents: 0,
            total_terms: 5,
            top_terms: vec![TermStats {
                term: "数据".to_string(),
                occurrences: 4,
                documents: 2,
            }],
        };
        let rendered = render(&stats, &args(&[]));
        assert!(rendered.contains("Total terms: 5"));
        assert!(rendered.contains("  数据 (4 occurrences in 2 documents)"));
    }
}
