//! Integration tests for the command line workflow.

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use kensaku::cli::args::{Command, KensakuArgs};
use kensaku::cli::commands::{build_corpus, execute_command, load_dictionary};
use kensaku::config::KensakuConfig;
use kensaku::error::{KensakuError, Result};
use kensaku::index::IndexBackend;

fn write_fixture(dir: &Path) -> Result<()> {
    fs::create_dir(dir.join("pages"))?;
    fs::write(
        dir.join("pages/1.html"),
        "<html><head><title>数据结构</title></head><body>数据结构项目</body></html>",
    )?;
    fs::write(dir.join("pages/2.html"), "<body>项目项目数据</body>")?;
    fs::write(
        dir.join("url.csv"),
        "id,url\n1,\"1.html\"\n2,2.html\n3,\"missing.html\"\n",
    )?;
    fs::write(dir.join("words.dic"), "数据\n结构\r\n\n项目\n")?;
    fs::write(dir.join("query.txt"), "数据 结构\n项目\n\n不存在\n")?;
    Ok(())
}

fn path(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().to_string()
}

#[test]
fn test_run_writes_one_line_per_query() -> Result<()> {
    let dir = TempDir::new()?;
    write_fixture(dir.path())?;
    let output = path(dir.path(), "result.txt");

    let args = KensakuArgs::try_parse_from([
        "kensaku".to_string(),
        "-q".to_string(),
        "run".to_string(),
        "--urls".to_string(),
        path(dir.path(), "url.csv"),
        "--dictionary".to_string(),
        path(dir.path(), "words.dic"),
        "--root".to_string(),
        path(dir.path(), "pages"),
        "--threads".to_string(),
        "2".to_string(),
        "--queries".to_string(),
        path(dir.path(), "query.txt"),
        "--output".to_string(),
        output.clone(),
    ])
    .map_err(|e| KensakuError::invalid_argument(e.to_string()))?;
    assert!(matches!(args.command, Command::Run(_)));

    execute_command(args)?;

    let result = fs::read_to_string(&output)?;
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines, vec!["(1,4) (2,1) ", "(2,2) (1,1) ", "", ""]);

    Ok(())
}

#[test]
fn test_build_corpus_reports_failures() -> Result<()> {
    let dir = TempDir::new()?;
    write_fixture(dir.path())?;

    let args = KensakuArgs::try_parse_from([
        "kensaku".to_string(),
        "stats".to_string(),
        "-u".to_string(),
        path(dir.path(), "url.csv"),
        "-d".to_string(),
        path(dir.path(), "words.dic"),
        "--root".to_string(),
        path(dir.path(), "pages"),
        "-b".to_string(),
        "hash".to_string(),
    ])
    .map_err(|e| KensakuError::invalid_argument(e.to_string()))?;
    let Command::Stats(stats) = &args.command else {
        panic!("expected stats");
    };

    let (corpus, report) = build_corpus(&stats.build, &KensakuConfig::default())?;
    assert_eq!(report.total, 3);
    assert_eq!(report.indexed, 2);
    assert_eq!(report.failed[0].0, 3);
    assert_eq!(corpus.index().backend(), IndexBackend::Hash);
    assert_eq!(corpus.index().term_count(), 3);
    assert_eq!(
        corpus.index().top_terms(1)[0].0.as_string(),
        "数据"
    );

    Ok(())
}

#[test]
fn test_missing_url_batch_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let args = KensakuArgs::try_parse_from([
        "kensaku".to_string(),
        "-q".to_string(),
        "search".to_string(),
        "-u".to_string(),
        path(dir.path(), "absent.csv"),
        "数据".to_string(),
    ])
    .map_err(|e| KensakuError::invalid_argument(e.to_string()))?;

    assert!(matches!(execute_command(args), Err(KensakuError::Io(_))));
    Ok(())
}

#[test]
fn test_load_dictionary_merges_files() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("a.dic"), "数据\n结构\n")?;
    fs::write(dir.path().join("b.dic"), "结构\n挖掘机\n")?;

    let dictionary = load_dictionary(&[dir.path().join("a.dic"), dir.path().join("b.dic")])?;
    assert_eq!(dictionary.len(), 3);
    assert_eq!(dictionary.max_word_length(), 3);

    assert!(load_dictionary(&[dir.path().join("c.dic")]).is_err());
    Ok(())
}
