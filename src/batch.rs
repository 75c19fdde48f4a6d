//! URL batch files.
//!
//! A batch is a comma-separated file of `id,url` lines, optionally preceded
//! by a header line. Extra fields are ignored and fields may be quoted:
//!
//! ```text
//! id,url
//! 1,"https://bbs.example.com/thread-1.html"
//! 2,https://bbs.example.com/thread-2.html
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Serialize;

use crate::DocId;
use crate::error::{KensakuError, Result};

/// One page to index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRecord {
    pub id: DocId,
    pub url: String,
}

impl UrlRecord {
    pub fn new<S: Into<String>>(id: DocId, url: S) -> Self {
        UrlRecord {
            id,
            url: url.into(),
        }
    }
}

/// Read a batch file.
pub fn load_url_batch<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Vec<UrlRecord>> {
    let file = File::open(path.as_ref())?;
    parse_url_batch(file, has_header)
}

/// Read a batch from any reader.
///
/// Lines with fewer than two fields or a non-numeric id are rejected with a
/// parse error naming the line.
///
/// # Examples
///
/// ```
/// use kensaku::batch::{UrlRecord, parse_url_batch};
///
/// let batch = "id,url\n7,\"http://a/7\"\n";
/// let records = parse_url_batch(batch.as_bytes(), true).unwrap();
/// assert_eq!(records, vec![UrlRecord::new(7, "http://a/7")]);
/// ```
pub fn parse_url_batch<R: Read>(reader: R, has_header: bool) -> Result<Vec<UrlRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let (Some(id), Some(url)) = (row.get(0), row.get(1)) else {
            return Err(KensakuError::parse(format!(
                "line {line}: expected `id,url`, found {} field(s)",
                row.len()
            )));
        };
        let id = strip_quotes(id.trim());
        let id: DocId = id.parse().map_err(|e| {
            KensakuError::parse(format!("line {line}: invalid document id {id:?}: {e}"))
        })?;

        records.push(UrlRecord::new(id, strip_quotes(skip_indent(url))));
    }
    Ok(records)
}

/// Skip the spaces and tabs that may precede a field.
fn skip_indent(field: &str) -> &str {
    field.trim_start_matches([' ', '\t'])
}

/// Remove one enclosing pair of double quotes.
fn strip_quotes(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(field)
}
