//! Page retrieval collaborators.
//!
//! The pipeline never talks to the network itself: it asks a [`Fetcher`] for
//! the markup behind a URL. Timeouts, retries and politeness belong to the
//! fetcher implementation.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

/// Retrieves the markup of a page.
pub trait Fetcher: Send + Sync + fmt::Debug {
    /// Fetch `url` and return its markup as text.
    fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

/// Reads pages from the local filesystem.
///
/// URLs may be plain paths or `file://` URLs. Relative paths are resolved
/// against the configured root, if any.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve relative paths against `root`.
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// The file a URL refers to.
    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<String> {
        if url.contains("://") && !url.starts_with("file://") {
            bail!("unsupported scheme");
        }
        let path = self.resolve(url);
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Serves pages from an in-memory map of URL to markup.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the page served for `url`.
    pub fn insert<U: Into<String>, M: Into<String>>(&mut self, url: U, markup: M) {
        self.pages.insert(url.into(), markup.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_page<U: Into<String>, M: Into<String>>(mut self, url: U, markup: M) -> Self {
        self.insert(url, markup);
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<String> {
        match self.pages.get(url) {
            Some(markup) => Ok(markup.clone()),
            None => bail!("no page for {url}"),
        }
    }
}
