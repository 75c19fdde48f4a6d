//! Title and body extraction from a parsed page.

use serde::{Deserialize, Serialize};

use crate::error::{KensakuError, Result};
use crate::markup::MarkupNode;

/// Where to find the title and body of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Tag names tried in order for the title.
    pub title_tags: Vec<String>,

    /// Attribute token (e.g. `id="thread_subject"`) marking the title element.
    /// Takes precedence over `title_tags`.
    pub title_attribute: Option<String>,

    /// Attribute token (e.g. `class="t_f"`) marking the body element.
    /// A page without it fails extraction.
    pub body_attribute: Option<String>,

    /// Tag name of the body element when no attribute is configured.
    pub body_tag: String,

    /// Elements whose text is left out of titles and bodies.
    pub ignore_tags: Vec<String>,

    /// Whether the body is passed through the entity decoder.
    pub decode_entities: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_tags: vec!["title".to_string()],
            title_attribute: None,
            body_attribute: None,
            body_tag: "body".to_string(),
            ignore_tags: vec![
                "script".to_string(),
                "style".to_string(),
                "noscript".to_string(),
            ],
            decode_entities: true,
        }
    }
}

/// Raw title and body text of a page, before decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub body: String,
}

/// Pulls title and body text out of a markup tree.
///
/// # Examples
///
/// ```
/// use kensaku::document::{DocumentExtractor, ExtractionConfig};
/// use kensaku::markup::MarkupParser;
///
/// let root = MarkupParser::parse(
///     "<html><head><title>T</title></head><body>B<script>x()</script></body></html>",
/// );
/// let extracted = DocumentExtractor::new(ExtractionConfig::default())
///     .extract(&root)
///     .unwrap();
/// assert_eq!(extracted.title, "T");
/// assert_eq!(extracted.body, "B");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    config: ExtractionConfig,
}

impl DocumentExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract title and body from `root`.
    ///
    /// A missing title yields an empty title. The body falls back to the whole
    /// tree when no body element exists, unless `body_attribute` is set.
    pub fn extract(&self, root: &MarkupNode) -> Result<Extracted> {
        let ignore: Vec<&str> = self.config.ignore_tags.iter().map(String::as_str).collect();

        let title_node = match &self.config.title_attribute {
            Some(token) => root.elements_by_attribute(token).into_iter().next(),
            None => self
                .config
                .title_tags
                .iter()
                .find_map(|tag| root.elements_by_name(tag).into_iter().next()),
        };
        let title = title_node
            .map(|node| node.content(&ignore))
            .unwrap_or_default();

        let body_node = match &self.config.body_attribute {
            Some(token) => root
                .elements_by_attribute(token)
                .into_iter()
                .next()
                .ok_or_else(|| {
                    KensakuError::extraction(format!("no element with attribute {token}"))
                })?,
            None => root
                .elements_by_name(&self.config.body_tag)
                .into_iter()
                .next()
                .unwrap_or(root),
        };
        let body = body_node.content(&ignore);

        Ok(Extracted {
            title: title.trim().to_string(),
            body,
        })
    }
}
