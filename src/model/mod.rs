//! Value types produced and mutated by the crawl pipeline.
//!
//! A [`BookmarkRecord`] is constructed by the caller with at least a URL,
//! threaded through every pipeline stage, and handed back. Persistence is a
//! collaborator concern; nothing in this crate stores records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reading time sentinel: the crawl has not computed a duration yet.
pub const DEFAULT_READING_TIME: i64 = -1;

/// Inferred kind of a bookmarked page. Never user-required; the crawler
/// always sets one, defaulting to [`BookmarkType::Website`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkType {
    #[default]
    Website,
    Article,
    Video,
    Music,
    Code,
    Game,
    Slide,
    Image,
}

impl BookmarkType {
    /// Maps an `og:type` value to a bookmark type. Unknown or missing types
    /// fall back to `Website`.
    pub fn from_og_type(og_type: &str) -> Self {
        match og_type {
            "website" => Self::Website,
            "article" => Self::Article,
            "video" => Self::Video,
            "music" => Self::Music,
            _ => Self::Website,
        }
    }
}

/// Outcome classification of a fetch+extract attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrawlerStatus {
    /// No readable body content was retrieved. Not an error; callers decide
    /// whether a sparse record is acceptable.
    #[default]
    NoRetrieve,
    /// Content was retrieved but is known to be broken. Set by callers after
    /// review, never by the pipeline itself.
    ContentBug,
    /// Content was retrieved successfully.
    Retrieved,
}

/// Reference to a caller-owned tag. Identity is the name; the auto-tagger
/// only consumes these, it never creates or persists tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub name: String,
}

impl TagRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The pipeline's working value and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRecord {
    /// Canonical URL, post-normalization.
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute URL of the site icon.
    pub icon: Option<String>,
    /// Absolute URL of the preview image (usually `og:image`).
    pub preview_picture: Option<String>,
    #[serde(rename = "type")]
    pub kind: BookmarkType,
    /// Sanitized readable HTML body, wrapped in a minimal shell with an
    /// explicit UTF-8 charset declaration.
    pub content: Option<String>,
    /// Free-form extracted metadata keyed by stable Open-Graph-style names.
    pub website_info: BTreeMap<String, Option<String>>,
    /// Estimated reading time in minutes; `-1` until computed.
    pub reading_time: i64,
    pub crawler_status: CrawlerStatus,
    pub tags: Vec<TagRef>,
}

impl BookmarkRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            icon: None,
            preview_picture: None,
            kind: BookmarkType::Website,
            content: None,
            website_info: BTreeMap::new(),
            reading_time: DEFAULT_READING_TIME,
            crawler_status: CrawlerStatus::NoRetrieve,
            tags: Vec::new(),
        }
    }

    /// True when no extracted content is available.
    pub fn content_is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(|c| c.is_empty())
    }

    /// Adds a tag unless one with the same name is already present.
    pub fn add_tag(&mut self, tag: TagRef) {
        if !self.tags.iter().any(|t| t.name == tag.name) {
            self.tags.push(tag);
        }
    }

    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = TagRef>) {
        for tag in tags {
            self.add_tag(tag);
        }
    }
}

/// Transient Open Graph data collected per crawl and discarded after
/// orchestration. See <http://ogp.me/>.
#[derive(Debug, Clone)]
pub struct OgData {
    pub title: Option<String>,
    /// `og:type`; defaults to `"website"` and is only overridden when the
    /// page declares one.
    pub og_type: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl Default for OgData {
    fn default() -> Self {
        Self {
            title: None,
            og_type: "website".to_string(),
            image: None,
            description: None,
        }
    }
}
