//! The crawl pipeline: fetch a page and derive a normalized bookmark record
//! from it.
//!
//! [`WebsiteCrawler::crawl`] is the public entry point; it normalizes the
//! URL, fetches the document, and delegates to
//! [`WebsiteCrawler::crawl_with_html`], the network-free surface used by
//! tests and by callers that already hold the HTML. Fetch failures abort the
//! whole pipeline; every later stage degrades to empty or default values
//! because web content is inherently untrustworthy.

pub mod anchors;
pub mod dom;
pub mod links;
pub mod meta;
pub mod plugins;
pub mod readable;
pub mod reading_time;
pub mod sanitize;
pub mod tags;
pub mod url;

use crate::config::{Config, SchemeDefault};
use crate::fetcher::{self, CrawlError};
use crate::model::{BookmarkRecord, BookmarkType, CrawlerStatus, DEFAULT_READING_TIME, TagRef};
use plugins::SitePlugin;
use tracing::{debug, info, instrument};

pub struct WebsiteCrawler {
    client: reqwest::Client,
    plugins: Vec<Box<dyn SitePlugin>>,
    default_scheme: SchemeDefault,
}

impl WebsiteCrawler {
    pub fn new(config: &Config) -> Self {
        Self {
            client: fetcher::build_client(config),
            plugins: plugins::registry(),
            default_scheme: config.default_scheme(),
        }
    }

    /// Normalizes and validates the record's URL, fetches the page, and runs
    /// the full extraction pipeline over it.
    ///
    /// On [`CrawlError::NotFound`] / [`CrawlError::RetrieveFailed`] the
    /// record is left untouched apart from URL normalization; no partial
    /// extraction results leak out.
    #[instrument(skip_all, fields(url = %record.url))]
    pub async fn crawl(
        &self,
        record: &mut BookmarkRecord,
        known_tags: &[TagRef],
    ) -> Result<(), CrawlError> {
        record.url = url::clean_url_with(&record.url, self.default_scheme);

        if ::url::Url::parse(&record.url).is_err() {
            return Err(CrawlError::UrlInvalid(record.url.clone()));
        }

        let page = fetcher::fetch(&self.client, &record.url).await?;
        info!(
            status = page.status.as_u16(),
            bytes = page.body_utf8.len(),
            "fetched page"
        );

        self.crawl_with_html(record, &page.body_utf8, known_tags);
        Ok(())
    }

    /// The injectable pipeline: derives every record field from the given
    /// HTML without touching the network. Total: malformed or empty HTML
    /// yields sparse fields, never an error.
    pub fn crawl_with_html(&self, record: &mut BookmarkRecord, html: &str, known_tags: &[TagRef]) {
        record.url = url::clean_url_with(&record.url, self.default_scheme);

        if !html.is_empty() {
            self.apply_metadata(record, html);
        }

        // Site plugins: run every match, in registration order.
        let doc = dom::parse(html);
        for plugin in &self.plugins {
            if plugin.matches(&record.url) {
                debug!(plugin = plugin.name(), "running site plugin");
                plugin.apply(&doc, record);
            }
        }

        // No plugin handled the content, fall back to generic extraction.
        if record.content_is_empty()
            && let Some(content) = readable::extract(html, &record.url)
        {
            record.content = Some(content);
        }

        if let Some(content) = record.content.take() {
            let cleaned = sanitize::clean(&content);
            record.content = (!cleaned.is_empty()).then_some(cleaned);
        }

        record.crawler_status = if record.content_is_empty() {
            CrawlerStatus::NoRetrieve
        } else {
            CrawlerStatus::Retrieved
        };

        if !known_tags.is_empty()
            && let Some(content) = record.content.as_deref()
        {
            let found = tags::find_tags_on_text(known_tags, content);
            if !found.is_empty() {
                debug!(count = found.len(), "auto-tagged content");
            }
            record.add_tags(found);
        }

        if let Some(content) = record.content.take() {
            let content = links::handle_links(&content, &record.url);
            record.content = Some(anchors::handle_anchors(&content));
        }

        // Plugins may have computed a reading time already; only fill the
        // sentinel in.
        if record.reading_time == DEFAULT_READING_TIME {
            record.reading_time = reading_time::estimate(record);
        }
    }

    /// Head metadata: title, description, icon, preview picture, bookmark
    /// type and the free-form website info map.
    fn apply_metadata(&self, record: &mut BookmarkRecord, html: &str) {
        let page_meta = meta::extract_page_meta(html, &record.url);
        let og = meta::resolve_og(&page_meta.properties, &record.url);

        let author = meta::get_trimmed(&page_meta.names, "Author");
        let keywords = meta::get_trimmed(&page_meta.names, "Keywords");

        // Prefer the page's explicit meta description over og:description.
        let description = meta::get_trimmed(&page_meta.properties, "description")
            .or_else(|| og.description.clone());

        record.kind = BookmarkType::from_og_type(&og.og_type);

        record.website_info.insert("author".to_string(), author);
        record.website_info.insert("keywords".to_string(), keywords);
        record
            .website_info
            .insert("og:title".to_string(), og.title.clone());
        record
            .website_info
            .insert("og:type".to_string(), Some(og.og_type.clone()));
        record
            .website_info
            .insert("og:image".to_string(), og.image.clone());
        record
            .website_info
            .insert("og:description".to_string(), og.description.clone());

        // Auxiliary per-type details (article:published_time etc.); absent
        // keys are tolerated as null values.
        for (key, value) in meta::og_details_for_type(&og.og_type, &page_meta.properties) {
            record.website_info.insert(key, value);
        }

        if page_meta.icon.is_some() {
            record.icon = page_meta.icon;
        }

        if let Some(image) = og.image.filter(|i| !i.is_empty()) {
            record.preview_picture = Some(image);
        }

        record.title = Some(page_meta.title);
        record.description = description;
    }
}

impl Default for WebsiteCrawler {
    fn default() -> Self {
        Self {
            client: fetcher::get_client().clone(),
            plugins: plugins::registry(),
            default_scheme: SchemeDefault::Https,
        }
    }
}
