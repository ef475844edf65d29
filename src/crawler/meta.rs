//! Metadata extraction: standard `<meta name>` tags, Open Graph
//! `<meta property>` tags, the document title and icon links.

use crate::crawler::links;
use crate::model::OgData;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head > meta").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head > title").unwrap());
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("link").unwrap());

/// `rel` values that mark a site icon.
const ICON_RELS: [&str; 3] = ["icon", "shortcut icon", "apple-touch-icon"];

/// Everything read from a document's head in one parse.
#[derive(Debug, Default)]
pub struct PageMeta {
    /// `<head><title>` text, trimmed; `"Unknown title"` when absent.
    pub title: String,
    /// `<meta name=... content=...>` pairs, keys case-preserved, last wins.
    pub names: BTreeMap<String, String>,
    /// `<meta property=... content=...>` pairs (Open Graph convention).
    pub properties: BTreeMap<String, String>,
    /// Absolute URL of the last icon `<link>`, if any.
    pub icon: Option<String>,
}

pub fn extract_page_meta(html: &str, page_url: &str) -> PageMeta {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Unknown title".to_string());

    let mut names = BTreeMap::new();
    let mut properties = BTreeMap::new();
    for element in document.select(&META_SELECTOR) {
        let Some(content) = element.value().attr("content") else {
            continue;
        };
        if let Some(name) = element.value().attr("name") {
            names.insert(name.to_string(), content.to_string());
        }
        if let Some(property) = element.value().attr("property") {
            properties.insert(property.to_string(), content.to_string());
        }
    }

    let mut icon = None;
    for element in document.select(&LINK_SELECTOR) {
        let rel = element.value().attr("rel").unwrap_or("");
        if ICON_RELS.contains(&rel)
            && let Some(href) = element.value().attr("href")
        {
            icon = Some(links::real_link(href, page_url));
        }
    }

    PageMeta {
        title,
        names,
        properties,
        icon,
    }
}

/// The value at `key`, trimmed, when present and non-empty.
pub fn get_trimmed(map: &BTreeMap<String, String>, key: &str) -> Option<String> {
    map.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds the transient Open Graph value for a page. `og:image` is resolved
/// to absolute form; `og:type` keeps its `"website"` default unless the page
/// declares one.
pub fn resolve_og(properties: &BTreeMap<String, String>, page_url: &str) -> OgData {
    let defaults = OgData::default();
    OgData {
        title: get_trimmed(properties, "og:title"),
        description: get_trimmed(properties, "og:description"),
        image: get_trimmed(properties, "og:image")
            .map(|image| links::real_link(&image, page_url)),
        og_type: get_trimmed(properties, "og:type").unwrap_or(defaults.og_type),
    }
}

/// Documented extra property keys per Open Graph object type.
/// See <http://ogp.me/>.
fn og_detail_keys(og_type: &str) -> &'static [&'static str] {
    match og_type {
        "article" => &[
            "article:published_time",
            "article:modified_time",
            "article:expiration_time",
            "article:author",
            "article:section",
            "article:tag",
        ],
        "book" => &["book:author", "book:isbn", "book:release_date", "book:tag"],
        "profile" => &[
            "profile:first_name",
            "profile:last_name",
            "profile:username",
            "profile:gender",
        ],
        "music.song" => &[
            "music:duration",
            "music:album",
            "music:album:disc",
            "music:album:track",
            "music:musician",
        ],
        "music.album" => &[
            "music:song",
            "music:song:disc",
            "music:song:track",
            "music:musician",
            "music:release_date",
        ],
        "music.playlist" => &[
            "music:song",
            "music:song:disc",
            "music:song:track",
            "music:creator",
        ],
        "music.radio_station" => &["music:creator"],
        "video.movie" | "video.tv_show" | "video.other" => &[
            "video:actor",
            "video:actor:role",
            "video:director",
            "video:writer",
            "video:duration",
            "video:release_date",
            "video:tag",
        ],
        "video.episode" => &[
            "video:actor",
            "video:actor:role",
            "video:director",
            "video:writer",
            "video:duration",
            "video:release_date",
            "video:tag",
            "video:series",
        ],
        // og:type website carries no additional properties; unknown types
        // are treated the same.
        _ => &[],
    }
}

/// Auxiliary per-type Open Graph details. Every documented key for the type
/// is present in the result; keys the page does not declare map to `None`.
pub fn og_details_for_type(
    og_type: &str,
    properties: &BTreeMap<String, String>,
) -> BTreeMap<String, Option<String>> {
    og_detail_keys(og_type)
        .iter()
        .map(|&key| (key.to_string(), get_trimmed(properties, key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<html><head>
        <title>  A Fine Page  </title>
        <meta name="Author" content="Jane Doe">
        <meta name="Keywords" content="rust, crawler">
        <meta property="description" content="Explicit description">
        <meta property="og:title" content="OG Title">
        <meta property="og:type" content="article">
        <meta property="og:image" content="/img/preview.png">
        <meta property="og:description" content="OG description">
        <meta property="article:section" content="Technology">
        <link rel="icon" href="/favicon.ico">
        <link rel="apple-touch-icon" href="/touch.png">
        </head><body></body></html>"#;

    #[test]
    fn test_title_trimmed() {
        let meta = extract_page_meta(HTML, "http://site.com");
        assert_eq!(meta.title, "A Fine Page");
    }

    #[test]
    fn test_title_defaults_when_missing() {
        let meta = extract_page_meta("<html><head></head><body></body></html>", "http://x.com");
        assert_eq!(meta.title, "Unknown title");
    }

    #[test]
    fn test_name_and_property_maps() {
        let meta = extract_page_meta(HTML, "http://site.com");
        assert_eq!(meta.names.get("Author").unwrap(), "Jane Doe");
        assert_eq!(meta.names.get("Keywords").unwrap(), "rust, crawler");
        assert_eq!(
            meta.properties.get("description").unwrap(),
            "Explicit description"
        );
    }

    #[test]
    fn test_last_duplicate_meta_wins() {
        let html = r#"<html><head>
            <meta name="Author" content="First">
            <meta name="Author" content="Second">
            </head></html>"#;
        let meta = extract_page_meta(html, "http://site.com");
        assert_eq!(meta.names.get("Author").unwrap(), "Second");
    }

    #[test]
    fn test_last_icon_wins_and_is_absolute() {
        let meta = extract_page_meta(HTML, "http://site.com");
        assert_eq!(meta.icon.as_deref(), Some("http://site.com/touch.png"));
    }

    #[test]
    fn test_resolve_og() {
        let meta = extract_page_meta(HTML, "http://site.com");
        let og = resolve_og(&meta.properties, "http://site.com");
        assert_eq!(og.title.as_deref(), Some("OG Title"));
        assert_eq!(og.og_type, "article");
        assert_eq!(og.image.as_deref(), Some("http://site.com/img/preview.png"));
        assert_eq!(og.description.as_deref(), Some("OG description"));
    }

    #[test]
    fn test_og_type_defaults_to_website() {
        let og = resolve_og(&BTreeMap::new(), "http://site.com");
        assert_eq!(og.og_type, "website");
        assert!(og.image.is_none());
    }

    #[test]
    fn test_og_details_for_type() {
        let meta = extract_page_meta(HTML, "http://site.com");
        let details = og_details_for_type("article", &meta.properties);
        assert_eq!(
            details.get("article:section").unwrap().as_deref(),
            Some("Technology")
        );
        // documented but undeclared keys are present with no value
        assert_eq!(details.get("article:author").unwrap(), &None);
    }

    #[test]
    fn test_og_details_unknown_type_empty() {
        assert!(og_details_for_type("website", &BTreeMap::new()).is_empty());
        assert!(og_details_for_type("weird.type", &BTreeMap::new()).is_empty());
    }
}
