//! Generic "main readable content" extraction, used when no site plugin
//! produced content.

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Minimum text length for the selector-scan fallback to accept a region.
const MIN_CANDIDATE_TEXT_LEN: usize = 100;

/// Containers that commonly hold the primary content of a page.
const CONTENT_SELECTORS: [&str; 9] = [
    "article",
    "main",
    "[role='main']",
    ".content",
    ".post",
    ".article",
    "#content",
    "#main",
    ".entry-content",
];

/// Extracts the highest-value readable region of the page as an HTML
/// fragment. Readability scoring runs first; if it fails or comes back
/// empty, a scan of common content containers is tried. `None` means the
/// page has no extractable body (an expected outcome, not an error).
pub fn extract(html: &str, page_url: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    let base = Url::parse(page_url).ok();

    // readability echoes the whole input document when it has no candidate,
    // and a bare <title> would pass a plain non-empty check. Require enough
    // body text to rule that out.
    if let Some(base) = base
        && let Ok(article) = readability::extractor::extract(&mut html.as_bytes(), &base)
        && !article.content.trim().is_empty()
        && article.text.trim().len() > MIN_CANDIDATE_TEXT_LEN
    {
        return Some(article.content);
    }

    debug!(url = page_url, "readability found no candidate, scanning content selectors");
    scan_content_selectors(html)
}

fn scan_content_selectors(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            if text.trim().len() > MIN_CANDIDATE_TEXT_LEN {
                return Some(element.inner_html());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_article_body() {
        let html = format!(
            "<html><head><title>T</title></head><body><nav>menu</nav>\
             <article><h1>Heading</h1><p>{}</p></article>\
             <footer>footer</footer></body></html>",
            "Readable paragraph content with plenty of words to score. ".repeat(20)
        );

        let content = extract(&html, "https://example.com/post").unwrap();
        assert!(content.contains("Readable paragraph content"));
    }

    #[test]
    fn test_selector_scan_fallback() {
        let html = format!(
            "<html><body><div class=\"content\">{}</div></body></html>",
            "Fallback text that is long enough to pass the length check. ".repeat(5)
        );

        let content = scan_content_selectors(&html).unwrap();
        assert!(content.contains("Fallback text"));
    }

    #[test]
    fn test_empty_body_yields_none() {
        // The title alone must not count as readable content.
        let html = "<html><head><title>Empty</title></head><body></body></html>";
        assert_eq!(extract(html, "https://example.com/"), None);
    }

    #[test]
    fn test_no_content_found() {
        let html = "<html><head><title>Empty</title></head><body></body></html>";
        assert!(scan_content_selectors(html).is_none());
    }

    #[test]
    fn test_empty_html_yields_none() {
        assert_eq!(extract("", "https://example.com"), None);
    }
}
