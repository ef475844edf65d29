//! Rewrites image and anchor URLs in extracted content to absolute form.
//!
//! The only consumer of content is a display layer, so every failure path
//! here degrades: a fragment that cannot be re-serialized is returned
//! unchanged.

use ::url::Url;
use crate::crawler::{dom, url};
use regex::Regex;
use std::sync::LazyLock;

/// href prefixes that are either non-navigable or same-document references
/// and must never be resolved against the page URL.
const IGNORED_HREF_PREFIXES: [&str; 4] = ["tel:", "mailto:", "ftp:", "#"];

static MULTI_SLASH_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/{2,}").unwrap());

/// Resolves every `img src` and `a href` in the fragment to absolute form.
pub fn handle_links(content: &str, page_url: &str) -> String {
    let doc = dom::parse(content);

    if let Ok(imgs) = doc.select("img") {
        for img in imgs.collect::<Vec<_>>() {
            let current = img
                .attributes
                .borrow()
                .get("src")
                .unwrap_or("")
                .to_string();
            let resolved = real_img_link(&current, page_url);
            if !resolved.is_empty() {
                img.attributes.borrow_mut().insert("src", resolved);
            }
        }
    }

    if let Ok(anchors) = doc.select("a") {
        for anchor in anchors.collect::<Vec<_>>() {
            let current = anchor
                .attributes
                .borrow()
                .get("href")
                .unwrap_or("")
                .to_string();
            let resolved = real_link(&current, page_url);
            anchor.attributes.borrow_mut().insert("href", resolved);
        }
    }

    dom::rewrap(&doc, content)
}

/// Absolute form of an image src: a src that already carries a scheme is
/// left alone; a leading `/` resolves against the page's scheme+host; any
/// other relative src is appended to the page URL.
pub fn real_img_link(src: &str, page_url: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    if has_scheme(src) {
        return src.to_string();
    }

    let joined = if src.starts_with('/') {
        format!("{}{}", url::base_url(page_url), src)
    } else {
        format!("{}/{}", page_url, src)
    };

    collapse_slashes(&joined)
}

/// Absolute form of a link href. Ignored prefixes pass through unchanged,
/// except that a bare prefix with nothing after it becomes the empty string:
/// per RFC 2396 an empty URI reference means "current document".
pub fn real_link(href: &str, page_url: &str) -> String {
    for prefix in IGNORED_HREF_PREFIXES {
        if href.starts_with(prefix) {
            if href.len() == prefix.len() {
                return String::new();
            }
            return href.to_string();
        }
    }

    real_img_link(href, page_url)
}

fn has_scheme(src: &str) -> bool {
    Url::parse(src).is_ok()
}

/// Collapses accidental `//` runs to `/`, leaving the `://` after the scheme
/// intact.
fn collapse_slashes(s: &str) -> String {
    match s.find("://") {
        Some(idx) => {
            let (head, tail) = s.split_at(idx + 3);
            format!("{}{}", head, MULTI_SLASH_REGEX.replace_all(tail, "/"))
        }
        None => MULTI_SLASH_REGEX.replace_all(s, "/").into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "http://site.com/page";

    #[test]
    fn test_root_relative_img() {
        assert_eq!(
            real_img_link("/a/b.png", PAGE),
            "http://site.com/a/b.png"
        );
    }

    #[test]
    fn test_relative_img() {
        assert_eq!(
            real_img_link("img/pic.jpg", PAGE),
            "http://site.com/page/img/pic.jpg"
        );
    }

    #[test]
    fn test_absolute_img_untouched() {
        assert_eq!(
            real_img_link("https://cdn.com/x.png", PAGE),
            "https://cdn.com/x.png"
        );
        assert_eq!(
            real_img_link("data:image/png;base64,AAAA", PAGE),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_double_slash_collapsed_after_scheme_only() {
        assert_eq!(
            real_img_link("//a//b.png", PAGE),
            "http://site.com/a/b.png"
        );
    }

    #[test]
    fn test_fragment_href_untouched() {
        assert_eq!(real_link("#section", PAGE), "#section");
    }

    #[test]
    fn test_bare_prefixes_become_empty() {
        assert_eq!(real_link("#", PAGE), "");
        assert_eq!(real_link("mailto:", PAGE), "");
        assert_eq!(real_link("tel:", PAGE), "");
    }

    #[test]
    fn test_non_navigable_hrefs_untouched() {
        assert_eq!(real_link("mailto:x@y.com", PAGE), "mailto:x@y.com");
        assert_eq!(real_link("tel:+123456", PAGE), "tel:+123456");
        assert_eq!(real_link("ftp://host/file", PAGE), "ftp://host/file");
    }

    #[test]
    fn test_handle_links_rewrites_fragment() {
        let content = r##"<p><img src="/a/b.png"><a href="#section">s</a><a href="mailto:x@y.com">m</a><a href="#">top</a><a href="other.html">o</a></p>"##;
        let out = handle_links(content, PAGE);

        assert!(out.contains(r#"src="http://site.com/a/b.png""#));
        assert!(out.contains(r##"href="#section""##));
        assert!(out.contains(r#"href="mailto:x@y.com""#));
        assert!(out.contains(r#"href="""#));
        assert!(out.contains(r#"href="http://site.com/page/other.html""#));
    }

    #[test]
    fn test_handle_links_wraps_with_charset_shell() {
        let out = handle_links("<p>plain</p>", PAGE);
        assert!(out.starts_with("<html><head><meta charset=\"utf-8\">"));
    }
}
