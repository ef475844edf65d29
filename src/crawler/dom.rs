//! Thin helpers over kuchiki for the mutable-DOM stages of the pipeline.
//!
//! scraper handles read-only queries (metadata extraction); kuchiki is used
//! wherever the tree is mutated in place (plugin rewrites, link resolution,
//! anchor injection) because it keeps node identity stable across sibling
//! removal.

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

/// Parses an HTML document or fragment. html5ever is total: malformed input
/// yields a best-effort tree, never an error.
pub fn parse(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Serializes the children of a node, i.e. its inner HTML.
pub fn inner_html(node: &NodeRef) -> String {
    let mut out = Vec::new();
    for child in node.children() {
        if child.serialize(&mut out).is_err() {
            return String::new();
        }
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Plain text of a fragment with all markup stripped.
pub fn text_of(html: &str) -> String {
    parse(html).text_contents()
}

/// Wraps a fragment in the minimal shell every stored content value uses.
/// The explicit charset declaration keeps downstream parsers from falling
/// back to a Latin default.
pub fn wrap_fragment(inner: &str) -> String {
    format!(
        "<html><head><meta charset=\"utf-8\"></head><body>{}</body></html>",
        inner
    )
}

/// Re-serializes a parsed (and possibly mutated) document back into the
/// wrapped-fragment form. Falls back to the caller's original string when
/// the body cannot be located or serialized, so a serialization problem
/// degrades instead of corrupting content.
pub fn rewrap(doc: &NodeRef, original: &str) -> String {
    match doc.select_first("body") {
        Ok(body) => wrap_fragment(&inner_html(body.as_node())),
        Err(()) => original.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_html_of_selected_node() {
        let doc = parse("<div class=\"c\"><p>one</p><p>two</p></div>");
        let div = doc.select_first("div.c").unwrap();
        assert_eq!(inner_html(div.as_node()), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_text_of_strips_markup() {
        assert_eq!(text_of("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn test_rewrap_produces_shell() {
        let doc = parse("<p>body text</p>");
        let wrapped = rewrap(&doc, "<p>body text</p>");
        assert_eq!(
            wrapped,
            "<html><head><meta charset=\"utf-8\"></head><body><p>body text</p></body></html>"
        );
    }

    #[test]
    fn test_rewrap_is_stable() {
        let once = rewrap(&parse("<p>x</p>"), "<p>x</p>");
        let twice = rewrap(&parse(&once), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let doc = parse("<p>Unclosed<div>more");
        assert!(doc.text_contents().contains("Unclosed"));
    }
}
