//! Gives every heading in extracted content a stable unique `id` so the
//! display layer can deep-link into the document.

use crate::crawler::dom;
use uuid::Uuid;

/// Synthesizes an `id` for every `h1`..`h5` that lacks one. The id is the
/// heading text reduced to alphanumerics, suffixed with a random unique
/// token so identical headings (and repeat crawls) never collide.
pub fn handle_anchors(content: &str) -> String {
    let doc = dom::parse(content);

    if let Ok(headings) = doc.select("h1, h2, h3, h4, h5") {
        for heading in headings.collect::<Vec<_>>() {
            let existing = heading
                .attributes
                .borrow()
                .get("id")
                .unwrap_or("")
                .to_string();
            if !existing.is_empty() {
                continue;
            }

            let title = heading.as_node().text_contents();
            let slug: String = title.chars().filter(char::is_ascii_alphanumeric).collect();
            let id = format!("{}_{}", slug, Uuid::new_v4().simple());
            heading.attributes.borrow_mut().insert("id", id);
        }
    }

    dom::rewrap(&doc, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::dom::parse;

    #[test]
    fn test_headings_get_ids() {
        let out = handle_anchors("<h1>Intro</h1><p>text</p><h3>Deep Dive!</h3>");
        let doc = parse(&out);

        for heading in doc.select("h1, h3").unwrap() {
            let attrs = heading.attributes.borrow();
            let id = attrs.get("id").unwrap_or("");
            assert!(!id.is_empty());
        }
    }

    #[test]
    fn test_id_starts_with_alphanumeric_slug() {
        let out = handle_anchors("<h2>Deep Dive!</h2>");
        let doc = parse(&out);
        let h2 = doc.select_first("h2").unwrap();
        let attrs = h2.attributes.borrow();
        assert!(attrs.get("id").unwrap().starts_with("DeepDive_"));
    }

    #[test]
    fn test_identical_headings_get_distinct_ids() {
        let out = handle_anchors("<h2>Same</h2><h2>Same</h2>");
        let doc = parse(&out);

        let ids: Vec<String> = doc
            .select("h2")
            .unwrap()
            .map(|h| h.attributes.borrow().get("id").unwrap_or("").to_string())
            .collect();

        assert_eq!(ids.len(), 2);
        assert!(!ids[0].is_empty());
        assert!(!ids[1].is_empty());
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_existing_id_preserved() {
        let out = handle_anchors(r#"<h1 id="keep-me">Title</h1>"#);
        assert!(out.contains(r#"id="keep-me""#));
    }
}
