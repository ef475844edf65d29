//! Medium articles.

use crate::crawler::dom;
use crate::crawler::plugins::SitePlugin;
use crate::model::BookmarkRecord;
use kuchiki::NodeRef;

pub struct MediumPlugin;

impl SitePlugin for MediumPlugin {
    fn name(&self) -> &'static str {
        "medium"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("medium.com")
    }

    fn apply(&self, doc: &NodeRef, record: &mut BookmarkRecord) {
        if let Ok(article) = doc.select_first(".postArticle-content") {
            record.content = Some(dom::inner_html(article.as_node()));
        }

        // Note: '–' is an en dash, not a hyphen.
        if let Some(title) = record.title.take() {
            record.title = Some(title.replace(" – Medium", ""));
        }

        if let Ok(avatar) = doc.select_first(".avatar-image--small") {
            let src = avatar
                .attributes
                .borrow()
                .get("src")
                .unwrap_or("")
                .to_string();
            if !src.is_empty() {
                record
                    .website_info
                    .insert("authorAvatar".to_string(), Some(src));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_medium() {
        assert!(MediumPlugin.matches("https://medium.com/@a/post-1"));
        assert!(!MediumPlugin.matches("https://dev.to/a/post"));
    }

    #[test]
    fn test_extracts_article_and_avatar() {
        let doc = dom::parse(
            r#"<img class="avatar-image--small" src="https://cdn.medium.com/ava.png">
               <div class="postArticle-content"><p>Story body.</p></div>"#,
        );
        let mut record = BookmarkRecord::new("https://medium.com/@a/post-1");
        record.title = Some("A Story – Medium".to_string());

        MediumPlugin.apply(&doc, &mut record);

        assert_eq!(record.title.as_deref(), Some("A Story"));
        assert!(record.content.unwrap().contains("Story body."));
        assert_eq!(
            record.website_info.get("authorAvatar").unwrap().as_deref(),
            Some("https://cdn.medium.com/ava.png")
        );
    }

    #[test]
    fn test_missing_article_is_a_noop_for_content() {
        let doc = dom::parse("<p>paywall</p>");
        let mut record = BookmarkRecord::new("https://medium.com/@a/post-1");

        MediumPlugin.apply(&doc, &mut record);

        assert!(record.content_is_empty());
    }
}
