//! Direct links to image files.

use crate::crawler::plugins::SitePlugin;
use crate::crawler::url;
use crate::model::{BookmarkRecord, BookmarkType};
use kuchiki::NodeRef;
use regex::Regex;
use std::sync::LazyLock;

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".png", ".jpeg"];

static NON_ALNUM_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

pub struct ImagePlugin;

impl SitePlugin for ImagePlugin {
    fn name(&self) -> &'static str {
        "image"
    }

    fn matches(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }

    /// The document is irrelevant here: the bookmark's own URL is the
    /// content. A title is synthesized from the file name and the
    /// registrable domain.
    fn apply(&self, _doc: &NodeRef, record: &mut BookmarkRecord) {
        record.content = Some(format!(
            r#"<div class="content__single_picture"><img src="{url}" data-source="{url}"/></div>"#,
            url = record.url
        ));
        record.kind = BookmarkType::Image;

        let picture_name = beautify(&url::file_stem(&record.url));
        let domain = url::registrable_domain(&record.url).unwrap_or_default();
        record.title = Some(format!("{} - {}", picture_name, domain));
    }
}

/// Replaces every run of non-alphanumeric characters with a single space.
fn beautify(s: &str) -> String {
    NON_ALNUM_RUN.replace_all(s, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::dom;

    #[test]
    fn test_matches_image_extensions() {
        let plugin = ImagePlugin;
        assert!(plugin.matches("https://x.com/a.jpg"));
        assert!(plugin.matches("https://x.com/a.PNG"));
        assert!(plugin.matches("https://x.com/a.jpeg"));
        assert!(!plugin.matches("https://x.com/a.gif"));
        assert!(!plugin.matches("https://x.com/page"));
    }

    #[test]
    fn test_beautify() {
        assert_eq!(beautify("my-photo_01"), "my photo 01");
        assert_eq!(beautify("plain"), "plain");
    }

    #[test]
    fn test_apply_builds_single_picture_content() {
        let mut record = BookmarkRecord::new("https://img.cdn.example.com/pics/my-photo_01.jpg");
        let doc = dom::parse("");

        ImagePlugin.apply(&doc, &mut record);

        assert_eq!(record.kind, BookmarkType::Image);
        assert_eq!(record.title.as_deref(), Some("my photo 01 - example.com"));
        let content = record.content.unwrap();
        assert!(content.contains("content__single_picture"));
        assert!(content.contains(r#"src="https://img.cdn.example.com/pics/my-photo_01.jpg""#));
        assert!(content.contains("data-source="));
    }
}
