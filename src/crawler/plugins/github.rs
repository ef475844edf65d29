//! GitHub readme and code pages.

use crate::crawler::dom;
use crate::crawler::plugins::SitePlugin;
use crate::model::{BookmarkRecord, BookmarkType};
use kuchiki::NodeRef;

pub struct GithubPlugin;

impl SitePlugin for GithubPlugin {
    fn name(&self) -> &'static str {
        "github"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("github.com")
    }

    fn apply(&self, doc: &NodeRef, record: &mut BookmarkRecord) {
        // Rendered markdown (readme, file view)
        if let Ok(article) = doc.select_first("article.entry-content") {
            // anchor decoration icons are useless outside github's own css
            if let Ok(decorations) = doc.select(".octicon.octicon-link") {
                for node in decorations.collect::<Vec<_>>() {
                    node.as_node().detach();
                }
            }
            record.content = Some(dom::inner_html(article.as_node()));
            record.kind = BookmarkType::Code;
        }
        // Raw code file view
        else if let Ok(blob) = doc.select_first("div.blob-wrapper") {
            record.content = Some(dom::inner_html(blob.as_node()));
            record.kind = BookmarkType::Code;
        }

        if let Some(title) = record.title.take() {
            record.title = Some(
                title
                    .strip_prefix("GitHub - ")
                    .map(str::to_string)
                    .unwrap_or(title),
            );
        }
    }
}
