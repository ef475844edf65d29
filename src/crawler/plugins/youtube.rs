//! YouTube watch pages: keep only the video description.

use crate::crawler::dom;
use crate::crawler::plugins::SitePlugin;
use crate::model::{BookmarkRecord, BookmarkType};
use kuchiki::NodeRef;

pub struct YoutubePlugin;

impl SitePlugin for YoutubePlugin {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("youtube.com")
    }

    fn apply(&self, doc: &NodeRef, record: &mut BookmarkRecord) {
        // Only watch pages (youtube.com/watch?v=...) carry a description;
        // og metadata usually already set the video type, this makes it
        // deterministic.
        if record.url.contains("watch") {
            record.kind = BookmarkType::Video;

            if let Ok(description) = doc.select_first("div#watch-description-text") {
                record.content = Some(dom::inner_html(description.as_node()));
            }
        }

        if let Some(title) = record.title.take() {
            record.title = Some(
                title
                    .strip_suffix(" - YouTube")
                    .map(str::to_string)
                    .unwrap_or(title),
            );
        }
    }
}
