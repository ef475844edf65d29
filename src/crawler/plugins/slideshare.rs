//! Slideshare decks: swap lazy-loaded slide images for their full-size
//! sources and strip player chrome.

use crate::crawler::dom;
use crate::crawler::plugins::SitePlugin;
use crate::model::{BookmarkRecord, BookmarkType};
use kuchiki::NodeRef;

pub struct SlidesharePlugin;

impl SitePlugin for SlidesharePlugin {
    fn name(&self) -> &'static str {
        "slideshare"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("slideshare.net")
    }

    fn apply(&self, doc: &NodeRef, record: &mut BookmarkRecord) {
        if doc.select_first("div.slide_container").is_err() {
            return;
        }

        if let Ok(slides) = doc.select("img.slide_image") {
            for slide in slides.collect::<Vec<_>>() {
                let full_size = slide
                    .attributes
                    .borrow()
                    .get("data-full")
                    .unwrap_or("")
                    .to_string();
                slide.attributes.borrow_mut().insert("src", full_size);

                if let Some(parent) = slide.as_node().parent()
                    && let Some(element) = parent.as_element()
                {
                    let index = element
                        .attributes
                        .borrow()
                        .get("data-index")
                        .unwrap_or("")
                        .to_string();
                    element
                        .attributes
                        .borrow_mut()
                        .insert("class", format!("slide slide_{}", index));
                }
            }
        }

        // spinner and next-slide chrome have no place in stored content
        if let Ok(decorations) = doc.select("i.fa-spinner, i.fa-spin, .next-container") {
            for node in decorations.collect::<Vec<_>>() {
                node.as_node().detach();
            }
        }

        if let Ok(container) = doc.select_first("div.slide_container") {
            record.content = Some(dom::inner_html(container.as_node()));
            record.kind = BookmarkType::Slide;
        }
    }
}
