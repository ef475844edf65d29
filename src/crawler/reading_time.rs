//! Estimates reading duration from extracted content.

use crate::crawler::dom;
use crate::model::{BookmarkRecord, BookmarkType, DEFAULT_READING_TIME};

/// Average reading speed used for the word-count estimate.
const AVERAGE_WORDS_PER_MINUTE: usize = 200;

/// Minutes budgeted per slide for slide decks.
const MINUTES_PER_SLIDE: i64 = 2;

/// CSS selector for slide images inside slide-type content.
pub const SLIDE_IMAGE_SELECTOR: &str = "img.slide_image";

/// Estimated reading time in minutes.
///
/// Slide decks count slides at [`MINUTES_PER_SLIDE`] each; everything else
/// counts whitespace-delimited words at [`AVERAGE_WORDS_PER_MINUTE`],
/// floored, with a minimum of 1 for non-empty content. Empty content yields
/// the [`DEFAULT_READING_TIME`] sentinel, distinct from a real zero.
pub fn estimate(record: &BookmarkRecord) -> i64 {
    let Some(html) = record.content.as_deref().filter(|c| !c.is_empty()) else {
        return DEFAULT_READING_TIME;
    };

    if record.kind == BookmarkType::Slide {
        let doc = dom::parse(html);
        let slides = doc
            .select(SLIDE_IMAGE_SELECTOR)
            .map(|matches| matches.count())
            .unwrap_or(0);
        return slides as i64 * MINUTES_PER_SLIDE;
    }

    let words = dom::text_of(html).split_whitespace().count();
    let minutes = (words / AVERAGE_WORDS_PER_MINUTE) as i64;

    if minutes == 0 { 1 } else { minutes }
}
