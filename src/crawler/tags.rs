//! Heuristic auto-tagging by term frequency.

use crate::crawler::dom;
use crate::model::TagRef;

/// Minimum occurrences of a tag name in the text before we propose the tag.
/// The value is arbitrary; tune it against real corpora.
const MIN_OCCURRENCES_TO_SET_TAG: usize = 3;

/// At most this many tags are proposed per crawl.
const MAX_TAGS: usize = 3;

/// Selects the candidate tags whose names occur most often in the content.
///
/// HTML is stripped first; counting is case-insensitive, non-overlapping
/// substring matching. Candidates below [`MIN_OCCURRENCES_TO_SET_TAG`] are
/// dropped, the rest are ordered by count descending (ties keep input
/// order), and the top [`MAX_TAGS`] are returned.
pub fn find_tags_on_text(candidates: &[TagRef], html: &str) -> Vec<TagRef> {
    let text = dom::text_of(html);

    let mut counted: Vec<(&TagRef, usize)> = candidates
        .iter()
        .map(|tag| (tag, occurrences(&tag.name, &text)))
        .filter(|(_, count)| *count >= MIN_OCCURRENCES_TO_SET_TAG)
        .collect();

    // sort_by_key is stable, so equal counts preserve candidate order.
    counted.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counted.truncate(MAX_TAGS);

    counted.into_iter().map(|(tag, _)| tag.clone()).collect()
}

/// Case-insensitive non-overlapping occurrence count of `needle` in `text`.
pub fn occurrences(needle: &str, text: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(&needle.to_lowercase()).count()
}
