//! HTML sanitization of extracted content.
//!
//! Scripts, styles and event handlers never belong in stored content. The
//! allowlist is ammonia's default plus the attributes later pipeline stages
//! rely on: `class` (slide counting), `id` (anchors) and the Image plugin's
//! `data-source`.

use ammonia::Builder;
use once_cell::sync::Lazy;

static CLEANER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .add_generic_attributes(&["class", "id"])
        .add_tag_attributes("img", &["data-source"]);
    builder
});

pub fn clean(html: &str) -> String {
    CLEANER.clean(html).to_string()
}
