//! Per-site extraction strategies.
//!
//! Plugins are stateless and run against the shared parsed document in a
//! fixed registration order. Every plugin whose predicate matches runs
//! (deliberately not first-match-wins), so a later plugin sees, and may
//! override, an earlier plugin's changes to the record.

pub mod github;
pub mod image;
pub mod medium;
pub mod slideshare;
pub mod youtube;

use crate::model::BookmarkRecord;
use kuchiki::NodeRef;

pub use github::GithubPlugin;
pub use image::ImagePlugin;
pub use medium::MediumPlugin;
pub use slideshare::SlidesharePlugin;
pub use youtube::YoutubePlugin;

/// A site-specific extraction strategy over (parsed document, working
/// record). Implementations must degrade to a no-op when their expected
/// markup is missing.
pub trait SitePlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Pure URL predicate deciding whether this plugin runs.
    fn matches(&self, url: &str) -> bool;

    /// Mutates the record (content, type, title, metadata) in place. May
    /// also rewrite the shared document before extracting from it.
    fn apply(&self, doc: &NodeRef, record: &mut BookmarkRecord);
}

/// The fixed-order plugin registry. Order is part of the contract: a URL
/// matching several predicates runs them all in this sequence, later
/// plugins winning on conflict.
pub fn registry() -> Vec<Box<dyn SitePlugin>> {
    vec![
        Box::new(ImagePlugin),
        Box::new(GithubPlugin),
        Box::new(SlidesharePlugin),
        Box::new(YoutubePlugin),
        Box::new(MediumPlugin),
    ]
}
