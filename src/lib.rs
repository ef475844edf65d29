//! marque, a website content-extraction pipeline for bookmark records.
//!
//! Given a URL (or injected raw HTML), the crawler derives a normalized
//! [`model::BookmarkRecord`]: title, description, inferred type, cleaned
//! readable content, icon, preview image, auto-tags and reading time.
//!
//! ```no_run
//! use marque::crawler::WebsiteCrawler;
//! use marque::model::BookmarkRecord;
//!
//! # async fn run() -> Result<(), marque::fetcher::CrawlError> {
//! let crawler = WebsiteCrawler::default();
//! let mut record = BookmarkRecord::new("example.com/post?utm_source=feed");
//! crawler.crawl(&mut record, &[]).await?;
//! assert_eq!(record.url, "https://example.com/post");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod model;
