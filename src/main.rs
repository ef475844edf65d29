use anyhow::Context;
use marque::config::Config;
use marque::crawler::WebsiteCrawler;
use marque::model::{BookmarkRecord, TagRef};
use tracing_subscriber::EnvFilter;

/// Crawl a single URL and print the resulting bookmark record as JSON.
/// Extra arguments are treated as known tag names for auto-tagging.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let url = args.next().context("usage: marque <url> [tag...]")?;
    let known_tags: Vec<TagRef> = args.map(TagRef::new).collect();

    let config = Config::from_env().context("failed to load configuration")?;
    let crawler = WebsiteCrawler::new(&config);

    let mut record = BookmarkRecord::new(url);
    crawler.crawl(&mut record, &known_tags).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
