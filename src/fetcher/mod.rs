pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{build_client, fetch, get_client};
pub use errors::CrawlError;
pub use types::{Charset, PageResponse};
