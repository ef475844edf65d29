use crate::config::Config;
use crate::fetcher::{errors::CrawlError, pipeline::process_response, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;

static DEFAULT_CLIENT: Lazy<Client> = Lazy::new(|| build_client(&Config::default()));

/// Shared default HTTP client. `reqwest::Client` is internally pooled and
/// cheap to clone, so concurrent crawls reuse one connection pool.
pub fn get_client() -> &'static Client {
    &DEFAULT_CLIENT
}

pub fn build_client(config: &Config) -> Client {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs()))
        .timeout(Duration::from_secs(config.timeout_secs()))
        .user_agent(config.user_agent())
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects()))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .expect("static header value"),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
}

/// Fetches a page and decodes it to UTF-8 text.
///
/// Success is a final status in 200..=301 (301 counts because the redirected
/// body has already been followed and returned). HTTP 404 and transport
/// failures without a status classify as [`CrawlError::NotFound`]; any other
/// non-success status as [`CrawlError::RetrieveFailed`]. Never retries.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(client: &Client, url: &str) -> Result<PageResponse, CrawlError> {
    let parsed_url =
        url::Url::parse(url).map_err(|_| CrawlError::UrlInvalid(url.to_string()))?;

    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(|e| CrawlError::from_reqwest_error(&e))?;

    let final_url = response.url().clone();
    let status = response.status();

    if !(200..=301).contains(&status.as_u16()) {
        if status.as_u16() == 404 {
            return Err(CrawlError::NotFound);
        }
        return Err(CrawlError::RetrieveFailed {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| CrawlError::from_reqwest_error(&e))?;

    Ok(process_response(final_url, status, body_bytes, &content_type))
}
