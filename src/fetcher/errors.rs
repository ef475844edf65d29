use thiserror::Error;

/// Errors that abort a crawl. Only the URL check and the fetch can fail;
/// every downstream pipeline stage degrades to empty or default values
/// instead of returning an error.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// The URL fails basic syntax validation after normalization.
    #[error("invalid url: {0}")]
    UrlInvalid(String),

    /// HTTP 404, or a transport failure where no status was ever received
    /// (connection refused, DNS failure, timeout, redirect cap exceeded).
    #[error("document not found")]
    NotFound,

    /// Any other non-success HTTP status.
    #[error("could not retrieve content (http {status})")]
    RetrieveFailed { status: u16 },
}

impl CrawlError {
    /// The HTTP status behind the failure, when one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::RetrieveFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// Classifies a transport-layer error. A request that never produced a
    /// status line is indistinguishable from a missing document, so it maps
    /// to `NotFound`; errors carrying a status keep it for diagnostics.
    pub fn from_reqwest_error(err: &reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 404 => Self::NotFound,
            Some(status) => Self::RetrieveFailed {
                status: status.as_u16(),
            },
            None => Self::NotFound,
        }
    }
}
