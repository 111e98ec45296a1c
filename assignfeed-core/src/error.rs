//! Error types for assignfeed.

use thiserror::Error;

/// Errors that can escape the fetch/render pipeline.
///
/// Failures while paging through the API are not represented here: the
/// fetcher logs them and keeps whatever it already collected.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for assignfeed operations.
pub type FeedResult<T> = Result<T, FeedError>;
