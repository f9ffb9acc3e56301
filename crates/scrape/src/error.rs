//! Error kinds owned by this crate (spec §7: ParsingError, ScrapingError, CacheIoError).

use thiserror::Error;

/// Raised by the HTML parsing helpers (C10) and propagated to scraper plugins.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("missing element")]
    MissingElement,

    #[error("unexpected element tag, expected `{0}`")]
    UnexpectedElementTag(String),

    #[error("node has child elements")]
    NodeHasChildren,

    #[error("unparseable text for target type `{0}`")]
    UnparseableText(String),

    #[error("duplicate section header `{0}`")]
    DuplicateHeader(String),
}

/// Raised by the scraper runner (spec §4.6 / §7).
#[derive(Debug, Error)]
pub enum ScrapingError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("non-2xx response: {0}")]
    Status(reqwest::StatusCode),

    #[error("json decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

/// Raised by on-disk cache read/write (spec §7).
#[derive(Debug, Error)]
pub enum CacheIoError {
    #[error("cache io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
