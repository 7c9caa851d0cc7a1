//! Error types for the scraper

use thiserror::Error;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to obtain a page. Every variant is worth another attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Status { .. } => true,
        }
    }
}

/// A single list item (comment or recommendation) could not be read.
#[derive(Debug, Error, PartialEq)]
#[error("missing {field}")]
pub struct ItemParseError {
    pub field: &'static str,
}

/// Failure while writing or reading an artifact file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Blank subject id
    #[error("empty movie id")]
    EmptyId,

    /// The search endpoint returned something that is not the expected JSON
    #[error("unexpected response format: {0}")]
    Decode(#[from] serde_json::Error),
}
