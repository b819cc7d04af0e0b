//! Layered error types
//!
//! The core crate reports everything through a single [`CoreError`] enum;
//! the CLI wraps it in `anyhow` at the boundary.

use thiserror::Error;

/// Core-level errors for the NER pipeline and the IIIF client
#[derive(Error, Debug)]
pub enum CoreError {
    /// Unsupported language
    #[error("language '{code}' not supported")]
    UnsupportedLanguage {
        /// The language code that is not supported
        code: String,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid IIIF image request parameter
    #[error("invalid image request: {reason}")]
    InvalidImageRequest {
        /// The reason why the request is invalid
        reason: String,
    },

    /// HTTP transport failure
    #[error("http error for {url}: {source}")]
    Http {
        /// The URL that was being fetched
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("unexpected status {status} for {url}")]
    HttpStatus {
        /// The HTTP status code returned by the server
        status: u16,
        /// The URL that was fetched
        url: String,
    },

    /// Manifest body that could not be decoded
    #[error("malformed manifest from {url}: {source}")]
    ManifestParse {
        /// The URL the manifest was fetched from
        url: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Manifest missing the structure the caller asked for
    #[error("manifest has no canvas at index {index}")]
    MissingCanvas {
        /// The requested canvas index
        index: usize,
    },

    /// Canvas without any image annotation
    #[error("canvas '{canvas}' carries no image resource")]
    MissingImage {
        /// The canvas identifier or label
        canvas: String,
    },

    /// Fetched bytes that could not be decoded as an image
    #[error("image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// JSON error outside of manifest fetching
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
