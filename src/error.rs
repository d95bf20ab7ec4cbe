//! Error types for shieldscrape.
//!
//! Extraction itself never fails on the shape of the HTML; those problems are
//! reported through [`crate::ExtractionStatus`]. The variants here cover
//! contract violations (a bad source URL) and the collaborators around the
//! extraction core: transport, serializers and configuration parsing.

/// Error type for shieldscrape operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source URL is not an absolute URL with a host.
    #[error("invalid source URL `{0}`: expected scheme and host")]
    InvalidUrl(String),

    /// The HTTP request failed or returned a non-success status.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom request header could not be encoded.
    #[error("invalid request header `{0}`")]
    InvalidHeader(String),

    /// The requested browser profile is not supported.
    #[error("unsupported browser profile `{0}` (see --list-browsers)")]
    UnknownBrowser(String),

    /// The requested output format is not supported.
    #[error("unsupported output format `{0}` (expected rich, json, text or markdown)")]
    UnknownFormat(String),

    /// JSON serialization of a document failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for shieldscrape operations.
pub type Result<T> = std::result::Result<T, Error>;
