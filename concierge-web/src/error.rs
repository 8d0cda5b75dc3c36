//! Error types for the fetch pipeline.

use thiserror::Error;

/// Errors raised by the outbound retrieval step.
///
/// Retrieval failures are never retried here; the tool facade surfaces them
/// to the caller verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL failed validation before any request was made.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure: DNS, connect, TLS, or the 30 second timeout.
    #[error("Failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with an error status. The body is discarded.
    #[error("Failed to fetch {url} - status code {status}")]
    HttpStatus { url: String, status: u16 },
}
