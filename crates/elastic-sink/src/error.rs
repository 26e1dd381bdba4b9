//! Error types for sink operations.

use thiserror::Error;

/// Errors that can occur while talking to an ingestion sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// HTTP transport failure (connection refused, timeout, TLS, ...).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The sink answered with an unexpected status code.
    #[error("unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// A bulk request succeeded at the HTTP level but reported item-level
    /// failures.
    #[error("bulk write reported {failed} failed items (first: {first_reason})")]
    BulkItemFailures { failed: usize, first_reason: String },

    /// The sink response could not be decoded.
    #[error("invalid response body from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
}
