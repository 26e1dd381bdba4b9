//! Error types for dashboard-object import.

use thiserror::Error;

/// Errors that can occur while importing saved objects.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// HTTP transport failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Kibana answered with an unexpected status code.
    #[error("unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The import request was accepted but Kibana reported failure.
    #[error("saved-object import rejected: {0}")]
    ImportRejected(String),
}
