//! SDK error types.
//!
//! [`SdkError`] is the error type returned by the low-level
//! [`PitBoxClient`](crate::PitBoxClient).  The connectivity monitor and the
//! message dispatcher collapse it into a state or a failed turn, so it
//! never reaches the presentation layer.

/// Error type for backend calls.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {0}")]
    Status(reqwest::StatusCode),

    /// Transport failure (connection refused, DNS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
