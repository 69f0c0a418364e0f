//! Error types for iotdash.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

/// Result type alias for iotdash operations.
pub type Result<T> = std::result::Result<T, DashError>;

/// Errors that can occur in iotdash.
#[derive(Debug, Error)]
pub enum DashError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The controller answered with a non-success status.
    #[error("Controller returned {status} for {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body, for the log.
        body: String,
    },

    /// Response body was not the JSON shape we expected.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local I/O failure, such as opening the log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured base URL is unusable.
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl DashError {
    /// Create a Status error.
    pub fn status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
