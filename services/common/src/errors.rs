//! Common error types for services

use thiserror::Error;

/// Service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Backing dataset missing or unreadable
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// Invalid request error
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream API call failed
    #[error("Upstream request failed: {0}")]
    UpstreamFailed(String),

    /// Rate limited error
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::UpstreamFailed(err.to_string())
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::DatasetUnavailable(err.to_string())
    }
}
