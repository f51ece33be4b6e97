//! Failures talking to the maps web services

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapsError {
    /// Could not reach the service at all
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-success HTTP status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Body was not the JSON shape we expect
    #[error("Parse error: {0}")]
    ParseError(String),

    /// HTTP 200 with a `status` other than `OK` or `ZERO_RESULTS`
    #[error("Provider status {status}: {message}")]
    ProviderStatus { status: String, message: String },

    /// HTTP 429 or `OVER_QUERY_LIMIT`
    #[error("Rate limited by maps provider (retry after {retry_after_secs:?}s)")]
    RateLimitExceeded { retry_after_secs: Option<u64> },

    /// Rejected before sending, e.g. a blank place name
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}
