//! Recommendation error types

use thiserror::Error;

/// Errors that can occur while requesting a recommendation
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Response body lacks the field the contract promises
    #[error("Response is missing field '{field}'")]
    MissingField {
        /// Name of the expected field
        field: String,
    },

    /// Response body is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The query lacks what the configured contract needs
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RecommendationError {
    /// Failures of the transport: the backend could not be reached or refused
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::ConnectionFailed(_) | Self::Timeout { .. }
        )
    }

    /// Failures of the request/response contract
    #[must_use]
    pub const fn is_contract(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::ParseError(_) | Self::InvalidRequest(_)
        )
    }

    /// HTTP status, if the backend answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
