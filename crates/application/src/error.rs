//! Errors returned through the outbound ports

use domain::DomainError;
use thiserror::Error;

/// What a geocoding, place-search or directions adapter can report
///
/// Stage services never propagate these; each one is logged and turned
/// into a [`domain::Degradation`].
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Provider answered with an error or could not be reached
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Timed out: {0}")]
    Timeout(String),

    /// Adapter could not be built from its settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
