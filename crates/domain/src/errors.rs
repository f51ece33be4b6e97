//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the WGS-84 range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Address string was empty after trimming
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Facility name was empty after trimming
    #[error("Invalid facility name: {0}")]
    InvalidFacilityName(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
