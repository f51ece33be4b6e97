//! Device positioning port
//!
//! Defines the interface for reading the device's current position.
//! Implementations may read a fixed position, query an IP geolocation
//! service, or talk to a hardware sensor.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Why the current position could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositioningError {
    /// No positioning capability is present
    #[error("positioning unavailable: {0}")]
    Unavailable(String),

    /// The user or platform denied access to the position
    #[error("positioning permission denied")]
    PermissionDenied,

    /// The sensor did not answer in time
    #[error("positioning timed out")]
    Timeout,

    /// The sensor answered with an error
    #[error("positioning failed: {0}")]
    Failed(String),
}

/// Port for device positioning
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PositioningPort: Send + Sync {
    /// Read the current position once
    async fn current_position(&self) -> Result<GeoLocation, PositioningError>;
}
