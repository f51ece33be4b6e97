//! Reverse geocoding port

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for coordinate-to-address lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve coordinates to formatted addresses, best match first
    ///
    /// An empty vector means the provider answered but found nothing.
    async fn reverse_geocode(&self, location: GeoLocation) -> Result<Vec<String>, ApplicationError>;
}
