//! Positioning adapters - Implement PositioningPort
//!
//! [`StaticPositioning`] reports a fixed position (or none at all, which
//! models a device without a sensor). [`IpPositioning`] approximates the
//! position from the public IP address.

use application::ports::{PositioningError, PositioningPort};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_maps::{IpGeolocationClient, IpGeolocationConfig, MapsError, PositioningClient};
use tracing::{debug, instrument};

/// Positioning from a configured, fixed coordinate pair
#[derive(Debug, Clone, Copy)]
pub struct StaticPositioning {
    position: Option<GeoLocation>,
}

impl StaticPositioning {
    /// Always report the given position
    #[must_use]
    pub const fn new(position: GeoLocation) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A device without a positioning sensor
    #[must_use]
    pub const fn absent() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl PositioningPort for StaticPositioning {
    async fn current_position(&self) -> Result<GeoLocation, PositioningError> {
        self.position
            .ok_or_else(|| PositioningError::Unavailable("no position configured".to_string()))
    }
}

/// Positioning backed by an IP geolocation service
pub struct IpPositioning {
    client: IpGeolocationClient,
}

impl std::fmt::Debug for IpPositioning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpPositioning")
            .field("client", &"IpGeolocationClient")
            .finish()
    }
}

impl IpPositioning {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &IpGeolocationConfig) -> Result<Self, PositioningError> {
        let client = IpGeolocationClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    fn map_error(err: MapsError) -> PositioningError {
        match err {
            MapsError::Timeout { .. } => PositioningError::Timeout,
            MapsError::ConfigurationError(e) => PositioningError::Unavailable(e),
            other => PositioningError::Failed(other.to_string()),
        }
    }
}

#[async_trait]
impl PositioningPort for IpPositioning {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<GeoLocation, PositioningError> {
        let position = self
            .client
            .current_position()
            .await
            .map_err(Self::map_error)?;

        debug!(%position, "IP position acquired");
        Ok(position)
    }
}
