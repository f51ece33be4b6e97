//! Location acquisition stage
//!
//! Reads the device position once. Any failure to read it, including a
//! missing sensor and a timeout, falls back to the configured default
//! coordinates; this is policy rather than an error.

use std::sync::Arc;
use std::time::Duration;

use domain::entities::Degradation;
use domain::value_objects::GeoLocation;
use tracing::{debug, instrument, warn};

use crate::ports::PositioningPort;
use crate::services::outcome::StageOutcome;

/// Default sensor timeout
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Acquires the user's coordinates
pub struct LocationSource {
    positioning: Option<Arc<dyn PositioningPort>>,
    default_coordinates: GeoLocation,
    timeout: Duration,
}

impl std::fmt::Debug for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationSource")
            .field("has_positioning", &self.positioning.is_some())
            .field("default_coordinates", &self.default_coordinates)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LocationSource {
    /// Create a location source backed by a positioning port
    #[must_use]
    pub fn new(positioning: Arc<dyn PositioningPort>) -> Self {
        Self {
            positioning: Some(positioning),
            default_coordinates: GeoLocation::shinjuku(),
            timeout: DEFAULT_LOCATION_TIMEOUT,
        }
    }

    /// Create a location source with no sensor; always yields the default
    #[must_use]
    pub fn without_sensor() -> Self {
        Self {
            positioning: None,
            default_coordinates: GeoLocation::shinjuku(),
            timeout: DEFAULT_LOCATION_TIMEOUT,
        }
    }

    /// Override the fallback coordinates
    #[must_use]
    pub const fn with_default_coordinates(mut self, coordinates: GeoLocation) -> Self {
        self.default_coordinates = coordinates;
        self
    }

    /// Override the sensor timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fallback coordinates
    #[must_use]
    pub const fn default_coordinates(&self) -> GeoLocation {
        self.default_coordinates
    }

    /// Read the position once, falling back to the default on any failure
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> StageOutcome<GeoLocation> {
        let Some(positioning) = &self.positioning else {
            return self.fallback("no positioning capability");
        };

        match tokio::time::timeout(self.timeout, positioning.current_position()).await {
            Ok(Ok(location)) => {
                debug!(%location, "Position acquired");
                StageOutcome::Ok(location)
            },
            Ok(Err(e)) => self.fallback(&e.to_string()),
            Err(_) => self.fallback(&format!("no answer within {:?}", self.timeout)),
        }
    }

    fn fallback(&self, reason: &str) -> StageOutcome<GeoLocation> {
        let degradation = Degradation::SensorUnavailable;
        warn!(
            degradation = degradation.tag(),
            reason,
            default = %self.default_coordinates,
            "Position unavailable, using default coordinates"
        );
        StageOutcome::Degraded(self.default_coordinates, degradation)
    }
}
