//! Address resolution stage

use std::sync::Arc;

use domain::entities::Degradation;
use domain::value_objects::{Address, GeoLocation};
use tracing::{debug, instrument, warn};

use crate::ports::GeocodingPort;
use crate::services::outcome::StageOutcome;

/// Turns coordinates into a human-readable address
///
/// Never fails: when the geocoder finds nothing or errors, the address is
/// synthesized from the coordinates with four decimals.
pub struct AddressResolver {
    geocoder: Arc<dyn GeocodingPort>,
    default_address: Address,
}

impl std::fmt::Debug for AddressResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressResolver")
            .field("default_address", &self.default_address)
            .finish_non_exhaustive()
    }
}

impl AddressResolver {
    /// Create a resolver with the Shinjuku default address
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self {
            geocoder,
            default_address: Address::shinjuku(),
        }
    }

    /// Override the address paired with the default coordinates
    #[must_use]
    pub fn with_default_address(mut self, address: Address) -> Self {
        self.default_address = address;
        self
    }

    /// Resolve `location` to an address
    ///
    /// When `location_is_live` is false the coordinates are the configured
    /// default and the geocoder is not consulted.
    #[instrument(skip(self))]
    pub async fn resolve(&self, location: GeoLocation, location_is_live: bool) -> StageOutcome<Address> {
        if !location_is_live {
            debug!(address = %self.default_address, "Using default address for default coordinates");
            return StageOutcome::Ok(self.default_address.clone());
        }

        let degradation = match self.geocoder.reverse_geocode(location).await {
            Ok(addresses) => {
                if let Some(address) = addresses.into_iter().find_map(|a| Address::new(a).ok()) {
                    debug!(%address, "Address resolved");
                    return StageOutcome::Ok(address);
                }
                Degradation::GeocodeEmpty
            },
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed");
                Degradation::GeocodeFailed
            },
        };

        let address = Address::from_coordinates(&location);
        warn!(
            degradation = degradation.tag(),
            %address,
            "Falling back to coordinate address"
        );
        StageOutcome::Degraded(address, degradation)
    }
}
