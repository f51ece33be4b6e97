//! Maps adapter - Implements GeocodingPort, PlaceSearchPort and DirectionsPort
//! using integration_maps

use application::error::ApplicationError;
use application::ports::{DirectionsPort, GeocodingPort, PlaceCandidate, PlaceSearchPort};
use async_trait::async_trait;
use domain::entities::RouteInfo;
use domain::value_objects::GeoLocation;
use integration_maps::{
    GoogleMapsClient, MapsClient, MapsConfig, MapsError, PlaceCandidate as IntegrationCandidate,
    WalkingRoute,
};
use tracing::{debug, instrument};

/// Adapter for the Google Maps web services
pub struct GoogleMapsAdapter {
    client: GoogleMapsClient,
}

impl std::fmt::Debug for GoogleMapsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsAdapter")
            .field("client", &"GoogleMapsClient")
            .finish()
    }
}

impl GoogleMapsAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (e.g. no API key) or
    /// the HTTP client fails to initialize.
    pub fn new(config: &MapsConfig) -> Result<Self, ApplicationError> {
        let client = GoogleMapsClient::new(config).map_err(|e| match e {
            MapsError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Internal(other.to_string()),
        })?;
        Ok(Self { client })
    }

    /// Map integration maps error to application error
    fn map_error(err: MapsError) -> ApplicationError {
        match err {
            MapsError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            MapsError::Timeout { timeout_secs } => {
                ApplicationError::Timeout(format!("maps request after {timeout_secs}s"))
            },
            MapsError::ConfigurationError(e) => ApplicationError::Configuration(e),
            MapsError::ConnectionFailed(e)
            | MapsError::RequestFailed(e)
            | MapsError::ParseError(e)
            | MapsError::InvalidQuery(e) => ApplicationError::ExternalService(e),
            MapsError::ProviderStatus { status, message } => {
                ApplicationError::ExternalService(format!("{status}: {message}"))
            },
        }
    }

    /// Convert an integration candidate to the port's candidate
    ///
    /// Out-of-range geometry is dropped rather than failing the candidate.
    fn map_candidate(candidate: IntegrationCandidate) -> PlaceCandidate {
        let location = match (candidate.latitude, candidate.longitude) {
            (Some(lat), Some(lon)) => GeoLocation::new(lat, lon).ok(),
            _ => None,
        };
        PlaceCandidate::new(candidate.name, candidate.formatted_address, location)
    }

    fn map_route(route: WalkingRoute) -> RouteInfo {
        RouteInfo::new(route.distance_text, route.duration_text)
    }
}

#[async_trait]
impl GeocodingPort for GoogleMapsAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn reverse_geocode(&self, location: GeoLocation) -> Result<Vec<String>, ApplicationError> {
        let addresses = self
            .client
            .reverse_geocode(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        debug!(count = addresses.len(), "Reverse geocoded location");
        Ok(addresses)
    }
}

#[async_trait]
impl PlaceSearchPort for GoogleMapsAdapter {
    #[instrument(skip(self))]
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApplicationError> {
        let candidates = self
            .client
            .find_place(query)
            .await
            .map_err(Self::map_error)?;

        debug!(count = candidates.len(), "Place search completed");
        Ok(candidates.into_iter().map(Self::map_candidate).collect())
    }
}

#[async_trait]
impl DirectionsPort for GoogleMapsAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn walking_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<RouteInfo>, ApplicationError> {
        let routes = self
            .client
            .walking_directions(
                origin.latitude(),
                origin.longitude(),
                destination.latitude(),
                destination.longitude(),
            )
            .await
            .map_err(Self::map_error)?;

        debug!(count = routes.len(), "Walking directions received");
        Ok(routes.into_iter().map(Self::map_route).collect())
    }
}
