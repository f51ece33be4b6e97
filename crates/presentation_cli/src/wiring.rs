//! Builds a `GuidanceService` from configuration

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::ports::{DirectionsPort, GeocodingPort, PlaceSearchPort, PositioningPort};
use application::{
    AddressResolver, GuidanceService, LocationSource, PlaceResolver, RouteComputer,
    ShelterRecommender,
};
use domain::value_objects::GeoLocation;
use infrastructure::{
    AppConfig, GoogleMapsAdapter, IpPositioning, PositioningProvider, RecommendationAdapter,
    StaticPositioning,
};
use tracing::debug;

/// Positioning port for this invocation
///
/// Coordinates given on the command line win over the configured provider.
fn positioning(
    config: &AppConfig,
    position: Option<GeoLocation>,
) -> anyhow::Result<Arc<dyn PositioningPort>> {
    let port: Arc<dyn PositioningPort> = match (position, config.location.provider) {
        (Some(position), _) => Arc::new(StaticPositioning::new(position)),
        (None, PositioningProvider::Ip) => Arc::new(
            IpPositioning::new(&config.location.ip).context("IP positioning unavailable")?,
        ),
        (None, PositioningProvider::Static) => Arc::new(StaticPositioning::absent()),
    };
    Ok(port)
}

/// Wire adapters and stages into a ready service
pub fn build_service(
    config: &AppConfig,
    position: Option<GeoLocation>,
) -> anyhow::Result<GuidanceService> {
    let default_location = config
        .location
        .default_location()
        .context("location default coordinates out of range")?;
    let default_address = config
        .location
        .default_address()
        .context("location default address is empty")?;

    let maps = Arc::new(
        GoogleMapsAdapter::new(&config.maps.to_maps_config())
            .context("failed to initialize maps adapter")?,
    );
    let recommendation = Arc::new(
        RecommendationAdapter::new(&config.recommendation.to_recommendation_config())
            .context("failed to initialize recommendation adapter")?,
    );

    let location = LocationSource::new(positioning(config, position)?)
        .with_default_coordinates(default_location)
        .with_timeout(Duration::from_secs(config.location.timeout_secs));

    let geocoder: Arc<dyn GeocodingPort> = maps.clone();
    let address = AddressResolver::new(geocoder).with_default_address(default_address);

    let search: Arc<dyn PlaceSearchPort> = maps.clone();
    let places = PlaceResolver::new(search);

    let routes = if config.routing.enabled {
        let directions: Arc<dyn DirectionsPort> = maps;
        RouteComputer::new(directions)
    } else {
        RouteComputer::disabled()
    };

    debug!(
        provider = %config.location.provider,
        live_override = position.is_some(),
        routing = config.routing.enabled,
        "Guidance service wired"
    );

    Ok(GuidanceService::new(
        location,
        address,
        ShelterRecommender::new(recommendation),
        places,
        routes,
    ))
}

#[cfg(test)]
mod tests {
    use application::PipelineState;
    use infrastructure::{MapsAppConfig, RecommendationAppConfig};
    use secrecy::SecretString;

    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            maps: MapsAppConfig {
                api_key: Some(SecretString::from("k-123".to_string())),
                ..Default::default()
            },
            recommendation: RecommendationAppConfig {
                endpoint_url: "http://127.0.0.1:9/guidance".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn builds_with_valid_config() {
        let service = build_service(&valid_config(), None).unwrap();
        assert_eq!(service.current_state(), PipelineState::Idle);
        assert!(service.last_known_position().is_none());
    }

    #[test]
    fn builds_with_routing_disabled() {
        let mut config = valid_config();
        config.routing.enabled = false;
        assert!(build_service(&config, Some(GeoLocation::shinjuku())).is_ok());
    }

    #[test]
    fn missing_maps_key_fails() {
        let mut config = valid_config();
        config.maps.api_key = None;
        let err = build_service(&config, None).unwrap_err();
        assert!(err.to_string().contains("maps"));
    }

    #[test]
    fn missing_endpoint_fails() {
        let mut config = valid_config();
        config.recommendation.endpoint_url = String::new();
        assert!(build_service(&config, None).is_err());
    }

    #[test]
    fn invalid_default_coordinates_fail() {
        let mut config = valid_config();
        config.location.default_latitude = -120.0;
        let err = build_service(&config, None).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
