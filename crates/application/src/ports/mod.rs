//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod directions_port;
mod geocoding_port;
mod place_search_port;
mod positioning_port;
mod recommendation_port;

#[cfg(test)]
pub use directions_port::MockDirectionsPort;
pub use directions_port::DirectionsPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use place_search_port::MockPlaceSearchPort;
pub use place_search_port::{PlaceCandidate, PlaceSearchPort};
#[cfg(test)]
pub use positioning_port::MockPositioningPort;
pub use positioning_port::{PositioningError, PositioningPort};
#[cfg(test)]
pub use recommendation_port::MockRecommendationPort;
pub use recommendation_port::{
    RecommendationFailure, RecommendationPort, RecommendationRequest, RecommendationResponse,
};
