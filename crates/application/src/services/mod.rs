//! Application services - Use case implementations

mod address_resolver;
mod guidance_service;
pub mod location_helper;
mod location_source;
mod outcome;
mod place_resolver;
mod route_computer;
mod shelter_recommender;

pub use address_resolver::AddressResolver;
pub use guidance_service::{GuidanceOutcome, GuidanceService, PipelineState};
pub use location_helper::{RouteOrigin, maps_link, route_link, search_link};
pub use location_source::{DEFAULT_LOCATION_TIMEOUT, LocationSource};
pub use outcome::{GuidanceFailure, RECOMMENDATION_FAILED_MESSAGE, StageOutcome};
pub use place_resolver::PlaceResolver;
pub use route_computer::RouteComputer;
pub use shelter_recommender::ShelterRecommender;
