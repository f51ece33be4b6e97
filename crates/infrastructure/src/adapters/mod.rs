//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod maps_adapter;
mod positioning_adapter;
mod recommendation_adapter;

pub use maps_adapter::GoogleMapsAdapter;
pub use positioning_adapter::{IpPositioning, StaticPositioning};
pub use recommendation_adapter::RecommendationAdapter;
