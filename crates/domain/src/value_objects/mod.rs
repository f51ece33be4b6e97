//! Value Objects - Immutable, identity-less domain primitives

mod address;
mod geo_location;

pub use address::Address;
pub use geo_location::{GeoLocation, InvalidCoordinates};
