//! Maps integration for Lifeline
//!
//! Provides reverse geocoding, place search and walking directions via the
//! [Google Maps Platform](https://developers.google.com/maps/documentation)
//! web services, and coarse device positioning via an IP geolocation
//! service.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern used by the other integration
//! crates. [`MapsClient`] defines the interface for geocoding, place search
//! and routing, implemented by [`GoogleMapsClient`]. [`PositioningClient`]
//! handles device positioning via [`IpGeolocationClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_maps::{GoogleMapsClient, MapsClient, MapsConfig};
//!
//! let config = MapsConfig::default();
//! let client = GoogleMapsClient::new(&config)?;
//!
//! let routes = client.walking_directions(
//!     35.6896, 139.7006, // Shinjuku Station
//!     35.7018, 139.7007, // Shinjuku Sports Center
//! ).await?;
//! ```

mod client;
mod config;
mod error;
mod geolocation;
mod models;

pub use client::{GoogleMapsClient, MapsClient};
pub use config::MapsConfig;
pub use error::MapsError;
pub use geolocation::{IpGeolocationClient, IpGeolocationConfig, PositioningClient};
pub use models::{PlaceCandidate, ProviderStatus, WalkingRoute};
