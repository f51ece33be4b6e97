//! Shelter places and walking routes

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Placeholder address used when a facility could not be found by place search
pub const ADDRESS_UNKNOWN: &str = "address unknown";

/// A recommended facility resolved to an address and (optionally) coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    /// Facility name, as returned by place search or the recommendation
    pub name: String,
    /// Normalized address, or [`ADDRESS_UNKNOWN`] for name-only places
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Facility coordinates if place search returned geometry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoLocation>,
}

impl ResolvedPlace {
    /// Create a fully resolved place
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: Option<String>,
        coordinates: Option<GeoLocation>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            coordinates,
        }
    }

    /// Create the degraded, name-only form used when place search finds nothing
    #[must_use]
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Some(ADDRESS_UNKNOWN.to_string()),
            coordinates: None,
        }
    }

    /// Whether this place carries a real address (not the unknown marker)
    #[must_use]
    pub fn has_known_address(&self) -> bool {
        self.address
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty() && a != ADDRESS_UNKNOWN)
    }

    /// Text used to address this place in search queries and map links
    ///
    /// Prefers the known address, falling back to the facility name.
    #[must_use]
    pub fn destination_text(&self) -> &str {
        match self.address.as_deref() {
            Some(address) if self.has_known_address() => address,
            _ => &self.name,
        }
    }
}

/// Walking route summary between origin and a resolved place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Provider-formatted distance (e.g. "820 m")
    pub distance_text: String,
    /// Provider-formatted duration (e.g. "11 mins")
    pub duration_text: String,
}

impl RouteInfo {
    /// Create a new route summary
    #[must_use]
    pub fn new(distance_text: impl Into<String>, duration_text: impl Into<String>) -> Self {
        Self {
            distance_text: distance_text.into(),
            duration_text: duration_text.into(),
        }
    }
}
