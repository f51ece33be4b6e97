//! The terminal artifact of a guidance run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{ResolvedPlace, RouteInfo};

/// A recovered upstream failure that degraded, but did not stop, a guidance run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Positioning failed, timed out, or is absent; default coordinates used
    SensorUnavailable,
    /// Reverse geocoding returned no results; coordinate string used
    GeocodeEmpty,
    /// Reverse geocoding failed; coordinate string used
    GeocodeFailed,
    /// Place search returned no match; name-only place used
    PlaceNotFound,
    /// Place search failed; name-only place used
    PlaceSearchFailed,
    /// Origin or destination coordinates missing; routing not attempted
    RouteSkipped,
    /// Routing unavailable or reported failure; no route attached
    RouteUnavailable,
}

impl Degradation {
    /// Stable tag for logs and telemetry
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::SensorUnavailable => "sensor_unavailable",
            Self::GeocodeEmpty => "geocode_empty",
            Self::GeocodeFailed => "geocode_failed",
            Self::PlaceNotFound => "place_not_found",
            Self::PlaceSearchFailed => "place_search_failed",
            Self::RouteSkipped => "route_skipped",
            Self::RouteUnavailable => "route_unavailable",
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of a successful guidance run
///
/// Always producible once a facility name exists; place detail and route
/// may be degraded, which is recorded in `degradations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceResult {
    /// The recommended shelter
    pub place: ResolvedPlace,
    /// Walking route to the shelter, if one could be computed
    pub route: Option<RouteInfo>,
    /// Recovered failures encountered during the run, in stage order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl GuidanceResult {
    /// Create a result with no recorded degradations
    #[must_use]
    pub const fn new(place: ResolvedPlace, route: Option<RouteInfo>) -> Self {
        Self {
            place,
            route,
            degradations: Vec::new(),
        }
    }

    /// Attach the degradations recorded during the run
    #[must_use]
    pub fn with_degradations(mut self, degradations: Vec<Degradation>) -> Self {
        self.degradations = degradations;
        self
    }

    /// Whether any stage fell back to a degraded value
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Whether the given degradation was recorded
    #[must_use]
    pub fn has_degradation(&self, degradation: Degradation) -> bool {
        self.degradations.contains(&degradation)
    }
}
