//! Walking route stage

use std::sync::Arc;

use domain::entities::{Degradation, ResolvedPlace, RouteInfo};
use domain::value_objects::GeoLocation;
use tracing::{debug, instrument, warn};

use crate::ports::DirectionsPort;
use crate::services::outcome::StageOutcome;

/// Computes a walking route to a resolved place
///
/// Never fails; a missing route is reported as a degradation and the place
/// is rendered without distance and duration.
pub struct RouteComputer {
    directions: Option<Arc<dyn DirectionsPort>>,
}

impl std::fmt::Debug for RouteComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteComputer")
            .field("enabled", &self.directions.is_some())
            .finish()
    }
}

impl RouteComputer {
    /// Create a route computer backed by a directions port
    #[must_use]
    pub fn new(directions: Arc<dyn DirectionsPort>) -> Self {
        Self {
            directions: Some(directions),
        }
    }

    /// Create a route computer with routing disabled
    #[must_use]
    pub const fn disabled() -> Self {
        Self { directions: None }
    }

    /// Compute the walking route from `origin` to `destination`
    #[instrument(skip(self, destination), fields(destination = %destination.name))]
    pub async fn compute_walking_route(
        &self,
        origin: Option<GeoLocation>,
        destination: &ResolvedPlace,
    ) -> StageOutcome<Option<RouteInfo>> {
        let (Some(origin), Some(target)) = (origin, destination.coordinates) else {
            return Self::no_route(Degradation::RouteSkipped, "origin or destination coordinates missing");
        };

        let Some(directions) = &self.directions else {
            return Self::no_route(Degradation::RouteUnavailable, "routing disabled");
        };

        match directions.walking_route(origin, target).await {
            Ok(routes) => match routes.into_iter().next() {
                Some(route) => {
                    debug!(distance = %route.distance_text, duration = %route.duration_text, "Route computed");
                    StageOutcome::Ok(Some(route))
                },
                None => Self::no_route(Degradation::RouteUnavailable, "provider returned no routes"),
            },
            Err(e) => Self::no_route(Degradation::RouteUnavailable, &e.to_string()),
        }
    }

    fn no_route(degradation: Degradation, reason: &str) -> StageOutcome<Option<RouteInfo>> {
        warn!(degradation = degradation.tag(), reason, "No walking route");
        StageOutcome::Degraded(None, degradation)
    }
}
