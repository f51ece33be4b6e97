//! Place resolution stage

use std::sync::Arc;

use domain::entities::{Degradation, ResolvedPlace};
use tracing::{debug, instrument, warn};

use crate::ports::PlaceSearchPort;
use crate::services::outcome::StageOutcome;

/// Resolves a recommended facility name to a geocoded place
///
/// Falls back to a name-only place so the recommendation stays actionable.
pub struct PlaceResolver {
    search: Arc<dyn PlaceSearchPort>,
}

impl std::fmt::Debug for PlaceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceResolver").finish_non_exhaustive()
    }
}

impl PlaceResolver {
    /// Create a new resolver
    #[must_use]
    pub fn new(search: Arc<dyn PlaceSearchPort>) -> Self {
        Self { search }
    }

    /// Look up `name`; the first-ranked candidate is authoritative
    #[instrument(skip(self))]
    pub async fn resolve_by_name(&self, name: &str) -> StageOutcome<ResolvedPlace> {
        let degradation = match self.search.find_place(name).await {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(candidate) => {
                    let resolved_name = if candidate.name.trim().is_empty() {
                        name.to_string()
                    } else {
                        candidate.name
                    };
                    let place = ResolvedPlace::new(
                        resolved_name,
                        candidate.formatted_address,
                        candidate.location,
                    );
                    debug!(place = %place.name, has_coordinates = place.coordinates.is_some(), "Place resolved");
                    return StageOutcome::Ok(place);
                },
                None => Degradation::PlaceNotFound,
            },
            Err(e) => {
                warn!(error = %e, "Place search failed");
                Degradation::PlaceSearchFailed
            },
        };

        warn!(
            degradation = degradation.tag(),
            facility = name,
            "Using name-only place"
        );
        StageOutcome::Degraded(ResolvedPlace::name_only(name), degradation)
    }
}
