//! Walking directions port

use async_trait::async_trait;
use domain::entities::RouteInfo;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for walking route computation
///
/// Travel mode is always walking and units are always metric.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Compute walking routes, best first
    ///
    /// Only the first route is used. An empty vector is treated as a
    /// routing failure by callers.
    async fn walking_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<RouteInfo>, ApplicationError>;
}
