//! Place search port
//!
//! Defines the interface for resolving a facility name to a geocoded place.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A place returned by place search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Place name as known to the provider
    pub name: String,
    /// Provider-formatted address
    pub formatted_address: Option<String>,
    /// Place coordinates
    pub location: Option<GeoLocation>,
}

impl PlaceCandidate {
    /// Create a new candidate
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        formatted_address: Option<String>,
        location: Option<GeoLocation>,
    ) -> Self {
        Self {
            name: name.into(),
            formatted_address,
            location,
        }
    }
}

/// Port for text-based place search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceSearchPort: Send + Sync {
    /// Search places by free text, in provider rank order
    ///
    /// The first candidate is authoritative. An empty vector means no match.
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApplicationError>;
}
