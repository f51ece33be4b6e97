//! Maps data models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code reported in the body of every Maps web-service response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Request succeeded with at least one result
    Ok,
    /// Request succeeded but matched nothing
    ZeroResults,
    /// Origin, destination or waypoint could not be geocoded
    NotFound,
    /// Quota exhausted
    OverQueryLimit,
    /// Key missing, invalid, or not enabled for this API
    RequestDenied,
    /// Malformed request
    InvalidRequest,
    /// Transient server-side error
    UnknownError,
    /// Anything else the provider may add in the future
    Other(String),
}

impl ProviderStatus {
    /// Parse a raw status string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "NOT_FOUND" => Self::NotFound,
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => Self::Other(other.to_string()),
        }
    }

    /// Raw status string as sent by the provider
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::NotFound => "NOT_FOUND",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(s) => s,
        }
    }

    /// Whether the request succeeded (possibly with zero results)
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Ok | Self::ZeroResults)
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate returned by place search, in provider rank order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Place name
    pub name: String,
    /// Formatted address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    /// Latitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl PlaceCandidate {
    /// Create a new candidate without address or coordinates
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            formatted_address: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Attach a formatted address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.formatted_address = Some(address.into());
        self
    }

    /// Attach coordinates
    #[must_use]
    pub const fn with_coords(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// First-leg summary of a walking route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkingRoute {
    /// Provider-formatted distance (e.g. "820 m")
    pub distance_text: String,
    /// Provider-formatted duration (e.g. "11 mins")
    pub duration_text: String,
}
