//! IP-based positioning client
//!
//! Approximates the device position from its public IP address using an
//! [ipapi.co](https://ipapi.co)-compatible JSON endpoint. Single attempt per
//! call; callers decide what to do when positioning is unavailable.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::MapsError;

/// Configuration for the IP geolocation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpGeolocationConfig {
    /// Base URL for the IP geolocation API
    #[serde(default = "default_geolocation_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geolocation_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geolocation_base_url() -> String {
    "https://ipapi.co".to_string()
}

const fn default_geolocation_timeout_secs() -> u64 {
    5
}

impl Default for IpGeolocationConfig {
    fn default() -> Self {
        Self {
            base_url: default_geolocation_base_url(),
            timeout_secs: default_geolocation_timeout_secs(),
        }
    }
}

/// Trait for device positioning clients
#[async_trait]
pub trait PositioningClient: Send + Sync {
    /// Read the current device position
    async fn current_position(&self) -> Result<GeoLocation, MapsError>;
}

/// Positioning client backed by IP geolocation
#[derive(Debug)]
pub struct IpGeolocationClient {
    client: Client,
    config: IpGeolocationConfig,
}

impl IpGeolocationClient {
    /// Create a new IP geolocation client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &IpGeolocationConfig) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Lifeline/0.1")
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the raw JSON body into a validated location
    fn parse_position(body: &str) -> Result<GeoLocation, MapsError> {
        let raw: RawPosition =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        if raw.error.unwrap_or(false) {
            return Err(MapsError::ProviderStatus {
                status: "ERROR".to_string(),
                message: raw.reason.unwrap_or_default(),
            });
        }

        let (Some(lat), Some(lon)) = (raw.latitude, raw.longitude) else {
            return Err(MapsError::ParseError(
                "Position response lacks latitude/longitude".to_string(),
            ));
        };

        GeoLocation::new(lat, lon).map_err(|e| MapsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl PositioningClient for IpGeolocationClient {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<GeoLocation, MapsError> {
        let url = format!("{}/json/", self.config.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                MapsError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                MapsError::ConnectionFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(MapsError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        let position = Self::parse_position(&body)?;
        debug!(%position, "Position resolved from IP");
        Ok(position)
    }
}

/// Raw IP geolocation API response
#[derive(Debug, Deserialize)]
struct RawPosition {
    latitude: Option<f64>,
    longitude: Option<f64>,
    error: Option<bool>,
    reason: Option<String>,
}
