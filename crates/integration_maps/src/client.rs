//! Google Maps Platform client
//!
//! Provides reverse geocoding, Find Place text search and walking directions
//! using the public [Maps web services](https://developers.google.com/maps/documentation).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::models::{PlaceCandidate, ProviderStatus, WalkingRoute};

/// Trait for maps service clients
#[async_trait]
pub trait MapsClient: Send + Sync {
    /// Convert coordinates to formatted addresses, best match first
    ///
    /// An empty vector means the provider found nothing.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<String>, MapsError>;

    /// Search places by free text, provider rank order
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>, MapsError>;

    /// Walking directions in metric units: the first route's first leg, or
    /// nothing when that leg is unusable
    async fn walking_directions(
        &self,
        from_lat: f64,
        from_lon: f64,
        to_lat: f64,
        to_lon: f64,
    ) -> Result<Vec<WalkingRoute>, MapsError>;
}

/// Google Maps web-service client
#[derive(Debug)]
pub struct GoogleMapsClient {
    client: Client,
    config: MapsConfig,
}

impl GoogleMapsClient {
    /// Create a new Google Maps client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &MapsConfig) -> Result<Self, MapsError> {
        config.validate().map_err(MapsError::ConfigurationError)?;

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

    /// Issue a GET against a Maps endpoint and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let url = format!("{}{endpoint}", self.config.base_url);

        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("key", self.config.api_key_str().to_string()));
        if !self.config.language.is_empty() {
            query.push(("language", self.config.language.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MapsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    MapsError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(MapsError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| MapsError::ParseError(e.to_string()))
    }

    /// Map a body-level status to success or a typed error
    fn check_status(
        raw_status: &str,
        error_message: Option<String>,
    ) -> Result<ProviderStatus, MapsError> {
        let status = ProviderStatus::parse(raw_status);
        if status.is_success() {
            return Ok(status);
        }
        if status == ProviderStatus::OverQueryLimit {
            return Err(MapsError::RateLimitExceeded {
                retry_after_secs: None,
            });
        }
        Err(MapsError::ProviderStatus {
            status: status.as_str().to_string(),
            message: error_message.unwrap_or_default(),
        })
    }

    /// Parse a raw geocoding response into formatted addresses
    fn parse_geocode_response(raw: RawGeocodeResponse) -> Result<Vec<String>, MapsError> {
        Self::check_status(&raw.status, raw.error_message)?;

        Ok(raw
            .results
            .into_iter()
            .filter_map(|r| r.formatted_address)
            .filter(|a| !a.trim().is_empty())
            .collect())
    }

    /// Parse a raw Find Place response into candidates
    fn parse_find_place_response(
        raw: RawFindPlaceResponse,
    ) -> Result<Vec<PlaceCandidate>, MapsError> {
        Self::check_status(&raw.status, raw.error_message)?;

        Ok(raw
            .candidates
            .into_iter()
            .map(Self::convert_candidate)
            .collect())
    }

    /// Convert a raw candidate to a typed candidate
    fn convert_candidate(raw: RawCandidate) -> PlaceCandidate {
        let (latitude, longitude) = raw
            .geometry
            .map_or((None, None), |g| (Some(g.location.lat), Some(g.location.lng)));

        PlaceCandidate {
            name: raw.name.unwrap_or_default(),
            formatted_address: raw.formatted_address,
            latitude,
            longitude,
        }
    }

    /// Parse a raw directions response into the first route's first leg
    ///
    /// Only the first route is authoritative. When it has no leg, or the leg
    /// lacks distance or duration text, the result is empty.
    fn parse_directions_response(
        raw: RawDirectionsResponse,
    ) -> Result<Vec<WalkingRoute>, MapsError> {
        Self::check_status(&raw.status, raw.error_message)?;

        let leg = raw
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.legs.into_iter().next());

        let route = leg.and_then(|leg| {
            let distance_text = non_blank(leg.distance?.text)?;
            let duration_text = non_blank(leg.duration?.text)?;
            Some(WalkingRoute {
                distance_text,
                duration_text,
            })
        });

        if route.is_none() {
            warn!("First route has no usable leg");
        }

        Ok(route.into_iter().collect())
    }
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl MapsClient for GoogleMapsClient {
    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<String>, MapsError> {
        let params = [("latlng", format!("{latitude},{longitude}"))];

        debug!(%latitude, %longitude, "Reverse geocoding");

        let raw: RawGeocodeResponse = self.get_json("/maps/api/geocode/json", &params).await?;
        let addresses = Self::parse_geocode_response(raw)?;

        debug!(count = addresses.len(), "Reverse geocoding results");
        Ok(addresses)
    }

    #[instrument(skip(self))]
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>, MapsError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MapsError::InvalidQuery(
                "Search query must not be empty".to_string(),
            ));
        }

        let params = [
            ("input", query.to_string()),
            ("inputtype", "textquery".to_string()),
            ("fields", "name,formatted_address,geometry".to_string()),
        ];

        debug!(%query, "Searching place by name");

        let raw: RawFindPlaceResponse = self
            .get_json("/maps/api/place/findplacefromtext/json", &params)
            .await?;
        let candidates = Self::parse_find_place_response(raw)?;

        if candidates.is_empty() {
            warn!(%query, "No place candidates found");
        }

        Ok(candidates)
    }

    #[instrument(skip(self), fields(from = %format!("{from_lat},{from_lon}"), to = %format!("{to_lat},{to_lon}")))]
    async fn walking_directions(
        &self,
        from_lat: f64,
        from_lon: f64,
        to_lat: f64,
        to_lon: f64,
    ) -> Result<Vec<WalkingRoute>, MapsError> {
        let params = [
            ("origin", format!("{from_lat},{from_lon}")),
            ("destination", format!("{to_lat},{to_lon}")),
            ("mode", "walking".to_string()),
            ("units", "metric".to_string()),
        ];

        debug!("Requesting walking directions");

        let raw: RawDirectionsResponse =
            self.get_json("/maps/api/directions/json", &params).await?;
        let routes = Self::parse_directions_response(raw)?;

        debug!(count = routes.len(), "Routes found");
        Ok(routes)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    #[serde(default)]
    results: Vec<RawGeocodeResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResult {
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFindPlaceResponse {
    #[serde(default)]
    candidates: Vec<RawCandidate>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCandidate {
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    #[serde(default)]
    routes: Vec<RawRoute>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    distance: Option<RawTextValue>,
    duration: Option<RawTextValue>,
}

#[derive(Debug, Deserialize)]
struct RawTextValue {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_geocode_ok() {
        let raw = parse(
            r#"{
                "status": "OK",
                "results": [
                    { "formatted_address": "Tokyo, Shinjuku" },
                    { "formatted_address": "Shinjuku City, Tokyo, Japan" }
                ]
            }"#,
        );
        let addresses = GoogleMapsClient::parse_geocode_response(raw).unwrap();
        assert_eq!(addresses, vec!["Tokyo, Shinjuku", "Shinjuku City, Tokyo, Japan"]);
    }

    #[test]
    fn test_parse_geocode_zero_results() {
        let raw = parse(r#"{ "status": "ZERO_RESULTS", "results": [] }"#);
        let addresses = GoogleMapsClient::parse_geocode_response(raw).unwrap();
        assert!(addresses.is_empty());
    }

    #[test]
    fn test_parse_geocode_denied() {
        let raw = parse(
            r#"{ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }"#,
        );
        let err = GoogleMapsClient::parse_geocode_response(raw).unwrap_err();
        assert!(matches!(err, MapsError::ProviderStatus { ref status, .. } if status == "REQUEST_DENIED"));
        assert!(err.to_string().contains("API key is invalid"));
    }

    #[test]
    fn test_parse_geocode_skips_blank_addresses() {
        let raw = parse(
            r#"{ "status": "OK", "results": [ { "formatted_address": "  " }, {} ] }"#,
        );
        let addresses = GoogleMapsClient::parse_geocode_response(raw).unwrap();
        assert!(addresses.is_empty());
    }

    #[test]
    fn test_parse_find_place_ok() {
        let raw = parse(
            r#"{
                "status": "OK",
                "candidates": [{
                    "name": "Shinjuku Sports Center",
                    "formatted_address": "3-5-1 Okubo, Shinjuku City, Tokyo 169-0072, Japan",
                    "geometry": { "location": { "lat": 35.7018, "lng": 139.7007 } }
                }]
            }"#,
        );
        let candidates = GoogleMapsClient::parse_find_place_response(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Shinjuku Sports Center");
        assert!((candidates[0].latitude.unwrap() - 35.7018).abs() < 1e-9);
        assert!((candidates[0].longitude.unwrap() - 139.7007).abs() < 1e-9);
    }

    #[test]
    fn test_parse_find_place_without_geometry() {
        let raw = parse(
            r#"{ "status": "OK", "candidates": [{ "name": "Gym", "formatted_address": "Tokyo" }] }"#,
        );
        let candidates = GoogleMapsClient::parse_find_place_response(raw).unwrap();
        assert!(candidates[0].latitude.is_none());
        assert_eq!(candidates[0].formatted_address.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_parse_directions_first_leg() {
        let raw = parse(
            r#"{
                "status": "OK",
                "routes": [{
                    "legs": [
                        { "distance": { "text": "820m", "value": 820 }, "duration": { "text": "11 min", "value": 660 } },
                        { "distance": { "text": "1 km", "value": 1000 }, "duration": { "text": "13 min", "value": 780 } }
                    ]
                }]
            }"#,
        );
        let routes = GoogleMapsClient::parse_directions_response(raw).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].distance_text, "820m");
        assert_eq!(routes[0].duration_text, "11 min");
    }

    #[test]
    fn test_parse_directions_legless_first_route_is_not_replaced() {
        let raw = parse(
            r#"{
                "status": "OK",
                "routes": [
                    { "legs": [] },
                    { "legs": [{ "distance": { "text": "5 km" }, "duration": { "text": "70 min" } }] }
                ]
            }"#,
        );
        let routes = GoogleMapsClient::parse_directions_response(raw).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn test_parse_directions_leg_without_text_is_no_route() {
        let raw = parse(r#"{ "status": "OK", "routes": [{ "legs": [{}] }] }"#);
        assert!(GoogleMapsClient::parse_directions_response(raw).unwrap().is_empty());

        let raw = parse(
            r#"{ "status": "OK", "routes": [{ "legs": [{ "distance": { "text": "820m" }, "duration": { "text": " " } }] }] }"#,
        );
        assert!(GoogleMapsClient::parse_directions_response(raw).unwrap().is_empty());
    }

    #[test]
    fn test_parse_directions_not_found() {
        let raw = parse(r#"{ "status": "NOT_FOUND", "routes": [] }"#);
        let err = GoogleMapsClient::parse_directions_response(raw).unwrap_err();
        assert!(matches!(err, MapsError::ProviderStatus { .. }));
    }

    #[test]
    fn test_over_query_limit_is_rate_limit() {
        let raw = parse(r#"{ "status": "OVER_QUERY_LIMIT", "routes": [] }"#);
        let err = GoogleMapsClient::parse_directions_response(raw).unwrap_err();
        assert!(matches!(
            err,
            MapsError::RateLimitExceeded {
                retry_after_secs: None
            }
        ));
    }

    #[test]
    fn test_new_rejects_missing_key() {
        let result = GoogleMapsClient::new(&MapsConfig::default());
        assert!(matches!(result, Err(MapsError::ConfigurationError(_))));
    }
}
