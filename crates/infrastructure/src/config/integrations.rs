//! Integration configurations: maps, recommendation backend, routing

use integration_maps::MapsConfig;
use integration_recommendation::{AuthScheme, ContractVersion, RecommendationConfig};
use secrecy::SecretString;
use serde::Deserialize;

use super::default_true;

/// Google Maps Platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapsAppConfig {
    /// API key (set via `LIFELINE_MAPS__API_KEY` rather than the file)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Base URL for the Maps web services
    #[serde(default = "default_maps_base_url")]
    pub base_url: String,

    /// Preferred response language
    #[serde(default = "default_maps_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_maps_timeout")]
    pub timeout_secs: u64,
}

fn default_maps_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_maps_language() -> String {
    "ja".to_string()
}

const fn default_maps_timeout() -> u64 {
    10
}

impl Default for MapsAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_maps_base_url(),
            language: default_maps_language(),
            timeout_secs: default_maps_timeout(),
        }
    }
}

impl MapsAppConfig {
    /// Convert to `integration_maps::MapsConfig`
    #[must_use]
    pub fn to_maps_config(&self) -> MapsConfig {
        MapsConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
            language: self.language.clone(),
        }
    }
}

/// Shelter recommendation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationAppConfig {
    /// Full URL of the recommendation endpoint
    #[serde(default)]
    pub endpoint_url: String,

    /// Request/response contract spoken by the backend
    #[serde(default)]
    pub contract: ContractVersion,

    /// `raw` sends the token as-is, `bearer` prefixes it
    #[serde(default)]
    pub auth_scheme: AuthScheme,

    /// Request timeout in seconds
    #[serde(default = "default_recommendation_timeout")]
    pub timeout_secs: u64,
}

const fn default_recommendation_timeout() -> u64 {
    15
}

impl Default for RecommendationAppConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            contract: ContractVersion::default(),
            auth_scheme: AuthScheme::default(),
            timeout_secs: default_recommendation_timeout(),
        }
    }
}

impl RecommendationAppConfig {
    /// Convert to `integration_recommendation::RecommendationConfig`
    #[must_use]
    pub fn to_recommendation_config(&self) -> RecommendationConfig {
        RecommendationConfig {
            endpoint_url: self.endpoint_url.clone(),
            timeout_secs: self.timeout_secs,
            contract: self.contract,
            auth_scheme: self.auth_scheme,
        }
    }
}

/// Walking route configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Whether walking routes are computed at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
