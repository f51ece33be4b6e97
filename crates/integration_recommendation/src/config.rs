//! Recommendation backend configuration

use serde::{Deserialize, Serialize};

use crate::models::{AuthScheme, ContractVersion};

/// Configuration for the recommendation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Full URL of the recommendation endpoint
    #[serde(default)]
    pub endpoint_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Request/response contract spoken by the backend
    #[serde(default)]
    pub contract: ContractVersion,

    /// How the token is placed in the `Authorization` header
    #[serde(default)]
    pub auth_scheme: AuthScheme,
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            timeout_secs: default_timeout_secs(),
            contract: ContractVersion::default(),
            auth_scheme: AuthScheme::default(),
        }
    }
}

impl RecommendationConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            endpoint_url: "http://localhost:3000/guidance".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint_url.trim().is_empty() {
            return Err("endpoint_url must not be empty".to_string());
        }

        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://")
        {
            return Err(format!(
                "endpoint_url must be an http(s) URL, got '{}'",
                self.endpoint_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
