//! Recommendation backend client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::RecommendationConfig;
use crate::error::RecommendationError;
use crate::models::{ContractVersion, Recommendation, ShelterQuery};

/// Longest error body kept in [`RecommendationError::Http`]
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Trait for recommendation clients
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Ask the backend which facility to evacuate to
    ///
    /// Exactly one request, no retry.
    async fn recommend(
        &self,
        query: &ShelterQuery,
        token: &SecretString,
    ) -> Result<Recommendation, RecommendationError>;
}

/// HTTP/JSON recommendation client
#[derive(Debug)]
pub struct HttpRecommendationClient {
    client: Client,
    config: RecommendationConfig,
}

impl HttpRecommendationClient {
    /// Create a new recommendation client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &RecommendationConfig) -> Result<Self, RecommendationError> {
        config
            .validate()
            .map_err(RecommendationError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Lifeline/0.1")
            .build()
            .map_err(|e| RecommendationError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Contract this client speaks
    #[must_use]
    pub const fn contract(&self) -> ContractVersion {
        self.config.contract
    }

    /// Build the JSON body for a contract
    fn build_body(
        contract: ContractVersion,
        query: &ShelterQuery,
    ) -> Result<serde_json::Value, RecommendationError> {
        let body = match contract {
            ContractVersion::AddressV1 => {
                let address = query.address().ok_or_else(|| {
                    RecommendationError::InvalidRequest(
                        "address_v1 requires an address".to_string(),
                    )
                })?;
                serde_json::to_value(AddressBody { address })
            },
            ContractVersion::CoordinatesV1 => {
                let (latitude, longitude) = query.coordinates().ok_or_else(|| {
                    RecommendationError::InvalidRequest(
                        "coordinates_v1 requires latitude and longitude".to_string(),
                    )
                })?;
                serde_json::to_value(CoordinatesBody {
                    latitude,
                    longitude,
                })
            },
            ContractVersion::AnswerV0 => {
                if query.address().is_none() && query.coordinates().is_none() {
                    return Err(RecommendationError::InvalidRequest(
                        "answer_v0 requires an address or coordinates".to_string(),
                    ));
                }
                let (latitude, longitude) = query.coordinates().unzip();
                serde_json::to_value(FullBody {
                    address: query.address(),
                    latitude,
                    longitude,
                })
            },
        };

        body.map_err(|e| RecommendationError::InvalidRequest(e.to_string()))
    }

    /// Extract the facility name from a response body
    fn parse_response(
        contract: ContractVersion,
        body: &str,
    ) -> Result<Recommendation, RecommendationError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| RecommendationError::ParseError(e.to_string()))?;

        let field = contract.response_field();
        let facility_name = value
            .get(field)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RecommendationError::MissingField {
                field: field.to_string(),
            })?;

        Ok(Recommendation {
            facility_name: facility_name.to_string(),
        })
    }

    fn truncate_body(body: &str) -> String {
        body.chars().take(MAX_ERROR_BODY_CHARS).collect()
    }
}

#[async_trait]
impl RecommendationClient for HttpRecommendationClient {
    #[instrument(skip(self, query, token), fields(contract = %self.config.contract))]
    async fn recommend(
        &self,
        query: &ShelterQuery,
        token: &SecretString,
    ) -> Result<Recommendation, RecommendationError> {
        let body = Self::build_body(self.config.contract, query)?;

        debug!(url = %self.config.endpoint_url, "Requesting shelter recommendation");

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .header(
                AUTHORIZATION,
                self.config.auth_scheme.header_value(token.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RecommendationError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RecommendationError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RecommendationError::ConnectionFailed(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Recommendation backend returned an error");
            return Err(RecommendationError::Http {
                status: status.as_u16(),
                message: Self::truncate_body(&text),
            });
        }

        let recommendation = Self::parse_response(self.config.contract, &text)?;
        debug!(facility = %recommendation.facility_name, "Recommendation received");
        Ok(recommendation)
    }
}

// --- Request bodies per contract ---

#[derive(Serialize)]
struct AddressBody<'a> {
    address: &'a str,
}

#[derive(Serialize)]
struct CoordinatesBody {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct FullBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
}
