//! Recommendation adapter - Implements RecommendationPort using integration_recommendation

use application::error::ApplicationError;
use application::ports::{
    RecommendationFailure, RecommendationPort, RecommendationRequest, RecommendationResponse,
};
use async_trait::async_trait;
use integration_recommendation::{
    ContractVersion, HttpRecommendationClient, RecommendationClient, RecommendationConfig,
    RecommendationError, ShelterQuery,
};
use secrecy::SecretString;
use tracing::{debug, instrument};

/// Adapter for the shelter recommendation backend
pub struct RecommendationAdapter {
    client: HttpRecommendationClient,
}

impl std::fmt::Debug for RecommendationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationAdapter")
            .field("client", &"HttpRecommendationClient")
            .field("contract", &self.client.contract())
            .finish()
    }
}

impl RecommendationAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint configuration is invalid.
    pub fn new(config: &RecommendationConfig) -> Result<Self, ApplicationError> {
        let client = HttpRecommendationClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Build the wire query from everything the pipeline knows
    fn to_query(request: &RecommendationRequest) -> ShelterQuery {
        let mut query = ShelterQuery::new();
        if let Some(address) = &request.address {
            query = query.with_address(address.as_str());
        }
        if let Some(location) = &request.coordinates {
            query = query.with_coords(location.latitude(), location.longitude());
        }
        query
    }

    /// Classify an integration error as transport or contract failure
    fn map_failure(contract: ContractVersion, err: RecommendationError) -> RecommendationFailure {
        let message = err.to_string();
        match err {
            RecommendationError::MissingField { field } => {
                RecommendationFailure::Contract { field, message }
            },
            RecommendationError::ParseError(_) => RecommendationFailure::Contract {
                field: contract.response_field().to_string(),
                message,
            },
            RecommendationError::InvalidRequest(_) => RecommendationFailure::Contract {
                field: "request".to_string(),
                message,
            },
            RecommendationError::Http { status, .. } => RecommendationFailure::Transport {
                status: Some(status),
                message,
            },
            RecommendationError::ConnectionFailed(_)
            | RecommendationError::Timeout { .. }
            | RecommendationError::ConfigurationError(_) => RecommendationFailure::Transport {
                status: None,
                message,
            },
        }
    }
}

#[async_trait]
impl RecommendationPort for RecommendationAdapter {
    #[instrument(skip(self, request, token), fields(contract = %self.client.contract()))]
    async fn recommend(
        &self,
        request: &RecommendationRequest,
        token: &SecretString,
    ) -> Result<RecommendationResponse, RecommendationFailure> {
        let query = Self::to_query(request);
        let contract = self.client.contract();

        let recommendation = self
            .client
            .recommend(&query, token)
            .await
            .map_err(|e| Self::map_failure(contract, e))?;

        debug!(facility = %recommendation.facility_name, "Recommendation received");
        Ok(RecommendationResponse::new(recommendation.facility_name))
    }
}
