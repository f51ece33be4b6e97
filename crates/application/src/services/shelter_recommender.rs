//! Recommendation stage
//!
//! The only stage without a fallback: if the backend cannot name a
//! facility there is nothing to resolve or route to.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{error, info, instrument};

use crate::ports::{RecommendationPort, RecommendationRequest};
use crate::services::outcome::{GuidanceFailure, StageOutcome};

/// Asks the recommendation backend for a facility name
pub struct ShelterRecommender {
    port: Arc<dyn RecommendationPort>,
}

impl std::fmt::Debug for ShelterRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShelterRecommender").finish_non_exhaustive()
    }
}

impl ShelterRecommender {
    /// Create a new recommender
    #[must_use]
    pub fn new(port: Arc<dyn RecommendationPort>) -> Self {
        Self { port }
    }

    /// Request a facility name; exactly one attempt
    #[instrument(skip(self, token))]
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
        token: &SecretString,
    ) -> StageOutcome<String> {
        if request.is_empty() {
            return Self::fail(GuidanceFailure::RecommendationContractError {
                field: "request".to_string(),
                message: "request carries neither address nor coordinates".to_string(),
            });
        }

        match self.port.recommend(request, token).await {
            Ok(response) => {
                let name = response.facility_name.trim();
                if name.is_empty() {
                    return Self::fail(GuidanceFailure::RecommendationContractError {
                        field: "facility_name".to_string(),
                        message: "facility name is blank".to_string(),
                    });
                }
                info!(facility = name, "Shelter recommended");
                StageOutcome::Ok(name.to_string())
            },
            Err(failure) => Self::fail(failure.into()),
        }
    }

    fn fail(failure: GuidanceFailure) -> StageOutcome<String> {
        error!(failure = failure.tag(), %failure, "Recommendation failed");
        StageOutcome::Failed(failure)
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::{Address, GeoLocation};

    use super::*;
    use crate::ports::{MockRecommendationPort, RecommendationFailure, RecommendationResponse};

    fn token() -> SecretString {
        SecretString::from("id-token".to_string())
    }

    fn request() -> RecommendationRequest {
        RecommendationRequest::new(Address::shinjuku(), GeoLocation::shinjuku())
    }

    #[tokio::test]
    async fn facility_name_is_trimmed() {
        let mut port = MockRecommendationPort::new();
        port.expect_recommend()
            .times(1)
            .returning(|_, _| Ok(RecommendationResponse::new("  Shinjuku Sports Center ")));

        let outcome = ShelterRecommender::new(Arc::new(port))
            .recommend(&request(), &token())
            .await;

        assert_eq!(outcome, StageOutcome::Ok("Shinjuku Sports Center".to_string()));
    }

    #[tokio::test]
    async fn blank_name_is_contract_failure() {
        let mut port = MockRecommendationPort::new();
        port.expect_recommend()
            .returning(|_, _| Ok(RecommendationResponse::new("   ")));

        let outcome = ShelterRecommender::new(Arc::new(port))
            .recommend(&request(), &token())
            .await;

        assert!(matches!(
            outcome,
            StageOutcome::Failed(GuidanceFailure::RecommendationContractError { .. })
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_terminal() {
        let mut port = MockRecommendationPort::new();
        port.expect_recommend().times(1).returning(|_, _| {
            Err(RecommendationFailure::Transport {
                status: Some(503),
                message: "Service Unavailable".to_string(),
            })
        });

        let outcome = ShelterRecommender::new(Arc::new(port))
            .recommend(&request(), &token())
            .await;

        assert_eq!(
            outcome,
            StageOutcome::Failed(GuidanceFailure::RecommendationTransportError {
                status: Some(503),
                message: "Service Unavailable".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn empty_request_never_reaches_backend() {
        let mut port = MockRecommendationPort::new();
        port.expect_recommend().times(0);

        let empty = RecommendationRequest {
            address: None,
            coordinates: None,
        };
        let outcome = ShelterRecommender::new(Arc::new(port))
            .recommend(&empty, &token())
            .await;

        assert!(outcome.is_failed());
    }
}
