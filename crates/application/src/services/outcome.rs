//! Stage outcomes and terminal failures of a guidance run

use domain::entities::Degradation;
use thiserror::Error;

use crate::ports::RecommendationFailure;

/// Message shown to users whenever a recommendation could not be obtained
pub const RECOMMENDATION_FAILED_MESSAGE: &str =
    "Could not get a shelter recommendation. Please try again.";

/// A failure with no fallback; the run ends in `Errored` (or `Superseded`)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidanceFailure {
    /// Recommendation backend unreachable or answered with an error status
    #[error("recommendation transport error (status {status:?}): {message}")]
    RecommendationTransportError {
        /// HTTP status, if the backend answered
        status: Option<u16>,
        /// Diagnostic message
        message: String,
    },

    /// Recommendation backend answered outside the agreed contract
    #[error("recommendation contract error on '{field}': {message}")]
    RecommendationContractError {
        /// Field that was missing or unusable
        field: String,
        /// Diagnostic message
        message: String,
    },

    /// A newer run started before this one finished
    #[error("guidance run cancelled")]
    Cancelled,
}

impl GuidanceFailure {
    /// Stable tag for logs and telemetry
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::RecommendationTransportError { .. } => "recommendation_transport_error",
            Self::RecommendationContractError { .. } => "recommendation_contract_error",
            Self::Cancelled => "cancelled",
        }
    }

    /// Text suitable for showing to the user
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::RecommendationTransportError { .. } | Self::RecommendationContractError { .. } => {
                RECOMMENDATION_FAILED_MESSAGE
            },
            Self::Cancelled => "Guidance was replaced by a newer request.",
        }
    }
}

impl From<RecommendationFailure> for GuidanceFailure {
    fn from(failure: RecommendationFailure) -> Self {
        match failure {
            RecommendationFailure::Transport { status, message } => {
                Self::RecommendationTransportError { status, message }
            },
            RecommendationFailure::Contract { field, message } => {
                Self::RecommendationContractError { field, message }
            },
        }
    }
}

/// Result of one pipeline stage
///
/// `Degraded` carries a usable fallback value and the reason it was needed;
/// only `Failed` stops the run.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// Stage succeeded
    Ok(T),
    /// Stage recovered with a fallback value
    Degraded(T, Degradation),
    /// Stage failed with no fallback
    Failed(GuidanceFailure),
}

impl<T> StageOutcome<T> {
    /// The produced value, fallback or not
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) | Self::Degraded(value, _) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// The degradation, if the stage fell back
    #[must_use]
    pub const fn degradation(&self) -> Option<Degradation> {
        match self {
            Self::Degraded(_, degradation) => Some(*degradation),
            _ => None,
        }
    }

    /// Whether the stage failed outright
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Split into the value and optional degradation, or the failure
    ///
    /// # Errors
    ///
    /// Returns the failure when the stage failed.
    pub fn into_parts(self) -> Result<(T, Option<Degradation>), GuidanceFailure> {
        match self {
            Self::Ok(value) => Ok((value, None)),
            Self::Degraded(value, degradation) => Ok((value, Some(degradation))),
            Self::Failed(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let ok: StageOutcome<u8> = StageOutcome::Ok(1);
        assert_eq!(ok.value(), Some(&1));
        assert_eq!(ok.degradation(), None);
        assert!(!ok.is_failed());

        let degraded = StageOutcome::Degraded(2, Degradation::GeocodeEmpty);
        assert_eq!(degraded.value(), Some(&2));
        assert_eq!(degraded.degradation(), Some(Degradation::GeocodeEmpty));

        let failed: StageOutcome<u8> = StageOutcome::Failed(GuidanceFailure::Cancelled);
        assert!(failed.is_failed());
        assert_eq!(failed.value(), None);
    }

    #[test]
    fn into_parts() {
        assert_eq!(StageOutcome::Ok(1).into_parts(), Ok((1, None)));
        assert_eq!(
            StageOutcome::Degraded(1, Degradation::RouteSkipped).into_parts(),
            Ok((1, Some(Degradation::RouteSkipped)))
        );
        assert_eq!(
            StageOutcome::<u8>::Failed(GuidanceFailure::Cancelled).into_parts(),
            Err(GuidanceFailure::Cancelled)
        );
    }

    #[test]
    fn recommendation_failures_share_user_message() {
        let transport = GuidanceFailure::RecommendationTransportError {
            status: Some(500),
            message: "boom".to_string(),
        };
        let contract = GuidanceFailure::RecommendationContractError {
            field: "facility_name".to_string(),
            message: "missing".to_string(),
        };

        assert_eq!(transport.user_message(), RECOMMENDATION_FAILED_MESSAGE);
        assert_eq!(contract.user_message(), RECOMMENDATION_FAILED_MESSAGE);
        assert_ne!(transport.tag(), contract.tag());
    }

    #[test]
    fn failure_from_port_failure() {
        let failure: GuidanceFailure = RecommendationFailure::Transport {
            status: None,
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(
            failure,
            GuidanceFailure::RecommendationTransportError {
                status: None,
                message: "connection refused".to_string(),
            }
        );

        let failure: GuidanceFailure = RecommendationFailure::Contract {
            field: "answer".to_string(),
            message: "blank".to_string(),
        }
        .into();
        assert_eq!(failure.tag(), "recommendation_contract_error");
    }
}
