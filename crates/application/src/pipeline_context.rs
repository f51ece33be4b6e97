//! Per-run context for a guidance run
//!
//! A `PipelineContext` carries everything a single run needs beyond its
//! collaborators: a unique run id for tracing, the generation number used
//! to detect superseded runs, the time the run started, the caller's
//! opaque token, and the cancellation token that a newer run trips.
//!
//! # Examples
//!
//! ```
//! use application::PipelineContext;
//! use secrecy::SecretString;
//! use tokio_util::sync::CancellationToken;
//!
//! let ctx = PipelineContext::new(
//!     1,
//!     SecretString::from("id-token".to_string()),
//!     CancellationToken::new(),
//! );
//!
//! assert_eq!(ctx.generation(), 1);
//! assert!(!ctx.run_id().is_nil());
//! assert!(!ctx.is_cancelled());
//! ```

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Context for a single guidance run
///
/// Created by [`GuidanceService::begin_run`](crate::GuidanceService::begin_run)
/// and immutable afterwards. Cloning shares the cancellation token.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    run_id: Uuid,
    generation: u64,
    started_at: DateTime<Utc>,
    token: SecretString,
    cancellation: CancellationToken,
}

impl PipelineContext {
    /// Create a new context for the given generation
    ///
    /// Generates a new random run ID and captures the current timestamp.
    #[must_use]
    pub fn new(generation: u64, token: SecretString, cancellation: CancellationToken) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generation,
            started_at: Utc::now(),
            token,
            cancellation,
        }
    }

    /// Unique identifier of this run
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Generation number; higher means newer
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// When the run started
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Opaque token forwarded to the recommendation backend
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Token that is cancelled when a newer run begins
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Whether this run has been superseded
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
