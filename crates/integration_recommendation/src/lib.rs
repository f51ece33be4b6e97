//! Shelter recommendation integration for Lifeline
//!
//! Sends the user's address and/or coordinates to the recommendation
//! backend and returns the name of the recommended evacuation facility.
//!
//! # Contracts
//!
//! The backend's request and response shapes are selected explicitly with
//! [`ContractVersion`] rather than inferred from whichever field happens to
//! be present in the response:
//!
//! | Version | Request body | Response field |
//! |---------|--------------|----------------|
//! | `address_v1` | `{"address"}` | `facility_name` |
//! | `coordinates_v1` | `{"latitude", "longitude"}` | `facility_name` |
//! | `answer_v0` | all known fields | `answer` |
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_recommendation::{
//!     HttpRecommendationClient, RecommendationClient, RecommendationConfig, ShelterQuery,
//! };
//!
//! let client = HttpRecommendationClient::new(&config)?;
//! let query = ShelterQuery::new().with_address("東京都新宿区西新宿");
//! let recommendation = client.recommend(&query, &token).await?;
//! println!("{}", recommendation.facility_name);
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpRecommendationClient, RecommendationClient};
pub use config::RecommendationConfig;
pub use error::RecommendationError;
pub use models::{AuthScheme, ContractVersion, Recommendation, ShelterQuery};
