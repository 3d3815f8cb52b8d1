//! Weight configuration DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{StoredWeights, WeightSource, WeightVector};

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `PUT /v1/weights`.
///
/// Weights are not normalized; they do not have to sum to 1.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateWeightsRequest {
    #[validate(range(min = 0.0))]
    pub skills: f64,
    #[validate(range(min = 0.0))]
    pub performance: f64,
    #[validate(range(min = 0.0))]
    pub network: f64,
    #[validate(range(min = 0.0))]
    pub mobility: f64,
    #[validate(range(min = 0.0))]
    pub notice: f64,
    #[validate(range(min = 0.0))]
    pub plateau: f64,
}

impl From<&UpdateWeightsRequest> for WeightVector {
    fn from(req: &UpdateWeightsRequest) -> Self {
        Self {
            skills: req.skills,
            performance: req.performance,
            network: req.network,
            mobility: req.mobility,
            notice: req.notice,
            plateau: req.plateau,
        }
    }
}

/// Query parameters for `GET /v1/weights`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetWeightsQuery {
    /// Number of past weight vectors to include (default 10, max 100).
    pub history_limit: Option<u32>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A stored weight vector.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredWeightsResponse {
    pub weights_id: String,
    pub weights: WeightVector,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredWeights> for StoredWeightsResponse {
    fn from(stored: StoredWeights) -> Self {
        Self {
            weights_id: stored.id,
            weights: stored.weights,
            updated_by: stored.updated_by,
            updated_at: stored.updated_at,
        }
    }
}

/// Response for `GET /v1/weights`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeightsResponse {
    /// The vector scoring currently uses.
    pub weights: WeightVector,
    pub source: WeightSource,
    /// Newest first.
    pub history: Vec<StoredWeightsResponse>,
}
