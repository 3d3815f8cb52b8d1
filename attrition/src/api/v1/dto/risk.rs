//! Risk scoring DTOs for the v1 API.

use serde::Serialize;

use crate::models::Tier;
use crate::scoring::ExplainabilityEntry;
use crate::services::ScoringOutcome;

/// Response for `POST /v1/risk:score`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreResponse {
    /// Final score, 0 to 100.
    pub score: u8,
    pub tier: Tier,
    /// One entry per factor, in fixed factor order.
    pub explainability: Vec<ExplainabilityEntry>,
    /// Never empty.
    pub recommendations: Vec<String>,
    /// Id of the persisted audit record.
    pub profile_id: String,
}

impl From<ScoringOutcome> for RiskScoreResponse {
    fn from(outcome: ScoringOutcome) -> Self {
        Self {
            score: outcome.evaluation.score.score,
            tier: outcome.evaluation.score.tier,
            explainability: outcome.evaluation.explainability,
            recommendations: outcome.recommendations,
            profile_id: outcome.profile_id,
        }
    }
}
