//! Scoring history DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    FactorSet, LlmCallRecord, Profile, ProfileRecord, ProfileRecordSummary, Tier, WeightVector,
};

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Summary row for `GET /v1/profiles`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    pub profile_id: String,
    pub name: String,
    pub email: String,
    pub score: u8,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRecordSummary> for ProfileSummaryResponse {
    fn from(summary: ProfileRecordSummary) -> Self {
        Self {
            profile_id: summary.id,
            name: summary.name,
            email: summary.email,
            score: summary.score,
            tier: summary.tier,
            created_at: summary.created_at,
        }
    }
}

/// Response for `GET /v1/profiles`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProfilesResponse {
    pub profiles: Vec<ProfileSummaryResponse>,
}

/// The narrative generation call recorded for a profile.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LlmCallResponse {
    pub llm_call_id: String,
    pub provider: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub raw_response: Option<String>,
    pub narrative: Option<String>,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LlmCallRecord> for LlmCallResponse {
    fn from(call: LlmCallRecord) -> Self {
        Self {
            llm_call_id: call.id,
            provider: call.provider,
            model: call.model,
            system_prompt: call.system_prompt,
            prompt: call.prompt,
            raw_response: call.raw_response,
            narrative: call.parsed_response.narrative,
            recommendations: call.parsed_response.recommendations,
            created_at: call.created_at,
        }
    }
}

/// Full audit record for `GET /v1/profiles/{profileId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecordResponse {
    pub profile_id: String,
    pub caller_id: String,
    pub profile: Profile,
    pub factors: FactorSet,
    /// Weights in effect when the profile was scored.
    pub weights: WeightVector,
    /// Unrounded weighted sum.
    pub raw_score: f64,
    pub score: u8,
    pub tier: Tier,
    pub narrative: Option<String>,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_call: Option<LlmCallResponse>,
}

impl ProfileRecordResponse {
    pub fn new(record: ProfileRecord, llm_call: Option<LlmCallRecord>) -> Self {
        Self {
            profile_id: record.id,
            caller_id: record.caller_id,
            profile: record.profile,
            factors: record.factors,
            weights: record.weights,
            raw_score: record.score.raw,
            score: record.score.score,
            tier: record.score.tier,
            narrative: record.narrative.narrative,
            recommendations: record.narrative.recommendations,
            created_at: record.created_at,
            llm_call: llm_call.map(LlmCallResponse::from),
        }
    }
}
