use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FactorSet, NarrativeResult, Profile, ScoreResult, WeightVector};

/// Authenticated caller, resolved from the bearer token by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity(pub String);

impl CallerIdentity {
    pub fn new(caller_id: impl Into<String>) -> Self {
        Self(caller_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable record of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub caller_id: String,
    pub profile: Profile,
    pub factors: FactorSet,
    pub weights: WeightVector,
    pub score: ScoreResult,
    pub narrative: NarrativeResult,
    pub created_at: DateTime<Utc>,
}

/// Audit entry for the narrative generation call behind a [`ProfileRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmCallRecord {
    pub id: String,
    pub profile_id: String,
    pub provider: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub raw_response: Option<String>,
    pub parsed_response: NarrativeResult,
    pub created_at: DateTime<Utc>,
}

/// Lightweight row used for history listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecordSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub score: u8,
    pub tier: super::Tier,
    pub created_at: DateTime<Utc>,
}
