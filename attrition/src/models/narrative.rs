use serde::{Deserialize, Serialize};

/// Upper bound on recommendations kept from any source.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Parsed explanation for a score. Both parts are optional: a failed or
/// empty generation leaves `narrative` as `None` and no recommendations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResult {
    pub narrative: Option<String>,
    pub recommendations: Vec<String>,
}

impl NarrativeResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_content(&self) -> bool {
        self.narrative.is_some() || !self.recommendations.is_empty()
    }
}

/// Everything the narrative step produced, including what is needed to
/// audit the generation call itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeOutcome {
    pub result: NarrativeResult,
    /// Instructions sent ahead of `prompt`, if the generator uses any.
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub raw_response: Option<String>,
    pub provider: String,
    pub model: String,
}
