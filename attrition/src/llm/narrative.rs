use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::config::NarrativeConfig;
use crate::error::AttritionError;
use crate::llm::prompts::attrition_narrative_prompt;
use crate::llm::provider::{CompletionOptions, NarrativeGenerator};
use crate::models::{FactorSet, NarrativeOutcome, NarrativeResult, Profile, MAX_RECOMMENDATIONS};

#[derive(Debug, Deserialize)]
struct NarrativeJson {
    #[serde(default)]
    narrative: Option<String>,
    #[serde(default)]
    recommendations: Option<Vec<String>>,
}

/// Turns raw generated text into a [`NarrativeResult`]. Never fails.
///
/// JSON matching `{"narrative", "recommendations"}` is used as-is after
/// dropping blank entries and truncating to [`MAX_RECOMMENDATIONS`]. Anything
/// else becomes the narrative verbatim, with the first non-empty lines doubling
/// as recommendations.
pub fn parse_narrative(raw: &str) -> NarrativeResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NarrativeResult::empty();
    }

    match serde_json::from_str::<NarrativeJson>(strip_code_fence(trimmed)) {
        Ok(parsed) => NarrativeResult {
            narrative: parsed
                .narrative
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            recommendations: parsed
                .recommendations
                .unwrap_or_default()
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .take(MAX_RECOMMENDATIONS)
                .collect(),
        },
        Err(e) => {
            tracing::debug!(error = %e, "Narrative response is not JSON, using raw text");
            NarrativeResult {
                narrative: Some(raw.to_string()),
                recommendations: raw
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .take(MAX_RECOMMENDATIONS)
                    .map(str::to_string)
                    .collect(),
            }
        }
    }
}

/// Removes one surrounding Markdown code fence, with or without a language tag.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return text;
    };
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim().contains(char::is_whitespace) => body.trim(),
        _ => inner.trim(),
    }
}

/// Best-effort narrative generation for a scored profile.
///
/// Every failure path (unavailable provider, transport error, timeout) is
/// logged and folded into an empty [`NarrativeResult`].
#[derive(Clone)]
pub struct NarrativeClient {
    generator: Arc<dyn NarrativeGenerator>,
    config: NarrativeConfig,
}

impl NarrativeClient {
    pub fn new(generator: Arc<dyn NarrativeGenerator>, config: NarrativeConfig) -> Self {
        Self { generator, config }
    }

    pub fn provider_name(&self) -> &str {
        self.generator.provider_name()
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_available()
    }

    pub async fn generate(&self, profile: &Profile, factors: &FactorSet) -> NarrativeOutcome {
        let prompt = attrition_narrative_prompt(profile, factors);
        let options = CompletionOptions {
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };
        let timeout = Duration::from_secs(self.config.timeout_secs);

        let call = tokio::time::timeout(timeout, self.generator.generate(&prompt, &options));
        let envelope = match call.await {
            Ok(Ok(envelope)) => Some(envelope),
            Ok(Err(e)) => {
                log_generation_failure(&e);
                None
            }
            Err(_) => {
                log_generation_failure(&AttritionError::LlmTimeout(self.config.timeout_secs));
                None
            }
        };

        let raw_response = envelope
            .as_ref()
            .and_then(|envelope| envelope.raw_text())
            .map(str::to_string);
        let result = raw_response
            .as_deref()
            .map(parse_narrative)
            .unwrap_or_else(NarrativeResult::empty);

        NarrativeOutcome {
            result,
            system_prompt: self.generator.system_prompt().map(str::to_string),
            prompt,
            raw_response,
            provider: self.provider_name().to_string(),
            model: self.model().to_string(),
        }
    }
}

fn log_generation_failure(error: &AttritionError) {
    match error {
        AttritionError::LlmUnavailable(reason) => {
            tracing::debug!(reason = %reason, "Narrative generation skipped, LLM unavailable");
        }
        other => {
            tracing::warn!(error = %other, "Narrative generation failed, continuing without narrative");
        }
    }
}
