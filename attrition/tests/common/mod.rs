// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Mutex, Once};

use async_trait::async_trait;
use serde_json::json;

use attrition::db::{AuditStore, WeightStore};
use attrition::error::{AttritionError, Result};
use attrition::llm::{CompletionOptions, GenerationEnvelope, NarrativeGenerator};
use attrition::models::{
    LlmCallRecord, Profile, ProfileRecord, ProfileRecordSummary, StoredWeights,
};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Lowest risk the factor rules allow: 6 with default weights.
pub fn min_risk_profile() -> Profile {
    serde_json::from_value(json!({
        "name": "Dana Reyes",
        "email": "dana@example.com",
        "skillProficiencyAvg": 5,
        "performanceRating": 5,
        "linkedinNetworkSize": ">5,000",
        "willingToRelocate": "Yes",
        "noticePeriodDays": 0,
        "totalExperience": 2
    }))
    .unwrap()
}

/// Every factor at its ceiling: 100, 100, 70, 40, 80, 40.
pub fn max_risk_profile() -> Profile {
    serde_json::from_value(json!({
        "name": "Sam Ortiz",
        "email": "sam@example.com",
        "skillProficiencyAvg": 0,
        "performanceRating": 0,
        "linkedinNetworkSize": "<500",
        "willingToRelocate": "No",
        "noticePeriodDays": 120,
        "totalExperience": 15
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// In-memory stores
// ---------------------------------------------------------------------------

/// Which operations of a [`MemoryStore`] should fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Failures {
    pub weights: bool,
    pub profile_writes: bool,
    pub llm_call_writes: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    pub failures: Failures,
    weights: Mutex<Vec<StoredWeights>>,
    profiles: Mutex<Vec<ProfileRecord>>,
    llm_calls: Mutex<Vec<LlmCallRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failures: Failures) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn with_weights(weights: StoredWeights) -> Self {
        let store = Self::default();
        store.weights.lock().unwrap().push(weights);
        store
    }

    pub fn profiles(&self) -> Vec<ProfileRecord> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn llm_calls(&self) -> Vec<LlmCallRecord> {
        self.llm_calls.lock().unwrap().clone()
    }
}

fn injected(what: &str) -> AttritionError {
    AttritionError::Persistence(format!("injected {what} failure"))
}

#[async_trait]
impl WeightStore for MemoryStore {
    async fn get_active_weights(&self) -> Result<Option<StoredWeights>> {
        if self.failures.weights {
            return Err(injected("weights"));
        }
        Ok(self.weights.lock().unwrap().last().cloned())
    }

    async fn insert_weights(&self, weights: &StoredWeights) -> Result<()> {
        self.weights.lock().unwrap().push(weights.clone());
        Ok(())
    }

    async fn list_weights(&self, limit: u32) -> Result<Vec<StoredWeights>> {
        let weights = self.weights.lock().unwrap();
        Ok(weights.iter().rev().take(limit as usize).cloned().collect())
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn insert_profile_record(&self, record: &ProfileRecord) -> Result<String> {
        if self.failures.profile_writes {
            return Err(injected("profile write"));
        }
        self.profiles.lock().unwrap().push(record.clone());
        Ok(record.id.clone())
    }

    async fn insert_llm_call_record(&self, record: &LlmCallRecord) -> Result<String> {
        if self.failures.llm_call_writes {
            return Err(injected("llm call write"));
        }
        self.llm_calls.lock().unwrap().push(record.clone());
        Ok(record.id.clone())
    }

    async fn get_profile_record(&self, id: &str) -> Result<Option<ProfileRecord>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn list_profile_records(
        &self,
        caller_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ProfileRecordSummary>, u64)> {
        let profiles = self.profiles.lock().unwrap();
        let owned: Vec<&ProfileRecord> = profiles
            .iter()
            .rev()
            .filter(|record| record.caller_id == caller_id)
            .collect();
        let page = owned
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|record| ProfileRecordSummary {
                id: record.id.clone(),
                name: record.profile.name.clone(),
                email: record.profile.email.clone(),
                score: record.score.score,
                tier: record.score.tier,
                created_at: record.created_at,
            })
            .collect();
        Ok((page, owned.len() as u64))
    }

    async fn get_llm_call_for_profile(&self, profile_id: &str) -> Result<Option<LlmCallRecord>> {
        Ok(self
            .llm_calls
            .lock()
            .unwrap()
            .iter()
            .find(|call| call.profile_id == profile_id)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Narrative generators
// ---------------------------------------------------------------------------

/// Answers every prompt with the same envelope.
pub struct FixedGenerator(pub GenerationEnvelope);

impl FixedGenerator {
    pub fn text(text: &str) -> Self {
        Self(GenerationEnvelope::Text(text.to_string()))
    }
}

#[async_trait]
impl NarrativeGenerator for FixedGenerator {
    fn provider_name(&self) -> &str {
        "fixed"
    }

    fn model(&self) -> &str {
        "fixed-model"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<GenerationEnvelope> {
        Ok(self.0.clone())
    }
}

/// Fails every call.
pub struct FailingGenerator;

#[async_trait]
impl NarrativeGenerator for FailingGenerator {
    fn provider_name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "failing-model"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<GenerationEnvelope> {
        Err(AttritionError::Llm("upstream exploded".to_string()))
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible wire bodies
// ---------------------------------------------------------------------------

pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str, error_type: &str, code: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": serde_json::Value::Null,
            "code": code
        }
    })
}
