use chrono::Utc;
use nanoid::nanoid;
use uuid::Uuid;

use crate::models::{
    CallerIdentity, FactorSet, LlmCallRecord, NarrativeOutcome, Profile, ProfileRecord,
    ScoreResult, WeightVector,
};

/// Records produced for one scoring request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecords {
    pub profile: ProfileRecord,
    /// Present only when the narrative step produced content.
    pub llm_call: Option<LlmCallRecord>,
}

/// Structural mapping from scoring artifacts to persistable records.
pub struct AuditRecordBuilder;

impl AuditRecordBuilder {
    pub fn build(
        caller: &CallerIdentity,
        profile: &Profile,
        factors: &FactorSet,
        weights: &WeightVector,
        score: &ScoreResult,
        narrative: &NarrativeOutcome,
    ) -> AuditRecords {
        let created_at = Utc::now();

        let profile_record = ProfileRecord {
            id: Uuid::new_v4().to_string(),
            caller_id: caller.as_str().to_string(),
            profile: profile.clone(),
            factors: *factors,
            weights: *weights,
            score: *score,
            narrative: narrative.result.clone(),
            created_at,
        };

        let llm_call = narrative.result.has_content().then(|| LlmCallRecord {
            id: nanoid!(),
            profile_id: profile_record.id.clone(),
            provider: narrative.provider.clone(),
            model: narrative.model.clone(),
            system_prompt: narrative.system_prompt.clone(),
            prompt: narrative.prompt.clone(),
            raw_response: narrative.raw_response.clone(),
            parsed_response: narrative.result.clone(),
            created_at,
        });

        AuditRecords {
            profile: profile_record,
            llm_call,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NarrativeResult, Tier};

    fn factors() -> FactorSet {
        FactorSet {
            skills_risk: 20.0,
            performance_risk: 20.0,
            network_risk: 30.0,
            mobility_risk: 10.0,
            notice_risk: 50.0,
            plateau_risk: 20.0,
        }
    }

    fn score() -> ScoreResult {
        ScoreResult {
            raw: 24.2,
            score: 24,
            tier: Tier::Low,
        }
    }

    fn outcome(result: NarrativeResult) -> NarrativeOutcome {
        NarrativeOutcome {
            result,
            system_prompt: Some("system text".to_string()),
            prompt: "prompt text".to_string(),
            raw_response: Some("raw".to_string()),
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn builds_linked_llm_call_when_narrative_exists() {
        let narrative = outcome(NarrativeResult {
            narrative: Some("Low risk overall.".to_string()),
            recommendations: vec![],
        });

        let records = AuditRecordBuilder::build(
            &CallerIdentity::new("hr-portal"),
            &Profile::default(),
            &factors(),
            &WeightVector::default(),
            &score(),
            &narrative,
        );

        assert!(Uuid::parse_str(&records.profile.id).is_ok());
        assert_eq!(records.profile.caller_id, "hr-portal");
        assert_eq!(records.profile.score, score());
        assert_eq!(records.profile.weights, WeightVector::default());

        let call = records.llm_call.unwrap();
        assert_eq!(call.profile_id, records.profile.id);
        assert_eq!(call.system_prompt.as_deref(), Some("system text"));
        assert_eq!(call.prompt, "prompt text");
        assert_eq!(call.provider, "openai");
        assert_eq!(call.parsed_response, narrative.result);
        assert_eq!(call.created_at, records.profile.created_at);
    }

    #[test]
    fn recommendations_alone_are_enough_for_llm_call() {
        let narrative = outcome(NarrativeResult {
            narrative: None,
            recommendations: vec!["Check in monthly".to_string()],
        });
        let records = AuditRecordBuilder::build(
            &CallerIdentity::new("hr-portal"),
            &Profile::default(),
            &factors(),
            &WeightVector::default(),
            &score(),
            &narrative,
        );
        assert!(records.llm_call.is_some());
    }

    #[test]
    fn empty_narrative_skips_llm_call() {
        let records = AuditRecordBuilder::build(
            &CallerIdentity::new("hr-portal"),
            &Profile::default(),
            &factors(),
            &WeightVector::default(),
            &score(),
            &outcome(NarrativeResult::empty()),
        );
        assert!(records.llm_call.is_none());
    }

    #[test]
    fn every_build_gets_a_fresh_id() {
        let build = || {
            AuditRecordBuilder::build(
                &CallerIdentity::new("hr-portal"),
                &Profile::default(),
                &factors(),
                &WeightVector::default(),
                &score(),
                &outcome(NarrativeResult::empty()),
            )
        };
        assert_ne!(build().profile.id, build().profile.id);
    }
}
