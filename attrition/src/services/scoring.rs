use std::sync::Arc;

use crate::db::{AuditStore, WeightStore};
use crate::error::{AttritionError, Result};
use crate::llm::NarrativeClient;
use crate::models::{CallerIdentity, FactorSet, Profile, ResolvedWeights, ScoreResult};
use crate::scoring::{
    explain, recommendations_or_fallback, ExplainabilityEntry, FactorCalculator, ScoreAggregator,
    WeightResolver,
};
use crate::services::audit::AuditRecordBuilder;

/// Progress of one scoring request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStage {
    Received,
    FactorsComputed,
    WeightsResolved,
    ScoreComputed,
    NarrativeAttempted,
    Persisted,
    Responded,
    Aborted,
}

impl ScoringStage {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::FactorsComputed),
            Self::FactorsComputed => Some(Self::WeightsResolved),
            Self::WeightsResolved => Some(Self::ScoreComputed),
            Self::ScoreComputed => Some(Self::NarrativeAttempted),
            Self::NarrativeAttempted => Some(Self::Persisted),
            Self::Persisted => Some(Self::Responded),
            Self::Responded | Self::Aborted => None,
        }
    }

    /// Missing identity aborts at `Received`; a failed primary write aborts
    /// the `NarrativeAttempted -> Persisted` step.
    pub fn may_abort(self) -> bool {
        matches!(self, Self::Received | Self::NarrativeAttempted)
    }
}

/// Deterministic part of a score: no narrative, no persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub factors: FactorSet,
    pub weights: ResolvedWeights,
    pub score: ScoreResult,
    pub explainability: Vec<ExplainabilityEntry>,
}

/// Computes factors and resolves weights concurrently, then aggregates.
pub async fn evaluate(profile: &Profile, resolver: &WeightResolver) -> Evaluation {
    let (factors, weights) = tokio::join!(
        async { FactorCalculator::compute(profile) },
        resolver.resolve()
    );
    let score = ScoreAggregator::aggregate(&factors, &weights.weights);

    Evaluation {
        explainability: explain(&factors),
        factors,
        weights,
        score,
    }
}

/// What a caller receives for a scored profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub profile_id: String,
    pub evaluation: Evaluation,
    pub narrative: Option<String>,
    /// Never empty; falls back to a generic recommendation.
    pub recommendations: Vec<String>,
}

struct StageTracker {
    stage: ScoringStage,
}

impl StageTracker {
    fn new() -> Self {
        tracing::debug!(stage = ?ScoringStage::Received, "Scoring stage");
        Self {
            stage: ScoringStage::Received,
        }
    }

    fn advance(&mut self, profile_id: Option<&str>) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
            tracing::debug!(stage = ?next, profile_id = profile_id.unwrap_or("-"), "Scoring stage");
        }
    }

    fn abort(&mut self, reason: &str) {
        debug_assert!(self.stage.may_abort());
        tracing::debug!(from = ?self.stage, reason, "Scoring aborted");
        self.stage = ScoringStage::Aborted;
    }
}

/// Runs a scoring request end to end.
#[derive(Clone)]
pub struct ScoringService {
    resolver: WeightResolver,
    narrative: NarrativeClient,
    audit: Arc<dyn AuditStore>,
}

impl ScoringService {
    pub fn new(
        weights: Arc<dyn WeightStore>,
        audit: Arc<dyn AuditStore>,
        narrative: NarrativeClient,
    ) -> Self {
        Self {
            resolver: WeightResolver::new(weights),
            narrative,
            audit,
        }
    }

    pub fn resolver(&self) -> &WeightResolver {
        &self.resolver
    }

    pub fn narrative(&self) -> &NarrativeClient {
        &self.narrative
    }

    pub async fn score(
        &self,
        caller: Option<&CallerIdentity>,
        profile: Profile,
    ) -> Result<ScoringOutcome> {
        let mut tracker = StageTracker::new();

        let Some(caller) = caller else {
            tracker.abort("missing caller identity");
            return Err(AttritionError::Unauthorized(
                "Caller identity is required".to_string(),
            ));
        };

        let evaluation = evaluate(&profile, &self.resolver).await;
        tracker.advance(None);
        tracker.advance(None);
        tracker.advance(None);

        let narrative = self.narrative.generate(&profile, &evaluation.factors).await;
        tracker.advance(None);

        let records = AuditRecordBuilder::build(
            caller,
            &profile,
            &evaluation.factors,
            &evaluation.weights.weights,
            &evaluation.score,
            &narrative,
        );
        let profile_id = records.profile.id.clone();

        if let Err(e) = self.audit.insert_profile_record(&records.profile).await {
            tracing::error!(error = %e, profile_id = %profile_id, "Failed to persist profile record");
            tracker.abort("primary persistence failed");
            return Err(AttritionError::Persistence(
                "Failed to persist profile record".to_string(),
            ));
        }

        if let Some(call) = &records.llm_call {
            if let Err(e) = self.audit.insert_llm_call_record(call).await {
                tracing::warn!(error = %e, profile_id = %profile_id, "Failed to persist LLM call record");
            }
        }
        tracker.advance(Some(&profile_id));

        tracing::info!(
            profile_id = %profile_id,
            caller_id = %caller,
            score = evaluation.score.score,
            tier = %evaluation.score.tier,
            weights = ?evaluation.weights.source,
            "Profile scored"
        );

        let outcome = ScoringOutcome {
            recommendations: recommendations_or_fallback(&narrative.result.recommendations),
            narrative: narrative.result.narrative,
            profile_id,
            evaluation,
        };
        tracker.advance(Some(&outcome.profile_id));

        Ok(outcome)
    }
}
