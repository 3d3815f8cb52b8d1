use crate::models::{FactorSet, ScoreResult, Tier, WeightVector};

/// Highest score still considered low risk.
pub const LOW_TIER_MAX: u8 = 30;
/// Highest score still considered medium risk.
pub const MEDIUM_TIER_MAX: u8 = 60;

pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn aggregate(factors: &FactorSet, weights: &WeightVector) -> ScoreResult {
        let raw = Self::weighted_sum(factors, weights);
        let score = Self::bounded_score(raw);
        ScoreResult {
            raw,
            score,
            tier: Self::tier(score),
        }
    }

    /// Exact dot product of factors and weights.
    pub fn weighted_sum(factors: &FactorSet, weights: &WeightVector) -> f64 {
        factors
            .iter()
            .map(|(factor, value)| value * weights.get(factor))
            .sum()
    }

    /// Round half away from zero, then clamp to `0..=100`.
    pub fn bounded_score(raw: f64) -> u8 {
        if !raw.is_finite() {
            return if raw == f64::INFINITY { 100 } else { 0 };
        }
        raw.round().clamp(0.0, 100.0) as u8
    }

    pub fn tier(score: u8) -> Tier {
        if score <= LOW_TIER_MAX {
            Tier::Low
        } else if score <= MEDIUM_TIER_MAX {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}
