//! Deterministic scoring pipeline: factor derivation, weight resolution,
//! aggregation into a score and tier, and the per-factor explanation.

mod aggregate;
mod explain;
mod factors;
mod weights;

pub use aggregate::{ScoreAggregator, LOW_TIER_MAX, MEDIUM_TIER_MAX};
pub use explain::{explain, recommendations_or_fallback, ExplainabilityEntry, FALLBACK_RECOMMENDATION};
pub use factors::{
    FactorCalculator, NetworkBucketRule, NoticeRule, DEFAULT_NOTICE_DAYS, NETWORK_RULES,
    NOTICE_RULES, UNKNOWN_NETWORK_RISK,
};
pub use weights::WeightResolver;
