use crate::models::{FactorSet, Profile};

/// One row of the network-size lookup. A profile matches when its bucket
/// label equals any spelling in `labels` after trimming.
#[derive(Debug, Clone)]
pub struct NetworkBucketRule {
    pub labels: &'static [&'static str],
    pub risk: f64,
}

/// Ordered network-size buckets. First match wins.
pub const NETWORK_RULES: &[NetworkBucketRule] = &[
    NetworkBucketRule {
        labels: &["<500"],
        risk: 70.0,
    },
    NetworkBucketRule {
        labels: &["500–1,000", "500-1,000"],
        risk: 50.0,
    },
    NetworkBucketRule {
        labels: &["1,001–5,000", "1,001-5,000"],
        risk: 30.0,
    },
    NetworkBucketRule {
        labels: &[">5,000"],
        risk: 10.0,
    },
];

/// Risk for a missing or unrecognized network bucket.
pub const UNKNOWN_NETWORK_RISK: f64 = 60.0;

/// Notice-period step: applies when the period is at least `min_days`.
#[derive(Debug, Clone)]
pub struct NoticeRule {
    pub min_days: i64,
    pub risk: f64,
}

/// Ordered from the longest notice period down. First match wins.
pub const NOTICE_RULES: &[NoticeRule] = &[
    NoticeRule {
        min_days: 90,
        risk: 80.0,
    },
    NoticeRule {
        min_days: 60,
        risk: 70.0,
    },
    NoticeRule {
        min_days: 30,
        risk: 50.0,
    },
    NoticeRule {
        min_days: 15,
        risk: 30.0,
    },
    NoticeRule {
        min_days: 7,
        risk: 20.0,
    },
];

pub const SHORT_NOTICE_RISK: f64 = 10.0;
pub const DEFAULT_NOTICE_DAYS: i64 = 30;

pub const RELOCATABLE_RISK: f64 = 10.0;
pub const NOT_RELOCATABLE_RISK: f64 = 40.0;

pub const PLATEAU_EXPERIENCE_YEARS: f64 = 12.0;
pub const PLATEAU_RISK: f64 = 40.0;
pub const EARLY_CAREER_RISK: f64 = 20.0;

const RATING_SCALE_MAX: f64 = 5.0;

/// Maps a profile to its six risk factors. Pure and infallible.
pub struct FactorCalculator;

impl FactorCalculator {
    pub fn compute(profile: &Profile) -> FactorSet {
        FactorSet {
            skills_risk: Self::rating_risk(profile.skill_proficiency_avg),
            performance_risk: Self::rating_risk(profile.performance_rating),
            network_risk: Self::network_risk(profile.linkedin_network_size.as_deref()),
            mobility_risk: Self::mobility_risk(profile.willing_to_relocate.as_deref()),
            notice_risk: Self::notice_risk(profile.notice_period_days),
            plateau_risk: Self::plateau_risk(profile.total_experience),
        }
    }

    /// `100 - (rating / 5) * 100` with the rating clamped to `0..=5`.
    pub fn rating_risk(rating: f64) -> f64 {
        let rating = if rating.is_finite() { rating } else { 0.0 };
        let rating = rating.clamp(0.0, RATING_SCALE_MAX);
        100.0 - (rating / RATING_SCALE_MAX) * 100.0
    }

    pub fn network_risk(bucket: Option<&str>) -> f64 {
        let Some(bucket) = bucket.map(str::trim) else {
            return UNKNOWN_NETWORK_RISK;
        };

        NETWORK_RULES
            .iter()
            .find(|rule| rule.labels.contains(&bucket))
            .map(|rule| rule.risk)
            .unwrap_or(UNKNOWN_NETWORK_RISK)
    }

    pub fn mobility_risk(willing_to_relocate: Option<&str>) -> f64 {
        match willing_to_relocate.map(str::trim) {
            Some(answer) if answer.eq_ignore_ascii_case("yes") => RELOCATABLE_RISK,
            _ => NOT_RELOCATABLE_RISK,
        }
    }

    pub fn notice_risk(notice_period_days: Option<i64>) -> f64 {
        let days = notice_period_days.unwrap_or(DEFAULT_NOTICE_DAYS);

        NOTICE_RULES
            .iter()
            .find(|rule| days >= rule.min_days)
            .map(|rule| rule.risk)
            .unwrap_or(SHORT_NOTICE_RISK)
    }

    pub fn plateau_risk(total_experience: f64) -> f64 {
        if total_experience >= PLATEAU_EXPERIENCE_YEARS {
            PLATEAU_RISK
        } else {
            EARLY_CAREER_RISK
        }
    }
}
