use serde::{Deserialize, Serialize};

/// The six independent risk dimensions a profile is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Skills,
    Performance,
    Network,
    Mobility,
    Notice,
    Plateau,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Skills,
        Factor::Performance,
        Factor::Network,
        Factor::Mobility,
        Factor::Notice,
        Factor::Plateau,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Performance => "performance",
            Self::Network => "network",
            Self::Mobility => "mobility",
            Self::Notice => "notice",
            Self::Plateau => "plateau",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-factor risk values, each nominally in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FactorSet {
    pub skills_risk: f64,
    pub performance_risk: f64,
    pub network_risk: f64,
    pub mobility_risk: f64,
    pub notice_risk: f64,
    pub plateau_risk: f64,
}

impl FactorSet {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Skills => self.skills_risk,
            Factor::Performance => self.performance_risk,
            Factor::Network => self.network_risk,
            Factor::Mobility => self.mobility_risk,
            Factor::Notice => self.notice_risk,
            Factor::Plateau => self.plateau_risk,
        }
    }

    /// Factors in canonical order paired with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.into_iter().map(move |factor| (factor, self.get(factor)))
    }
}
