use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Factor;

/// Linear-combination coefficients applied to a [`super::FactorSet`].
///
/// The weights are expected to sum to 1.0 but nothing enforces it: a vector
/// summing to 2.0 simply doubles every score before clamping. Callers who
/// want a probability-like reading must store a normalized vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WeightVector {
    pub skills: f64,
    pub performance: f64,
    pub network: f64,
    pub mobility: f64,
    pub notice: f64,
    pub plateau: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            skills: 0.28,
            performance: 0.22,
            network: 0.18,
            mobility: 0.12,
            notice: 0.12,
            plateau: 0.08,
        }
    }
}

impl WeightVector {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Skills => self.skills,
            Factor::Performance => self.performance,
            Factor::Network => self.network,
            Factor::Mobility => self.mobility,
            Factor::Notice => self.notice,
            Factor::Plateau => self.plateau,
        }
    }

    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|factor| self.get(*factor)).sum()
    }

    pub fn is_finite(&self) -> bool {
        Factor::ALL.iter().all(|factor| self.get(*factor).is_finite())
    }

    /// Copy with every negative component replaced by zero.
    pub fn clamp_negative(&self) -> Self {
        Self {
            skills: self.skills.max(0.0),
            performance: self.performance.max(0.0),
            network: self.network.max(0.0),
            mobility: self.mobility.max(0.0),
            notice: self.notice.max(0.0),
            plateau: self.plateau.max(0.0),
        }
    }
}

/// Where the weights used for a score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Stored,
    Default,
}

/// A weight vector as persisted by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWeights {
    pub id: String,
    pub weights: WeightVector,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of weight resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWeights {
    pub weights: WeightVector,
    pub source: WeightSource,
}
