use std::sync::Arc;

use crate::db::WeightStore;
use crate::models::{ResolvedWeights, WeightSource, WeightVector};

/// Resolves the weight vector a scoring request should use.
///
/// Resolution never fails: an empty, unreachable or malformed store yields
/// [`WeightVector::default`]. Negative components are zeroed; the sum is left
/// alone.
#[derive(Clone)]
pub struct WeightResolver {
    store: Arc<dyn WeightStore>,
}

impl WeightResolver {
    pub fn new(store: Arc<dyn WeightStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self) -> ResolvedWeights {
        match self.store.get_active_weights().await {
            Ok(Some(stored)) if stored.weights.is_finite() => {
                let weights = stored.weights.clamp_negative();
                if (weights.sum() - 1.0).abs() > 1e-6 {
                    tracing::debug!(
                        weights_id = %stored.id,
                        sum = weights.sum(),
                        "Active weight vector does not sum to 1.0"
                    );
                }
                ResolvedWeights {
                    weights,
                    source: WeightSource::Stored,
                }
            }
            Ok(Some(stored)) => {
                tracing::warn!(
                    weights_id = %stored.id,
                    "Stored weight vector has non-finite components, using default weights"
                );
                Self::fallback()
            }
            Ok(None) => Self::fallback(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load active weights, using default weights");
                Self::fallback()
            }
        }
    }

    fn fallback() -> ResolvedWeights {
        ResolvedWeights {
            weights: WeightVector::default(),
            source: WeightSource::Default,
        }
    }
}
