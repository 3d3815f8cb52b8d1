use serde::{Deserialize, Serialize};

use crate::models::{Factor, FactorSet};

/// Recommendation returned when the narrative step produced none.
pub const FALLBACK_RECOMMENDATION: &str =
    "Schedule a career conversation to review goals, workload and growth opportunities.";

/// One line of the per-factor breakdown returned with a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExplainabilityEntry {
    pub factor: Factor,
    pub value: f64,
    pub text: String,
}

/// Builds the explainability list in canonical factor order.
pub fn explain(factors: &FactorSet) -> Vec<ExplainabilityEntry> {
    factors
        .iter()
        .map(|(factor, value)| ExplainabilityEntry {
            factor,
            value,
            text: describe(factor, value),
        })
        .collect()
}

fn describe(factor: Factor, value: f64) -> String {
    let value = value.round();
    match factor {
        Factor::Skills => format!("Skills risk is {value} based on average skill proficiency."),
        Factor::Performance => {
            format!("Performance risk is {value} based on the latest performance rating.")
        }
        Factor::Network => format!("Network risk is {value} based on professional network size."),
        Factor::Mobility => format!("Mobility risk is {value} based on willingness to relocate."),
        Factor::Notice => format!("Notice risk is {value} based on the notice period."),
        Factor::Plateau => {
            format!("Plateau risk is {value} based on total years of experience.")
        }
    }
}

/// Recommendations to return to the caller, never empty.
pub fn recommendations_or_fallback(recommendations: &[String]) -> Vec<String> {
    if recommendations.is_empty() {
        vec![FALLBACK_RECOMMENDATION.to_string()]
    } else {
        recommendations.to_vec()
    }
}
