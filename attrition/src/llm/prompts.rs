//! Prompt templates for narrative generation
//!
//! Templates use plain `format!()` interpolation so a missing variable is a
//! compile-time error.

use crate::models::{FactorSet, Profile};

/// Generate the prompt that asks for an attrition-risk narrative
///
/// Embeds the profile fields relevant to the score and the six factor values
/// rounded to whole numbers, and instructs the model to answer with strict JSON
/// holding a `narrative` string and at most five `recommendations`.
///
/// # Arguments
/// * `profile` - The employee profile being scored
/// * `factors` - Risk factors already computed for `profile`
///
/// # Example
/// ```
/// use attrition::llm::prompts::attrition_narrative_prompt;
/// use attrition::models::{FactorSet, Profile};
///
/// let profile = Profile {
///     name: "Dana".to_string(),
///     total_experience: 6.0,
///     ..Default::default()
/// };
/// let factors = FactorSet {
///     skills_risk: 30.4,
///     performance_risk: 20.0,
///     network_risk: 50.0,
///     mobility_risk: 40.0,
///     notice_risk: 70.0,
///     plateau_risk: 20.0,
/// };
///
/// let prompt = attrition_narrative_prompt(&profile, &factors);
/// assert!(prompt.contains("Dana"));
/// assert!(prompt.contains("skillsRisk: 30"));
/// ```
pub fn attrition_narrative_prompt(profile: &Profile, factors: &FactorSet) -> String {
    let name = or_unknown(&profile.name);
    let employment_status = profile.employment_status.as_deref().unwrap_or("unknown");
    let total_experience = profile.total_experience;
    let notice = profile
        .notice_period_days
        .map(|days| format!("{days} days"))
        .unwrap_or_else(|| "unknown".to_string());
    let skills = profile.skill_proficiency_avg;
    let performance = profile.performance_rating;
    let training = profile
        .training_hours
        .map(|hours| format!("{hours}"))
        .unwrap_or_else(|| "unknown".to_string());
    let network = profile.linkedin_network_size.as_deref().unwrap_or("unknown");
    let relocate = profile.willing_to_relocate.as_deref().unwrap_or("unknown");
    let work_model = profile.preferred_work_model.as_deref().unwrap_or("unknown");

    let skills_risk = factors.skills_risk.round();
    let performance_risk = factors.performance_risk.round();
    let network_risk = factors.network_risk.round();
    let mobility_risk = factors.mobility_risk.round();
    let notice_risk = factors.notice_risk.round();
    let plateau_risk = factors.plateau_risk.round();

    format!(
        r#"You are helping an HR team understand an employee's attrition risk.
Write an empathetic, concise and professional explanation of the risk drivers below,
followed by practical retention recommendations ordered by priority.

Employee:
- Name: {name}
- Employment status: {employment_status}
- Total experience: {total_experience} years
- Notice period: {notice}
- Average skill proficiency (0-5): {skills}
- Performance rating (0-5): {performance}
- Training hours: {training}
- Professional network size: {network}
- Willing to relocate: {relocate}
- Preferred work model: {work_model}

Risk factors (0 = no risk, 100 = highest risk):
- skillsRisk: {skills_risk}
- performanceRisk: {performance_risk}
- networkRisk: {network_risk}
- mobilityRisk: {mobility_risk}
- noticeRisk: {notice_risk}
- plateauRisk: {plateau_risk}

Respond with strict JSON only, no Markdown and no extra keys:
{{"narrative": "<two to four sentences>", "recommendations": ["<at most 5 short actions>"]}}"#
    )
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "unknown"
    } else {
        value
    }
}
