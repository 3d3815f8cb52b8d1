use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Employee profile submitted for scoring.
///
/// Deserialization is deliberately lenient: numeric fields accept numbers or
/// numeric strings, and anything unparseable falls back to the field default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub employment_status: Option<String>,
    /// Years of total professional experience.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_experience: f64,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub notice_period_days: Option<i64>,

    /// Average self-reported skill proficiency, 1-5.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub skill_proficiency_avg: f64,
    /// Latest performance rating, 1-5.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub performance_rating: f64,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub training_hours: Option<f64>,

    /// Bucket label such as `"<500"` or `"1,001–5,000"`.
    #[serde(default)]
    pub linkedin_network_size: Option<String>,
    #[serde(default)]
    pub willing_to_relocate: Option<String>,
    #[serde(default)]
    pub preferred_work_model: Option<String>,
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64).unwrap_or(0.0))
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_f64)
        .map(|days| days.trunc() as i64))
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_profile() {
        let json = r#"{
            "name": "Dana Reyes",
            "email": "dana@example.com",
            "birthDate": "1990-04-12",
            "gender": "F",
            "employmentStatus": "Full-time",
            "totalExperience": 8,
            "noticePeriodDays": 60,
            "skillProficiencyAvg": 3.5,
            "performanceRating": 4,
            "trainingHours": 24,
            "linkedinNetworkSize": "500–1,000",
            "willingToRelocate": "No",
            "preferredWorkModel": "Hybrid"
        }"#;

        let profile: Profile = serde_json::from_str(json).expect("deserialize");
        assert_eq!(profile.name, "Dana Reyes");
        assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1990, 4, 12));
        assert_eq!(profile.notice_period_days, Some(60));
        assert_eq!(profile.skill_proficiency_avg, 3.5);
        assert_eq!(profile.training_hours, Some(24.0));
        assert_eq!(profile.preferred_work_model.as_deref(), Some("Hybrid"));
    }

    #[test]
    fn missing_fields_default() {
        let profile: Profile = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(profile, Profile::default());
        assert!(profile.notice_period_days.is_none());
    }

    #[test]
    fn malformed_numbers_are_coerced() {
        let json = r#"{
            "totalExperience": "12.5",
            "noticePeriodDays": "45.9",
            "skillProficiencyAvg": "excellent",
            "performanceRating": null,
            "trainingHours": [1, 2],
            "birthDate": "12/04/1990"
        }"#;

        let profile: Profile = serde_json::from_str(json).expect("deserialize");
        assert_eq!(profile.total_experience, 12.5);
        assert_eq!(profile.notice_period_days, Some(45));
        assert_eq!(profile.skill_proficiency_avg, 0.0);
        assert_eq!(profile.performance_rating, 0.0);
        assert!(profile.training_hours.is_none());
        assert!(profile.birth_date.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let profile = Profile {
            skill_proficiency_avg: 4.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(json["skillProficiencyAvg"], 4.0);
        assert!(json.get("linkedinNetworkSize").is_some());
    }
}
