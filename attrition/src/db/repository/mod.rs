mod llm_calls;
mod profile_records;
mod weights;

pub use llm_calls::LlmCallRepository;
pub use profile_records::ProfileRecordRepository;
pub use weights::WeightRepository;

use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
