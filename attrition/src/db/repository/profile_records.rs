use libsql::{params, Connection};

use super::{format_timestamp, parse_timestamp};
use crate::error::{AttritionError, Result};
use crate::models::{NarrativeResult, ProfileRecord, ProfileRecordSummary, ScoreResult, Tier};

pub struct ProfileRecordRepository;

impl ProfileRecordRepository {
    pub async fn create(conn: &Connection, record: &ProfileRecord) -> Result<String> {
        let profile = serde_json::to_string(&record.profile)?;
        let factors = serde_json::to_string(&record.factors)?;
        let weights = serde_json::to_string(&record.weights)?;
        let recommendations = serde_json::to_string(&record.narrative.recommendations)?;

        conn.execute(
            r#"
            INSERT INTO profile_records (
                id, caller_id, name, email, profile, factors, weights,
                raw_score, score, tier, narrative, recommendations, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13
            )
            "#,
            params![
                record.id.clone(),
                record.caller_id.clone(),
                record.profile.name.clone(),
                record.profile.email.clone(),
                profile,
                factors,
                weights,
                record.score.raw,
                record.score.score as i64,
                record.score.tier.as_str(),
                record.narrative.narrative.clone(),
                recommendations,
                format_timestamp(&record.created_at),
            ],
        )
        .await?;

        Ok(record.id.clone())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<ProfileRecord>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, caller_id, profile, factors, weights, raw_score, score, tier,
                       narrative, recommendations, created_at
                FROM profile_records
                WHERE id = ?1
                "#,
                params![id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_by_caller(
        conn: &Connection,
        caller_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ProfileRecordSummary>, u64)> {
        let mut count_rows = conn
            .query(
                "SELECT COUNT(*) FROM profile_records WHERE caller_id = ?1",
                params![caller_id],
            )
            .await?;
        let total = match count_rows.next().await? {
            Some(row) => row.get::<i64>(0)?.max(0) as u64,
            None => 0,
        };

        let mut rows = conn
            .query(
                r#"
                SELECT id, name, email, score, tier, created_at
                FROM profile_records
                WHERE caller_id = ?1
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?2 OFFSET ?3
                "#,
                params![caller_id, limit as i64, offset as i64],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_summary(&row)?);
        }

        Ok((results, total))
    }

    fn row_to_record(row: &libsql::Row) -> Result<ProfileRecord> {
        let tier = parse_tier(&row.get::<String>(7)?)?;

        Ok(ProfileRecord {
            id: row.get(0)?,
            caller_id: row.get(1)?,
            profile: serde_json::from_str(&row.get::<String>(2)?)?,
            factors: serde_json::from_str(&row.get::<String>(3)?)?,
            weights: serde_json::from_str(&row.get::<String>(4)?)?,
            score: ScoreResult {
                raw: row.get(5)?,
                score: score_from_column(row.get::<i64>(6)?),
                tier,
            },
            narrative: NarrativeResult {
                narrative: row.get(8)?,
                recommendations: serde_json::from_str(&row.get::<String>(9)?)?,
            },
            created_at: parse_timestamp(&row.get::<String>(10)?),
        })
    }

    fn row_to_summary(row: &libsql::Row) -> Result<ProfileRecordSummary> {
        Ok(ProfileRecordSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            score: score_from_column(row.get::<i64>(3)?),
            tier: parse_tier(&row.get::<String>(4)?)?,
            created_at: parse_timestamp(&row.get::<String>(5)?),
        })
    }
}

fn parse_tier(value: &str) -> Result<Tier> {
    value
        .parse()
        .map_err(|e: String| AttritionError::Internal(format!("Corrupt profile record: {e}")))
}

fn score_from_column(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}
