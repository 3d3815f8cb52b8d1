use libsql::{params, Connection};

use super::{format_timestamp, parse_timestamp};
use crate::error::Result;
use crate::models::LlmCallRecord;

pub struct LlmCallRepository;

impl LlmCallRepository {
    pub async fn create(conn: &Connection, record: &LlmCallRecord) -> Result<String> {
        let parsed_response = serde_json::to_string(&record.parsed_response)?;

        conn.execute(
            r#"
            INSERT INTO llm_calls (
                id, profile_id, provider, model, system_prompt, prompt, raw_response,
                parsed_response, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9
            )
            "#,
            params![
                record.id.clone(),
                record.profile_id.clone(),
                record.provider.clone(),
                record.model.clone(),
                record.system_prompt.clone(),
                record.prompt.clone(),
                record.raw_response.clone(),
                parsed_response,
                format_timestamp(&record.created_at),
            ],
        )
        .await?;

        Ok(record.id.clone())
    }

    pub async fn get_by_profile(
        conn: &Connection,
        profile_id: &str,
    ) -> Result<Option<LlmCallRecord>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, profile_id, provider, model, system_prompt, prompt, raw_response,
                       parsed_response, created_at
                FROM llm_calls
                WHERE profile_id = ?1
                ORDER BY created_at DESC
                LIMIT 1
                "#,
                params![profile_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_llm_call(&row)?)),
            None => Ok(None),
        }
    }

    fn row_to_llm_call(row: &libsql::Row) -> Result<LlmCallRecord> {
        Ok(LlmCallRecord {
            id: row.get(0)?,
            profile_id: row.get(1)?,
            provider: row.get(2)?,
            model: row.get(3)?,
            system_prompt: row.get(4)?,
            prompt: row.get(5)?,
            raw_response: row.get(6)?,
            parsed_response: serde_json::from_str(&row.get::<String>(7)?)?,
            created_at: parse_timestamp(&row.get::<String>(8)?),
        })
    }
}
