use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Append-only weight history; the newest row is active
        CREATE TABLE IF NOT EXISTS weight_configs (
            id TEXT PRIMARY KEY,
            weights TEXT NOT NULL,
            updated_by TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weight_configs_updated_at ON weight_configs(updated_at);

        -- One row per scoring request
        CREATE TABLE IF NOT EXISTS profile_records (
            id TEXT PRIMARY KEY,
            caller_id TEXT NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            profile TEXT NOT NULL,
            factors TEXT NOT NULL,
            weights TEXT NOT NULL,
            raw_score REAL NOT NULL,
            score INTEGER NOT NULL,
            tier TEXT NOT NULL,
            narrative TEXT,
            recommendations TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_profile_records_caller ON profile_records(caller_id, created_at);

        -- Narrative generation audit, linked to its profile record
        CREATE TABLE IF NOT EXISTS llm_calls (
            id TEXT PRIMARY KEY,
            profile_id TEXT NOT NULL,
            provider TEXT NOT NULL,
            model TEXT NOT NULL,
            system_prompt TEXT,
            prompt TEXT NOT NULL,
            raw_response TEXT,
            parsed_response TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (profile_id) REFERENCES profile_records(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_llm_calls_profile_id ON llm_calls(profile_id);
        "#,
    )
    .await?;

    Ok(())
}
