use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

/// Shared libSQL handle. Cloning shares the underlying database.
#[derive(Clone)]
pub struct Database {
    db: Arc<libsql::Database>,
    busy_timeout_ms: u64,
    journal_mode: &'static str,
    synchronous: &'static str,
    is_remote: bool,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let is_remote = config.url.starts_with("libsql://") || config.url.starts_with("https://");

        let db = if is_remote {
            if let Some(ref local_path) = config.local_path {
                Builder::new_remote_replica(
                    local_path,
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            } else {
                Builder::new_remote(
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            }
        } else if config.url == ":memory:" {
            Builder::new_local(":memory:").build().await?
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        let database = Self {
            db: Arc::new(db),
            busy_timeout_ms: config.busy_timeout_ms,
            journal_mode: normalize_journal_mode(&config.journal_mode),
            synchronous: normalize_synchronous(&config.synchronous),
            is_remote,
        };
        database.configure_database().await?;
        database.init_schema().await?;

        tracing::info!(
            url = %redact_url(&config.url),
            journal_mode = database.journal_mode,
            "Database ready"
        );

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    async fn configure_database(&self) -> Result<()> {
        if self.is_remote {
            return Ok(());
        }

        let conn = self.connect()?;

        let pragmas = [
            format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms),
            format!("PRAGMA journal_mode = {}", self.journal_mode),
            format!("PRAGMA synchronous = {}", self.synchronous),
            "PRAGMA foreign_keys = ON".to_string(),
        ];

        for pragma in pragmas {
            if let Err(error) = conn.execute_batch(&pragma).await {
                tracing::warn!(pragma = %pragma, error = %error, "Failed to apply SQLite pragma");
            }
        }

        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        schema::init_schema(&conn).await?;
        Ok(())
    }

    pub async fn sync(&self) -> Result<()> {
        if let Ok(sync) = self.db.sync().await {
            tracing::info!("Database synced: {:?}", sync);
        }
        Ok(())
    }
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "PERSIST" => "PERSIST",
        "MEMORY" => "MEMORY",
        "OFF" => "OFF",
        _ => "WAL",
    }
}

fn normalize_synchronous(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "OFF" => "OFF",
        "FULL" => "FULL",
        "EXTRA" => "EXTRA",
        _ => "NORMAL",
    }
}

fn redact_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn pragma_values_are_normalized() {
        assert_eq!(normalize_journal_mode(" delete "), "DELETE");
        assert_eq!(normalize_journal_mode("bogus"), "WAL");
        assert_eq!(normalize_synchronous("full"), "FULL");
        assert_eq!(normalize_synchronous(""), "NORMAL");
    }

    #[test]
    fn query_string_is_dropped_from_logged_url() {
        assert_eq!(
            redact_url("libsql://db.turso.io?authToken=secret"),
            "libsql://db.turso.io"
        );
        assert_eq!(redact_url("file:attrition.db"), "file:attrition.db");
    }

    #[tokio::test]
    async fn file_database_initializes_schema() {
        let file = NamedTempFile::new().unwrap();
        let url = format!("file:{}", file.path().display());

        let db = Database::new(&DatabaseConfig::local(url)).await.unwrap();
        let conn = db.connect().unwrap();

        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('weight_configs', 'profile_records', 'llm_calls')",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 3);
    }
}
