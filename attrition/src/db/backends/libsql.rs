use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{LlmCallRepository, ProfileRecordRepository, WeightRepository};
use crate::db::traits::{AuditStore, DatabaseBackend, WeightStore};
use crate::error::Result;
use crate::models::{LlmCallRecord, ProfileRecord, ProfileRecordSummary, StoredWeights};

#[derive(Clone)]
pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeightStore for LibSqlBackend {
    async fn get_active_weights(&self) -> Result<Option<StoredWeights>> {
        let conn = self.db.connect()?;
        WeightRepository::get_active(&conn).await
    }
    async fn insert_weights(&self, weights: &StoredWeights) -> Result<()> {
        let conn = self.db.connect()?;
        WeightRepository::insert(&conn, weights).await
    }
    async fn list_weights(&self, limit: u32) -> Result<Vec<StoredWeights>> {
        let conn = self.db.connect()?;
        WeightRepository::list(&conn, limit).await
    }
}

#[async_trait]
impl AuditStore for LibSqlBackend {
    async fn insert_profile_record(&self, record: &ProfileRecord) -> Result<String> {
        let conn = self.db.connect()?;
        ProfileRecordRepository::create(&conn, record).await
    }
    async fn insert_llm_call_record(&self, record: &LlmCallRecord) -> Result<String> {
        let conn = self.db.connect()?;
        LlmCallRepository::create(&conn, record).await
    }
    async fn get_profile_record(&self, id: &str) -> Result<Option<ProfileRecord>> {
        let conn = self.db.connect()?;
        ProfileRecordRepository::get_by_id(&conn, id).await
    }
    async fn list_profile_records(
        &self,
        caller_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ProfileRecordSummary>, u64)> {
        let conn = self.db.connect()?;
        ProfileRecordRepository::list_by_caller(&conn, caller_id, limit, offset).await
    }
    async fn get_llm_call_for_profile(&self, profile_id: &str) -> Result<Option<LlmCallRecord>> {
        let conn = self.db.connect()?;
        LlmCallRepository::get_by_profile(&conn, profile_id).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
