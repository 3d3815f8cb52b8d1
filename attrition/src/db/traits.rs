use async_trait::async_trait;

use crate::error::Result;
use crate::models::{LlmCallRecord, ProfileRecord, ProfileRecordSummary, StoredWeights};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Append-only storage for scoring weight vectors.
#[async_trait]
pub trait WeightStore: Send + Sync {
    /// The most recently updated vector, if any was ever stored.
    async fn get_active_weights(&self) -> Result<Option<StoredWeights>>;
    async fn insert_weights(&self, weights: &StoredWeights) -> Result<()>;
    /// Newest first.
    async fn list_weights(&self, limit: u32) -> Result<Vec<StoredWeights>>;
}

/// Append-only storage for scoring audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn insert_profile_record(&self, record: &ProfileRecord) -> Result<String>;
    async fn insert_llm_call_record(&self, record: &LlmCallRecord) -> Result<String>;
    async fn get_profile_record(&self, id: &str) -> Result<Option<ProfileRecord>>;
    /// A caller's records, newest first, with the caller's total record count.
    async fn list_profile_records(
        &self,
        caller_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ProfileRecordSummary>, u64)>;
    async fn get_llm_call_for_profile(&self, profile_id: &str) -> Result<Option<LlmCallRecord>>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete database backend combining every store plus lifecycle
/// operations.
#[async_trait]
pub trait DatabaseBackend: WeightStore + AuditStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
