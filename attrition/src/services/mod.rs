mod audit;
mod scoring;

pub use audit::{AuditRecordBuilder, AuditRecords};
pub use scoring::{evaluate, Evaluation, ScoringOutcome, ScoringService, ScoringStage};
