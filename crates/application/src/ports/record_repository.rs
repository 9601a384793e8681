use async_trait::async_trait;
use authdns_domain::{DomainError, RecordFilter, RecordRow};

/// Source-of-truth query contract: all non-deleted records, optionally
/// filtered by routing scope, owner name and/or numeric query type, each row
/// joined with its human-readable scope name.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn fetch(&self, filter: &RecordFilter) -> Result<Vec<RecordRow>, DomainError>;
}
