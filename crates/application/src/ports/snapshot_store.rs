use async_trait::async_trait;
use authdns_domain::{DomainError, RecordRow};

/// Durable fallback for the record list. Written in full by the elected
/// primary at a successful bootstrap, read in full when the database is
/// unavailable. No incremental updates.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load(&self) -> Result<Vec<RecordRow>, DomainError>;

    /// Overwrite semantics, never append.
    async fn save(&self, records: &[RecordRow]) -> Result<(), DomainError>;
}
