use async_trait::async_trait;
use authdns_application::ports::SnapshotStore;
use authdns_domain::{DomainError, RecordRow};
use std::path::PathBuf;
use tracing::{debug, info};

/// Fallback record set persisted as a JSON array next to the process.
/// The primary node overwrites it on every successful bootstrap; replicas
/// only ever read it.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Result<Vec<RecordRow>, DomainError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DomainError::SnapshotError(format!("read {}: {e}", self.path.display())))?;
        let rows: Vec<RecordRow> = serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::SnapshotError(format!("parse {}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), rows = rows.len(), "Snapshot loaded");
        Ok(rows)
    }

    async fn save(&self, rows: &[RecordRow]) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec_pretty(rows)
            .map_err(|e| DomainError::SnapshotError(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| DomainError::SnapshotError(format!("write {}: {e}", self.path.display())))?;
        info!(path = %self.path.display(), rows = rows.len(), "Snapshot saved");
        Ok(())
    }
}
