use crate::cache::RecordCache;
use crate::materializer::materialize_rows;
use crate::ports::{RecordRepository, SnapshotStore};
use authdns_domain::RecordFilter;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Where the bootstrap data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapSource {
    Database,
    Snapshot,
    Empty,
}

#[derive(Debug, Clone, Copy)]
pub struct BootstrapReport {
    pub source: BootstrapSource,
    pub loaded: usize,
    pub skipped: usize,
}

/// One-shot startup population of the record cache.
///
/// The database is authoritative; the snapshot file is the degraded-mode
/// fallback. Only the elected primary refreshes the snapshot, and only from
/// a successful database read. Nothing here is fatal — an empty cache is a
/// valid (if useless) serving state.
pub struct BootstrapLoader {
    repository: Arc<dyn RecordRepository>,
    snapshot: Arc<dyn SnapshotStore>,
    cache: Arc<RecordCache>,
    is_primary: bool,
}

impl BootstrapLoader {
    pub fn new(
        repository: Arc<dyn RecordRepository>,
        snapshot: Arc<dyn SnapshotStore>,
        cache: Arc<RecordCache>,
        is_primary: bool,
    ) -> Self {
        Self {
            repository,
            snapshot,
            cache,
            is_primary,
        }
    }

    pub async fn run(&self) -> BootstrapReport {
        let rows = match self.repository.fetch(&RecordFilter::all()).await {
            Ok(rows) => rows,
            Err(reason) => {
                error!(%reason, "Database fetch failed at bootstrap, falling back to snapshot");
                Vec::new()
            }
        };

        let (rows, source) = if rows.is_empty() {
            warn!("No records from the database, loading the snapshot fallback");
            let fallback = match self.snapshot.load().await {
                Ok(rows) => rows,
                Err(reason) => {
                    warn!(%reason, "Snapshot fallback unavailable");
                    Vec::new()
                }
            };
            let source = if fallback.is_empty() {
                BootstrapSource::Empty
            } else {
                BootstrapSource::Snapshot
            };
            (fallback, source)
        } else {
            if self.is_primary {
                // Unfiltered row list, overwrite semantics.
                if let Err(reason) = self.snapshot.save(&rows).await {
                    warn!(%reason, "Primary could not refresh the snapshot file");
                }
            }
            (rows, BootstrapSource::Database)
        };

        let (entries, skipped) = materialize_rows(&rows);
        let loaded = entries.len();
        self.cache.rebuild(entries);

        info!(
            source = ?source,
            loaded,
            skipped,
            keys = self.cache.key_count(),
            "Record cache bootstrapped"
        );

        BootstrapReport {
            source,
            loaded,
            skipped,
        }
    }
}
