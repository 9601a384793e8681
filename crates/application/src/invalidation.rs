use crate::cache::RecordCache;
use crate::materializer::{materialize_row, materialize_rows};
use crate::ports::{InvalidationChannel, RecordRepository};
use authdns_domain::{CacheKey, InvalidationOp, RecordFilter};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sequential consumer of the invalidation feed.
///
/// Messages are applied strictly in arrival order, one at a time; ordering
/// within a key is what keeps add/update/delete for the same id coherent.
/// `reload` is the only operation that re-queries the database, and it does
/// so before touching the cache so no lock is held across I/O.
pub struct InvalidationProcessor {
    cache: Arc<RecordCache>,
    repository: Arc<dyn RecordRepository>,
}

impl InvalidationProcessor {
    pub fn new(cache: Arc<RecordCache>, repository: Arc<dyn RecordRepository>) -> Self {
        Self { cache, repository }
    }

    /// Drain the channel until it closes. A malformed message is dropped
    /// with a warning; the consumer itself never dies on bad input.
    pub async fn run(&self, channel: &mut dyn InvalidationChannel) {
        while let Some(payload) = channel.recv().await {
            debug!(%payload, "Invalidation message received");
            match InvalidationOp::parse(&payload) {
                Ok(op) => self.apply(op).await,
                Err(reason) => {
                    warn!(%payload, %reason, "Dropping malformed invalidation message");
                }
            }
        }
        info!("Invalidation channel closed");
    }

    pub async fn apply(&self, op: InvalidationOp) {
        match op {
            InvalidationOp::Add(row) => {
                let Some((key, record)) = materialize_row(&row) else {
                    return;
                };
                if !self.cache.insert(key.clone(), record) {
                    debug!(record_id = row.id, %key, "Record already cached, add skipped");
                }
            }
            InvalidationOp::Update(row) => {
                let Some((key, record)) = materialize_row(&row) else {
                    return;
                };
                if !self.cache.update(key.clone(), record) {
                    warn!(record_id = row.id, %key, "Update for a record that is not cached, skipped");
                }
            }
            InvalidationOp::Delete { scope, record_id } => {
                if !self.cache.remove(&scope, record_id) {
                    warn!(record_id, %scope, "Delete for a record that is not cached, skipped");
                }
            }
            InvalidationOp::Reload { scope, name, qtype } => {
                // Fetch completes before the cache lock is taken.
                let rows = match self
                    .repository
                    .fetch(&RecordFilter::for_key(&scope, &name, qtype))
                    .await
                {
                    Ok(rows) => rows,
                    Err(reason) => {
                        warn!(%scope, %name, qtype, %reason, "Reload fetch failed, cache left as-is");
                        return;
                    }
                };
                let (entries, skipped) = materialize_rows(&rows);
                let records = entries.into_iter().map(|(_, record)| record).collect::<Vec<_>>();
                let count = records.len();
                self.cache
                    .replace_qtype(CacheKey::new(&scope, &name), qtype, records);
                debug!(%scope, %name, qtype, count, skipped, "Key reloaded from the database");
            }
        }
    }

    /// Full resynchronization: re-fetch everything and rebuild the cache.
    /// Invoked after a dropped subscription reconnects, so a missed message
    /// cannot desynchronize the cache forever.
    pub async fn resync(&self) {
        let rows = match self.repository.fetch(&RecordFilter::all()).await {
            Ok(rows) => rows,
            Err(reason) => {
                warn!(%reason, "Resync fetch failed, keeping the current cache");
                return;
            }
        };
        let (entries, skipped) = materialize_rows(&rows);
        let loaded = entries.len();
        self.cache.rebuild(entries);
        info!(loaded, skipped, "Record cache resynchronized");
    }
}
