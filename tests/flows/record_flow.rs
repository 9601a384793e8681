//! Record lifecycle flow tests
//!
//! Drive the whole read path in-process: bootstrap from a repository,
//! mutate through invalidation messages, answer through the resolver.

use async_trait::async_trait;
use authdns_application::ports::{InvalidationChannel, RecordRepository, SnapshotStore};
use authdns_application::{
    BootstrapLoader, BootstrapSource, InvalidationProcessor, QueryResolver, RecordCache,
};
use authdns_domain::{qtype, DomainError, InvalidationOp, RecordFilter, RecordRow, ResourceRecord};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

struct MemoryRepository {
    rows: Mutex<Vec<RecordRow>>,
}

impl MemoryRepository {
    fn new(rows: Vec<RecordRow>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
        })
    }

    fn set_rows(&self, rows: Vec<RecordRow>) {
        *self.rows.lock().unwrap() = rows;
    }
}

#[async_trait]
impl RecordRepository for MemoryRepository {
    async fn fetch(&self, filter: &RecordFilter) -> Result<Vec<RecordRow>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| {
                filter.scope.as_deref().map_or(true, |s| r.scope == s)
                    && filter.name.as_deref().map_or(true, |n| r.name == n)
                    && filter.qtype.map_or(true, |q| r.qtype == q)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct MemorySnapshot {
    rows: Mutex<Vec<RecordRow>>,
}

#[async_trait]
impl SnapshotStore for MemorySnapshot {
    async fn load(&self) -> Result<Vec<RecordRow>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn save(&self, rows: &[RecordRow]) -> Result<(), DomainError> {
        *self.rows.lock().unwrap() = rows.to_vec();
        Ok(())
    }
}

struct ScriptedChannel {
    rx: mpsc::UnboundedReceiver<String>,
}

#[async_trait]
impl InvalidationChannel for ScriptedChannel {
    async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

fn row(id: i64, name: &str, qtype_code: u16, rdata: &str) -> RecordRow {
    RecordRow::from_change(id, "edge".into(), name.into(), rdata.into(), qtype_code, 300)
}

fn addresses(records: &[ResourceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| match &r.data {
            authdns_domain::RecordData::A { address } => address.to_string(),
            other => panic!("expected an A payload, got {other:?}"),
        })
        .collect()
}

#[tokio::test]
async fn full_record_lifecycle() {
    let repository = MemoryRepository::new(vec![
        row(1, "www.example.com", qtype::A, "10.0.0.1"),
        row(2, "www.example.com", qtype::TXT, "v=spf1 -all"),
        row(3, "api.example.com", qtype::A, "10.0.0.9"),
    ]);
    let snapshot = Arc::new(MemorySnapshot::default());
    let cache = Arc::new(RecordCache::new());

    // Bootstrap as primary: database wins, snapshot gets refreshed.
    let report = BootstrapLoader::new(
        repository.clone(),
        snapshot.clone(),
        Arc::clone(&cache),
        true,
    )
    .run()
    .await;
    assert_eq!(report.source, BootstrapSource::Database);
    assert_eq!(report.loaded, 3);
    assert_eq!(snapshot.rows.lock().unwrap().len(), 3);

    let resolver = QueryResolver::new(Arc::clone(&cache));
    let processor = InvalidationProcessor::new(Arc::clone(&cache), repository.clone());

    let answers = resolver.resolve("edge", &[("www.example.com.".into(), qtype::A)]);
    assert_eq!(addresses(&answers), vec!["10.0.0.1"]);

    // Add a brand new record.
    processor
        .apply(InvalidationOp::parse("edge:new.example.com:10.0.0.7:1:120:4:add").unwrap())
        .await;
    let answers = resolver.resolve("edge", &[("new.example.com.".into(), qtype::A)]);
    assert_eq!(addresses(&answers), vec!["10.0.0.7"]);

    // Update record 1 in place.
    processor
        .apply(InvalidationOp::parse("edge:www.example.com:10.0.0.2:1:300:1:update").unwrap())
        .await;
    let answers = resolver.resolve("edge", &[("www.example.com.".into(), qtype::A)]);
    assert_eq!(addresses(&answers), vec!["10.0.0.2"]);

    // Delete record 3 by id alone.
    processor
        .apply(InvalidationOp::parse("edge:3:delete").unwrap())
        .await;
    assert!(resolver
        .resolve("edge", &[("api.example.com.".into(), qtype::A)])
        .is_empty());

    // Reload www/A from a repository that now holds two fresh rows; the TXT
    // record under the same name must survive untouched.
    repository.set_rows(vec![
        row(10, "www.example.com", qtype::A, "10.1.0.1"),
        row(11, "www.example.com", qtype::A, "10.1.0.2"),
        row(2, "www.example.com", qtype::TXT, "v=spf1 -all"),
    ]);
    processor
        .apply(InvalidationOp::parse("edge:www.example.com:1:reload").unwrap())
        .await;

    let answers = resolver.resolve("edge", &[("www.example.com.".into(), qtype::A)]);
    let mut got = addresses(&answers);
    got.sort();
    assert_eq!(got, vec!["10.1.0.1", "10.1.0.2"]);
    assert_eq!(
        resolver
            .resolve("edge", &[("www.example.com.".into(), qtype::TXT)])
            .len(),
        1
    );
}

#[tokio::test]
async fn empty_database_serves_from_the_snapshot() {
    let repository = MemoryRepository::new(Vec::new());
    let snapshot = Arc::new(MemorySnapshot::default());
    snapshot
        .save(&[row(5, "cold.example.com", qtype::A, "10.0.0.5")])
        .await
        .unwrap();
    let cache = Arc::new(RecordCache::new());

    let report = BootstrapLoader::new(repository, snapshot, Arc::clone(&cache), false)
        .run()
        .await;

    assert_eq!(report.source, BootstrapSource::Snapshot);
    let resolver = QueryResolver::new(cache);
    let answers = resolver.resolve("edge", &[("cold.example.com.".into(), qtype::A)]);
    assert_eq!(addresses(&answers), vec!["10.0.0.5"]);
}

#[tokio::test]
async fn feed_stream_survives_garbage_and_applies_the_rest() {
    let repository = MemoryRepository::new(Vec::new());
    let cache = Arc::new(RecordCache::new());
    let processor = InvalidationProcessor::new(Arc::clone(&cache), repository);

    let (tx, rx) = mpsc::unbounded_channel();
    let mut channel = ScriptedChannel { rx };
    tx.send("totally-bogus".into()).unwrap();
    tx.send("edge:www.example.com:10.0.0.1:1:300:1:add".into())
        .unwrap();
    tx.send("edge:abc:delete".into()).unwrap();
    tx.send("edge:www.example.com:10.0.0.9:1:300:1:update".into())
        .unwrap();
    drop(tx);

    processor.run(&mut channel).await;

    let records = cache.lookup("edge", "www.example.com", qtype::A);
    assert_eq!(addresses(&records), vec!["10.0.0.9"]);
}

#[tokio::test]
async fn resync_converges_on_the_repository_state() {
    let repository = MemoryRepository::new(vec![row(1, "www.example.com", qtype::A, "10.0.0.1")]);
    let cache = Arc::new(RecordCache::new());
    let processor = InvalidationProcessor::new(Arc::clone(&cache), repository.clone());

    processor
        .apply(InvalidationOp::parse("edge:stale.example.com:10.9.9.9:1:300:99:add").unwrap())
        .await;

    repository.set_rows(vec![
        row(1, "www.example.com", qtype::A, "10.0.0.1"),
        row(2, "fresh.example.com", qtype::A, "10.0.0.2"),
    ]);
    processor.resync().await;

    assert!(cache.lookup("edge", "stale.example.com", qtype::A).is_empty());
    assert_eq!(cache.lookup("edge", "www.example.com", qtype::A).len(), 1);
    assert_eq!(cache.lookup("edge", "fresh.example.com", qtype::A).len(), 1);
}
