use authdns_domain::{CacheKey, ResourceRecord};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Concurrent store of materialized records, keyed by (scope, name).
///
/// A key's record list is an `Arc<Vec<_>>` that is swapped wholesale on every
/// mutation: a reader that has cloned the `Arc` holds an immutable snapshot
/// and can never observe a half-applied change. The lock is held only to
/// clone or swap pointers — no I/O, no materialization.
///
/// A secondary id→key index is maintained under the same lock so that delete
/// messages, which carry only (scope, recordId), land on the right key
/// without scanning.
pub struct RecordCache {
    inner: RwLock<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<CacheKey, Arc<Vec<ResourceRecord>>>,
    ids: HashMap<i64, CacheKey>,
}

impl CacheInner {
    /// Drop the entry with this id wherever it currently lives. Keeps the
    /// one-id-one-record invariant when an id re-appears under a new key.
    fn purge_id(&mut self, id: i64) {
        let Some(key) = self.ids.remove(&id) else {
            return;
        };
        if let Some(list) = self.entries.get(&key) {
            let remaining: Vec<ResourceRecord> =
                list.iter().filter(|r| r.id != id).cloned().collect();
            if remaining.is_empty() {
                self.entries.remove(&key);
            } else {
                self.entries.insert(key, Arc::new(remaining));
            }
        }
    }
}

impl RecordCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
        }
    }

    /// All records under (scope, name) whose own type tag matches `qtype`.
    pub fn lookup(&self, scope: &str, name: &str, qtype: u16) -> Vec<ResourceRecord> {
        let key = CacheKey::new(scope, name);
        let list = {
            let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
            inner.entries.get(&key).cloned()
        };
        match list {
            Some(list) => list.iter().filter(|r| r.qtype() == qtype).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Snapshot of a key's full list, regardless of type.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<ResourceRecord>>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.get(key).cloned()
    }

    /// Append a record under `key`. Idempotent by record id: returns false
    /// and leaves the cache untouched when the id is already present.
    pub fn insert(&self, key: CacheKey, record: ResourceRecord) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.ids.contains_key(&record.id) {
            return false;
        }
        inner.ids.insert(record.id, key.clone());
        let mut list: Vec<ResourceRecord> = inner
            .entries
            .get(&key)
            .map(|l| l.as_ref().clone())
            .unwrap_or_default();
        list.push(record);
        inner.entries.insert(key, Arc::new(list));
        true
    }

    /// Replace the entry under `key` that has the new record's id. Returns
    /// false (no-op) when that id is not present under the key.
    pub fn update(&self, key: CacheKey, record: ResourceRecord) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let Some(list) = inner.entries.get(&key) else {
            return false;
        };
        let Some(position) = list.iter().position(|r| r.id == record.id) else {
            return false;
        };
        let mut replaced = list.as_ref().clone();
        replaced[position] = record;
        inner.entries.insert(key, Arc::new(replaced));
        true
    }

    /// Remove the record with this id, provided it lives under the given
    /// scope. Returns false (no-op) when the id is unknown or scoped
    /// elsewhere. Other entries under the same key are untouched.
    pub fn remove(&self, scope: &str, record_id: i64) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        match inner.ids.get(&record_id) {
            Some(key) if key.scope() == scope.trim() => {
                inner.purge_id(record_id);
                true
            }
            _ => false,
        }
    }

    /// Reload semantics: evict every entry of `qtype` under `key` and append
    /// the fresh records. Entries of other types under the key survive.
    pub fn replace_qtype(&self, key: CacheKey, qtype: u16, records: Vec<ResourceRecord>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let mut kept: Vec<ResourceRecord> = Vec::new();
        if let Some(list) = inner.entries.get(&key).cloned() {
            for record in list.iter() {
                if record.qtype() == qtype {
                    inner.ids.remove(&record.id);
                } else {
                    kept.push(record.clone());
                }
            }
        }
        for record in records {
            if inner.ids.contains_key(&record.id) && inner.ids.get(&record.id) != Some(&key) {
                inner.purge_id(record.id);
            }
            inner.ids.insert(record.id, key.clone());
            kept.push(record);
        }
        if kept.is_empty() {
            inner.entries.remove(&key);
        } else {
            inner.entries.insert(key, Arc::new(kept));
        }
    }

    /// Wholesale repopulation for bootstrap and post-reconnect resync.
    pub fn rebuild<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (CacheKey, ResourceRecord)>,
    {
        let mut fresh = CacheInner::default();
        let mut grouped: HashMap<CacheKey, Vec<ResourceRecord>> = HashMap::new();
        for (key, record) in entries {
            fresh.ids.insert(record.id, key.clone());
            grouped.entry(key).or_default().push(record);
        }
        fresh.entries = grouped
            .into_iter()
            .map(|(key, list)| (key, Arc::new(list)))
            .collect();

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *inner = fresh;
    }

    pub fn record_count(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.ids.len()
    }

    pub fn key_count(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}
