use crate::cache::RecordCache;
use authdns_domain::ResourceRecord;
use std::sync::Arc;
use tracing::debug;

/// Read-only answer path: the union of cache lookups for one question set.
///
/// The routing scope arrives out-of-band (call metadata); questions are
/// (owner name, qtype) pairs straight from the wire decoder. An empty union
/// is a normal empty answer, not an error.
pub struct QueryResolver {
    cache: Arc<RecordCache>,
}

impl QueryResolver {
    pub fn new(cache: Arc<RecordCache>) -> Self {
        Self { cache }
    }

    pub fn resolve(&self, scope: &str, questions: &[(String, u16)]) -> Vec<ResourceRecord> {
        let mut answers = Vec::new();
        for (name, qtype) in questions {
            answers.extend(self.cache.lookup(scope, name, *qtype));
        }
        if answers.is_empty() {
            debug!(%scope, ?questions, "No records found");
        }
        answers
    }
}
