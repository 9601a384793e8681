use authdns_domain::{CacheKey, RecordRow, ResourceRecord};
use tracing::warn;

/// Materialize one row, logging and discarding rows that cannot be typed.
/// Unsupported types and malformed address literals are per-record warnings,
/// never batch failures.
pub fn materialize_row(row: &RecordRow) -> Option<(CacheKey, ResourceRecord)> {
    match ResourceRecord::from_row(row) {
        Ok(record) => Some((CacheKey::new(&row.scope, &row.name), record)),
        Err(reason) => {
            warn!(
                record_id = row.id,
                scope = %row.scope,
                name = %row.name,
                qtype = row.qtype,
                %reason,
                "Dropping record that cannot be materialized"
            );
            None
        }
    }
}

/// Materialize a batch; returns the usable entries and the number skipped.
pub fn materialize_rows(rows: &[RecordRow]) -> (Vec<(CacheKey, ResourceRecord)>, usize) {
    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        match materialize_row(row) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }
    (entries, skipped)
}
