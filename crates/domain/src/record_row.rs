use serde::{Deserialize, Serialize};

/// Database-shaped DNS record row.
///
/// The `rdata` payload is a single string whose interpretation depends on
/// `qtype`; typing happens at materialization. Rows are never mutated in
/// place — an update produces a new row with the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: i64,
    /// Routing-scope name this record belongs to (tenant/cluster identifier).
    pub scope: String,
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
    pub ttl: u32,
    pub rdata: String,
    #[serde(default)]
    pub create_user: Option<String>,
    #[serde(default)]
    pub update_user: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl RecordRow {
    /// Row built from invalidation-message fields. Audit columns are not
    /// carried on the feed.
    pub fn from_change(
        id: i64,
        scope: String,
        name: String,
        rdata: String,
        qtype: u16,
        ttl: u32,
    ) -> Self {
        Self {
            id,
            scope,
            name,
            qtype,
            qclass: 1, // IN
            ttl,
            rdata,
            create_user: None,
            update_user: None,
            create_time: None,
            update_time: None,
        }
    }
}

/// Filter for repository fetches. All fields optional; `all()` selects every
/// non-deleted record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub scope: Option<String>,
    pub name: Option<String>,
    pub qtype: Option<u16>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_key(scope: &str, name: &str, qtype: u16) -> Self {
        Self {
            scope: Some(scope.to_string()),
            name: Some(name.to_string()),
            qtype: Some(qtype),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.scope.is_none() && self.name.is_none() && self.qtype.is_none()
    }
}
