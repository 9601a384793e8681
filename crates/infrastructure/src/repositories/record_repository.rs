use async_trait::async_trait;
use authdns_application::ports::RecordRepository;
use authdns_domain::{DomainError, RecordFilter, RecordRow};
use sqlx::SqlitePool;
use tracing::instrument;

type RecordTuple = (
    i64,
    String,
    String,
    i64,
    i64,
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// SQLite-backed source of truth. Live records only; soft deletes stay out
/// of every result set.
pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const BASE_QUERY: &str = "SELECT r.id, s.scope_name, r.name, r.qtype, r.qclass, r.ttl, r.rdata, \
     r.create_user, r.update_user, r.create_time, r.update_time \
     FROM dns_records r \
     JOIN routing_scopes s ON s.id = r.scope_id \
     WHERE r.is_deleted = 0";

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    #[instrument(skip(self))]
    async fn fetch(&self, filter: &RecordFilter) -> Result<Vec<RecordRow>, DomainError> {
        let mut sql = String::from(BASE_QUERY);
        if filter.scope.is_some() {
            sql.push_str(" AND s.scope_name = ?");
        }
        if filter.name.is_some() {
            sql.push_str(" AND r.name = ?");
        }
        if filter.qtype.is_some() {
            sql.push_str(" AND r.qtype = ?");
        }

        let mut query = sqlx::query_as::<_, RecordTuple>(&sql);
        if let Some(scope) = &filter.scope {
            query = query.bind(scope);
        }
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(qtype) = filter.qtype {
            query = query.bind(qtype as i64);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    id,
                    scope,
                    name,
                    qtype,
                    qclass,
                    ttl,
                    rdata,
                    create_user,
                    update_user,
                    create_time,
                    update_time,
                )| RecordRow {
                    id,
                    scope,
                    name,
                    qtype: qtype as u16,
                    qclass: qclass as u16,
                    ttl: ttl as u32,
                    rdata,
                    create_user,
                    update_user,
                    create_time,
                    update_time,
                },
            )
            .collect())
    }
}
