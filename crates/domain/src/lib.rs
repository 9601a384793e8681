pub mod cache_key;
pub mod config;
pub mod errors;
pub mod invalidation;
pub mod record_row;
pub mod resource_record;

pub use cache_key::CacheKey;
pub use config::Config;
pub use errors::DomainError;
pub use invalidation::{InvalidationOp, InvalidationParseError};
pub use record_row::{RecordFilter, RecordRow};
pub use resource_record::{qtype, MaterializeError, RecordData, ResourceRecord};
