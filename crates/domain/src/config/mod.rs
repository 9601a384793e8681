//! Configuration structures, one module per concern:
//! - `server`: RPC listener binding
//! - `database`: SQLite source of truth
//! - `invalidation`: feed address and channel name
//! - `snapshot`: degraded-mode fallback file
//! - `logging`: log level
//! - `node`: primary-role election input
//! - `root`: top-level config and TOML loading

pub mod database;
pub mod invalidation;
pub mod logging;
pub mod node;
pub mod root;
pub mod server;
pub mod snapshot;

pub use database::DatabaseConfig;
pub use invalidation::InvalidationConfig;
pub use logging::LoggingConfig;
pub use node::NodeConfig;
pub use root::Config;
pub use server::ServerConfig;
pub use snapshot::SnapshotConfig;
