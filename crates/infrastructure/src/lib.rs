pub mod channel;
pub mod database;
pub mod repositories;
pub mod rpc;
pub mod snapshot;
