pub mod invalidation_channel;
pub mod record_repository;
pub mod snapshot_store;

pub use invalidation_channel::InvalidationChannel;
pub use record_repository::RecordRepository;
pub use snapshot_store::SnapshotStore;
