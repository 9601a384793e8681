use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("DNS codec error: {0}")]
    CodecError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
