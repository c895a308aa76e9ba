//! Error types for the Voquill logging core

use thiserror::Error;

/// Errors raised while setting up logging or talking to its collaborators.
///
/// None of the emit operations return these; they surface only from
/// constructors and from the one-time sink setup.
#[derive(Error, Debug)]
pub enum LogError {
    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink could not establish its delivery channel
    #[error("Sink setup failed: {0}")]
    SinkSetup(String),

    /// A single message could not be delivered by the sink
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;
