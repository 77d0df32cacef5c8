use std::path::PathBuf;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying engine could not be opened. Fatal: the process cannot
    /// serve without a store.
    #[error("cannot open {backend} store at {path}: {reason}")]
    Open {
        backend: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// In-memory mode was requested for a backend that only runs on disk.
    #[error("in-memory mode is not supported by the {0} backend")]
    MemoryUnsupported(&'static str),

    /// I/O error from the filesystem (e.g. creating the storage directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the sled engine.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Error from the redb engine.
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    /// Error from the rocksdb engine.
    #[error("rocksdb error: {0}")]
    Rocks(#[from] rocksdb::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// redb surfaces a distinct error type per operation family; fold them all
// into the unified redb::Error so callers see one variant.

impl From<redb::DatabaseError> for StoreError {
    fn from(e: redb::DatabaseError) -> Self {
        Self::Redb(e.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(e: redb::TransactionError) -> Self {
        Self::Redb(e.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(e: redb::TableError) -> Self {
        Self::Redb(e.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(e: redb::StorageError) -> Self {
        Self::Redb(e.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(e: redb::CommitError) -> Self {
        Self::Redb(e.into())
    }
}
