use n2k_store::StoreError;

/// Errors from resolver operations.
///
/// Only `insert` surfaces these to callers; `lookup` swallows them into the
/// not-found sentinel at the service boundary.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// Error from the store (open, read, or batch commit).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The record could not be serialized for writing.
    #[error("record encoding error: {0}")]
    Encode(String),

    /// The stored value could not be decoded back into a record.
    #[error("record decoding error: {0}")]
    Decode(String),
}

/// Result alias for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;
