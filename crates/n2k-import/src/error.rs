use n2k_store::StoreError;

/// Errors from a bulk-import run.
///
/// Any of these aborts the run; rows already committed in earlier batches
/// stay in the store (the blast radius of a failure is at most one block).
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// I/O error reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural CSV error (decode failure, unreadable row). Fatal:
    /// skipping a shifted row would silently corrupt the dual index.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row with the wrong column count. Fatal for the same reason.
    #[error("malformed CSV row at line {line}: expected 2 fields, got {fields}")]
    MalformedRow { line: u64, fields: usize },

    /// Error from the store (open, batch, or commit).
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
