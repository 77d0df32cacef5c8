/// Errors from running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serve loop terminated abnormally.
    #[error("server error: {0}")]
    Internal(String),
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
