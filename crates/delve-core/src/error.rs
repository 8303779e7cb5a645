/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core data model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A persisted chunk record could not be decoded.
    #[error("malformed chunk record: {0}")]
    MalformedChunk(#[from] serde_json::Error),

    /// A chunk source failed to produce a requested chunk.
    #[error("chunk source error: {0}")]
    ChunkSource(String),
}
