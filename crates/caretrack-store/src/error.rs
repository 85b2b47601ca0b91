use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event file not found: {path}")]
    NotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed document {id}: {reason}")]
    MalformedDocument { id: String, reason: String },

    #[error("event source unavailable: {0}")]
    Unavailable(String),
}
