//! Session store error types

/// Errors raised by persistent session stores.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
