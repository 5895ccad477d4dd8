//! Configuration error types

use std::path::PathBuf;

/// Errors raised while loading or validating a dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The default page size is zero or not one of the offered sizes.
    #[error("invalid default page size {size}: {reason}")]
    InvalidPageSize { size: usize, reason: &'static str },
}
