//! Error types

mod config;
mod date;
mod field;
mod mapping;
mod session;
mod table;

pub use config::*;
pub use date::*;
pub use field::*;
pub use mapping::*;
pub use session::*;
pub use table::*;

/// Any error produced by this crate.
///
/// Each layer returns its own error type; this enum exists for callers that
/// want a single `?`-compatible type across layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    TableConfig(#[from] TableConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
