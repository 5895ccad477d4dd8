//! Table configuration error types

/// Caller programming errors detected when a table engine is set up.
///
/// These are never produced per row; a table that passed validation cannot
/// fail while sorting, filtering or paginating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableConfigError {
    /// A column has neither a key nor a renderer and would display nothing.
    #[error("Column {index} has neither a key nor a renderer")]
    DecorativeColumn { index: usize },

    /// A column without a key was marked sortable.
    #[error("Column {index} is sortable but has no key to sort by")]
    SortableWithoutKey { index: usize },

    /// Two columns share the same key.
    #[error("Duplicate column key '{0}'")]
    DuplicateKey(String),

    /// The filter column does not name any column key.
    #[error("Filter column '{0}' does not match any column key")]
    UnknownFilterColumn(String),
}
