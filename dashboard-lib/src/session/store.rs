//! Session store trait.

use super::SessionError;

/// Backend trait for session storage.
///
/// Implementations hold raw string values, the way browser storage does.
/// The [`Session`](super::Session) wraps this with typed serialization.
pub trait SessionStore: Send + Sync {
    /// Get the raw value for a key.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Set the raw value for a key.
    fn set(&self, key: &str, value: String) -> Result<(), SessionError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), SessionError>;
}
