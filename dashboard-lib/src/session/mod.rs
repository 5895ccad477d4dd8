//! Session storage for typed key-value data.
//!
//! The dashboard keeps its auth token and the signed-in user between page
//! loads. Storage is injected through [`SessionStore`] so callers pick where
//! it lives, and [`Session`] adds typed access on top.

mod file;
mod memory;
mod store;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use store::SessionStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SessionError;

/// Key holding the backend auth token.
pub const TOKEN_KEY: &str = "auth_token";

/// Key holding the signed-in user payload.
pub const USER_KEY: &str = "user";

/// Typed session wrapper.
///
/// Wraps a [`SessionStore`] with typed serialization via JSON.
///
/// # Example
///
/// ```
/// use dashboard_lib::session::{MemorySessionStore, Session};
///
/// let session = Session::new(MemorySessionStore::new());
/// session.set_token("abc123").unwrap();
/// assert_eq!(session.token().unwrap().as_deref(), Some("abc123"));
///
/// session.sign_out().unwrap();
/// assert_eq!(session.token().unwrap(), None);
/// ```
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    /// Creates a session over the given store.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a session over a shared store.
    pub fn from_shared(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Get a typed value for a key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get a typed value for a key, returning a default if not found.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, SessionError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Set a typed value for a key.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw)
    }

    /// Remove a key.
    pub fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.store.remove(key)
    }

    // =========================================================================
    // Auth helpers
    // =========================================================================

    /// Returns the stored auth token.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        self.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.set(TOKEN_KEY, token)
    }

    /// Returns `true` if an auth token is stored.
    pub fn is_signed_in(&self) -> Result<bool, SessionError> {
        Ok(self.token()?.is_some_and(|token| !token.is_empty()))
    }

    /// Returns the stored user payload.
    pub fn user<T: DeserializeOwned>(&self) -> Result<Option<T>, SessionError> {
        self.get(USER_KEY)
    }

    pub fn set_user<T: Serialize + ?Sized>(&self, user: &T) -> Result<(), SessionError> {
        self.set(USER_KEY, user)
    }

    /// Drops everything the session holds.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.clear()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
        role: String,
    }

    #[test]
    fn test_typed_user_round_trip() {
        let session = Session::new(MemorySessionStore::new());
        let user = User {
            name: "Ana".into(),
            role: "admin".into(),
        };
        session.set_user(&user).unwrap();
        assert_eq!(session.user::<User>().unwrap(), Some(user));
    }

    #[test]
    fn test_signed_in() {
        let session = Session::new(MemorySessionStore::new());
        assert!(!session.is_signed_in().unwrap());
        session.set_token("t").unwrap();
        assert!(session.is_signed_in().unwrap());
        session.sign_out().unwrap();
        assert!(!session.is_signed_in().unwrap());
    }

    #[test]
    fn test_get_or_default() {
        let session = Session::new(MemorySessionStore::new());
        assert_eq!(session.get_or("page_size", 10usize).unwrap(), 10);
        session.set("page_size", &20usize).unwrap();
        assert_eq!(session.get_or("page_size", 10usize).unwrap(), 20);
    }

    #[test]
    fn test_undecodable_value() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(USER_KEY, "{".into()).unwrap();
        let session = Session::from_shared(store);
        assert!(matches!(session.user::<User>(), Err(SessionError::Json(_))));
    }
}
