//! In-memory session store using DashMap

use dashmap::DashMap;

use super::SessionError;
use super::SessionStore;

/// Session storage backed by a concurrent hash map.
///
/// Values live as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.values.clear();
        Ok(())
    }
}
