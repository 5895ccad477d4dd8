//! JSON-file session store with in-memory cache.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::PoisonError;
use std::sync::RwLock;

use log::debug;
use tempfile::NamedTempFile;

use super::SessionError;
use super::SessionStore;

/// Session storage persisted as a JSON object in a single file.
///
/// The whole file is read once on open. Every write replaces the file
/// through a temporary file in the same directory, and the cache only takes
/// the new value once the file has been written.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing file is an empty session.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!("Opened session store {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            cache: RwLock::new(values),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(values)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Applies `change` to a copy of the cache, persists it, then swaps it in.
    fn update<F>(&self, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = cache.clone();
        if !change(&mut next) {
            return Ok(());
        }
        self.persist(&next)?;
        *cache = next;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.update(|values| {
            values.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.update(|values| values.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.update(|values| {
            values.clear();
            true
        })
    }
}
