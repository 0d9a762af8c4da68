//! Key-value preference storage.
//!
//! Values are JSON documents keyed by short strings, kept in a single JSON
//! object on disk. Callers treat the store as best-effort: a failed read
//! falls back to defaults and a failed write is logged and dropped.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::StorageError;

/// Persistence seam for user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Remove `key` if present.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, used by tests and when no config directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// JSON file store. The whole file is rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| StorageError::Read(e.to_string()))?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_all(&self, entries: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Write(e.to_string()))?;

        std::fs::write(&self.path, json).map_err(|e| StorageError::Write(e.to_string()))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable preferences at {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value);
        self.write_all(&entries)?;
        tracing::debug!("Stored preference {} at {:?}", key, self.path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("wn_unit").unwrap().is_none());

        store.set("wn_unit", json!("F")).unwrap();
        assert_eq!(store.get("wn_unit").unwrap(), Some(json!("F")));

        store.remove("wn_unit").unwrap();
        assert!(store.get("wn_unit").unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = FileStore::new(&path);
        store.set("wn_unit", json!("F")).unwrap();
        store.set("wn_recent", json!([{"name": "Paris"}])).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("wn_unit").unwrap(), Some(json!("F")));
        assert_eq!(
            reopened.get("wn_recent").unwrap(),
            Some(json!([{"name": "Paris"}]))
        );
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert!(store.get("wn_unit").unwrap().is_none());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("wn_unit"), Err(StorageError::Corrupt(_))));

        // Writing recovers the file
        store.set("wn_unit", json!("C")).unwrap();
        assert_eq!(store.get("wn_unit").unwrap(), Some(json!("C")));
    }
}
