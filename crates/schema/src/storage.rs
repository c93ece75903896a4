//! Key/value storage
//!
//! Records are kept as JSON arrays under a handful of string keys. The
//! desktop app stores each key as a `{key}.json` document in its data
//! directory; tests use the in-memory store.

use formwright_core::{FormError, FormResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Saved designer configurations
pub const FORM_CONFIGS_KEY: &str = "formConfigs";

/// Published forms
pub const PUBLISHED_FORMS_KEY: &str = "publishedForms";

/// Submissions to published forms
pub const FORM_SUBMISSIONS_KEY: &str = "formSubmissions";

// ============================================================================
// KeyValueStore Trait
// ============================================================================

/// String storage addressed by key
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> FormResult<Option<String>>;

    /// Store `value` under `key`, replacing what was there
    fn set(&self, key: &str, value: &str) -> FormResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> FormResult<()>;

    /// Keys currently stored, sorted
    fn keys(&self) -> FormResult<Vec<String>>;

    fn contains(&self, key: &str) -> FormResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Read the JSON array stored under `key`; a missing key is an empty list
pub fn read_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> FormResult<Vec<T>> {
    match store.get(key)? {
        None => Ok(Vec::new()),
        Some(json) if json.trim().is_empty() => Ok(Vec::new()),
        Some(json) => serde_json::from_str(&json).map_err(|e| {
            tracing::warn!("Stored list '{}' is unreadable: {}", key, e);
            FormError::storage(key, e.to_string())
        }),
    }
}

/// Replace the JSON array stored under `key`
pub fn write_list<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> FormResult<()> {
    let json = serde_json::to_string(items)?;
    store.set(key, &json)
}

fn check_key(key: &str) -> FormResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(FormError::storage(key, "Invalid storage key"))
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Store that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> FormResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| FormError::internal("Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FormResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FormResult<()> {
        check_key(key)?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> FormResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> FormResult<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// ============================================================================
// FileStore
// ============================================================================

/// Store that keeps one JSON document per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> FormResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| FormError::FileWrite {
            path: dir.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> FormResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> FormResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FormError::FileRead {
                path,
                message: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> FormResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, value).map_err(|e| FormError::FileWrite {
            path: tmp.clone(),
            message: e.to_string(),
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| FormError::FileWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> FormResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FormError::FileWrite {
                path,
                message: e.to_string(),
            }),
        }
    }

    fn keys(&self) -> FormResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| FormError::FileRead {
            path: self.dir.clone(),
            message: e.to_string(),
        })?;

        let mut keys: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|e| e == "json") {
                    path.file_stem().and_then(|s| s.to_str()).map(String::from)
                } else {
                    None
                }
            })
            .collect();
        keys.sort();
        Ok(keys)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("formConfigs").unwrap(), None);
        assert!(!store.contains("formConfigs").unwrap());

        store.set("formConfigs", "[1,2]").unwrap();
        store.set("publishedForms", "[]").unwrap();
        assert_eq!(store.get("formConfigs").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(store.keys().unwrap(), vec!["formConfigs", "publishedForms"]);

        store.set("formConfigs", "[3]").unwrap();
        assert_eq!(store.get("formConfigs").unwrap().as_deref(), Some("[3]"));

        store.remove("formConfigs").unwrap();
        store.remove("formConfigs").unwrap();
        assert_eq!(store.get("formConfigs").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("data")).unwrap();
        exercise(&store);
        assert!(store.dir().exists());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::open(temp_dir.path())
            .unwrap()
            .set("formSubmissions", "[]")
            .unwrap();
        let reopened = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("formSubmissions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("", "x").is_err());
        assert!(MemoryStore::new().set("a b", "x").is_err());
    }

    #[test]
    fn test_read_write_list() {
        let store = MemoryStore::new();
        let empty: Vec<String> = read_list(&store, FORM_CONFIGS_KEY).unwrap();
        assert!(empty.is_empty());

        write_list(&store, FORM_CONFIGS_KEY, &["a".to_string(), "b".to_string()]).unwrap();
        let items: Vec<String> = read_list(&store, FORM_CONFIGS_KEY).unwrap();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_read_list_corrupt() {
        let store = MemoryStore::new();
        store.set(FORM_CONFIGS_KEY, "{not json").unwrap();
        let err = read_list::<String>(&store, FORM_CONFIGS_KEY).unwrap_err();
        assert!(err.is_io());
    }
}
