//! Location store
//!
//! A flat key-value persistence surface, the durable home of the current
//! location, the custom-waypoint list, and travel history. Reads that fail
//! degrade to "absent" and writes that fail are logged and dropped; storage
//! trouble must never take the session down.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

pub trait KeyValueStore {
    /// Fetch a stored value, or None when the key is absent (or the
    /// backing storage is unreadable).
    fn get(&self, key: &str) -> Option<String>;
    /// Durably record a value under a key, best-effort.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and for sessions whose storage is unusable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// File-backed store: one JSON object holding every key, rewritten on each
/// set. The write-through keeps semantics close to browser local storage.
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store file, tolerating absence (first run) and corruption
    /// (start empty, keep the session alive).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(err) => {
                    warn!(
                        "store file {} is unreadable, starting empty: {}",
                        path.display(),
                        err
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        JsonFileStore { path, entries }
    }

    fn flush(&self) {
        let serialized = match serde_json::to_string_pretty(&self.entries) {
            Ok(s) => s,
            Err(err) => {
                warn!("could not serialize store: {}", err);
                return;
            }
        };
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(dir) {
                    warn!("could not create {}: {}", dir.display(), err);
                    return;
                }
            }
        }
        if let Err(err) = fs::write(&self.path, serialized) {
            warn!("could not write {}: {}", self.path.display(), err);
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("nav:loc:v1"), None);
        store.set("nav:loc:v1", r#"{"kind":"planet"}"#);
        assert_eq!(store.get("nav:loc:v1").as_deref(), Some(r#"{"kind":"planet"}"#));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path);
        store.set("a", "1");
        store.set("b", "2");
        drop(store);

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b").as_deref(), Some("2"));
        assert_eq!(store.get("c"), None);
    }

    #[test]
    fn corrupt_store_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{{{ not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/store.json");
        let mut store = JsonFileStore::open(&path);
        store.set("key", "value");
        assert!(path.exists());
    }
}
