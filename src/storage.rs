// src/storage.rs
//
// String key/value backends for the attempt history: in-memory, a JSON file
// on native builds and the browser's localStorage on wasm32.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

/// Volatile backend, used in tests and as the fallback when nothing else opens.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{KeyValueStore, StorageError};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Whole-map JSON file. Every write replaces the file via a temp file and
    /// a rename, so readers see either the old or the new contents.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl FileStore {
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
            let path = path.into();
            let entries = match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(entries) => entries,
                    Err(err) => {
                        log::warn!(
                            "Ignoring unreadable storage file {}: {err}",
                            path.display()
                        );
                        BTreeMap::new()
                    }
                },
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(err) => return Err(err.into()),
            };
            log::info!(
                "Opened storage file {} ({} keys)",
                path.display(),
                entries.len()
            );
            Ok(Self { path, entries })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
            let json = serde_json::to_string(entries)?;
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }

        fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StorageError> {
            self.write(&entries)?;
            self.entries = entries;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            let mut next = self.entries.clone();
            next.insert(key.to_owned(), value);
            self.commit(next)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if !self.entries.contains_key(key) {
                return Ok(());
            }
            let mut next = self.entries.clone();
            next.remove(key);
            self.commit(next)
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            Ok(self.entries.keys().cloned().collect())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{KeyValueStore, StorageError};
    use eframe::wasm_bindgen::JsValue;

    fn backend_error(err: JsValue) -> StorageError {
        StorageError::Backend(format!("{err:?}"))
    }

    /// `window.localStorage`. Writes can fail when the quota is exceeded or
    /// storage is disabled by the browser.
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, StorageError> {
            let window =
                web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
            let storage = window
                .local_storage()
                .map_err(backend_error)?
                .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage.get_item(key).map_err(backend_error)
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            self.storage.set_item(key, &value).map_err(backend_error)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.storage.remove_item(key).map_err(backend_error)
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            let len = self.storage.length().map_err(backend_error)?;
            let mut keys = Vec::with_capacity(len as usize);
            for i in 0..len {
                if let Some(key) = self.storage.key(i).map_err(backend_error)? {
                    keys.push(key);
                }
            }
            Ok(keys)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basic_operations() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1".into()).unwrap();
        store.set("b", "2".into()).unwrap();
        store.set("a", "3".into()).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.keys().unwrap(), ["a", "b"]);

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.keys().unwrap(), ["b"]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "boardprep-{name}-{}-{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_persists_across_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("boardPrepPro:u1:categories", "[\"physics\"]".into()).unwrap();
            store.set("other", "x".into()).unwrap();
            store.remove("other").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get("boardPrepPro:u1:categories").unwrap().as_deref(),
            Some("[\"physics\"]")
        );
        assert_eq!(store.get("other").unwrap(), None);
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_starts_empty_on_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_failed_write_keeps_previous_contents() {
        let dir = temp_path("dir");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("kept", "1".into()).unwrap();

        // Replacing the target with a directory makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        assert!(store.set("lost", "2".into()).is_err());
        assert_eq!(store.get("lost").unwrap(), None);
        assert_eq!(store.get("kept").unwrap().as_deref(), Some("1"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
