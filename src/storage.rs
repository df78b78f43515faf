//! # Key-Value Store
//!
//! String keys mapped to JSON values. Two backends:
//!
//! - **Memory**: a shared map, for tests and throwaway sessions.
//! - **Directory**: one `<key>.json` file per key. Writes go through a temp file,
//!   `fsync`, then a rename, so a crash leaves either the old or the new value.
//!
//! [`KvSnapshot`] adapts one key to a [`Snapshot`] so a resource actor can keep its
//! whole collection there.

use resource_actor::{Snapshot, SnapshotError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// The keys this application stores.
pub mod keys {
    pub const PRODUCTS: &str = "inventory_products";
    pub const SETTINGS: &str = "inventory_settings";
    pub const ACCOUNTS: &str = "all_users";
    pub const SESSION: &str = "current_user";
    pub const LANGUAGE: &str = "app_language";
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored value exists but does not parse as the requested type.
    #[error("Value under '{key}' is corrupted: {reason}")]
    Corrupted { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
enum Backend {
    Memory(Arc<Mutex<HashMap<String, String>>>),
    Directory(PathBuf),
}

/// Cheap-to-clone handle to a key-value store.
#[derive(Debug, Clone)]
pub struct KvStore {
    backend: Backend,
}

impl KvStore {
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::default()),
        }
    }

    /// Opens (and creates if needed) a directory-backed store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened key-value store");
        Ok(Self {
            backend: Backend::Directory(dir),
        })
    }

    /// Reads and parses `key`. A missing key is `Ok(None)`.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.read_raw(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupted {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Serializes `value` and replaces whatever was stored under `key`.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)?;
        match &self.backend {
            Backend::Memory(map) => {
                lock(map).insert(key.to_string(), json);
                Ok(())
            }
            Backend::Directory(dir) => write_atomic(dir, key, &json),
        }
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::Memory(map) => {
                lock(map).remove(key);
                Ok(())
            }
            Backend::Directory(dir) => {
                let path = file_for(dir, key);
                match std::fs::remove_file(&path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(source) => Err(StorageError::Io { path, source }),
                }
            }
        }
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.backend {
            Backend::Memory(map) => Ok(lock(map).get(key).cloned()),
            Backend::Directory(dir) => {
                let path = file_for(dir, key);
                match std::fs::read_to_string(&path) {
                    Ok(raw) => Ok(Some(raw)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(source) => Err(StorageError::Io { path, source }),
                }
            }
        }
    }
}

fn lock(map: &Mutex<HashMap<String, String>>) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn file_for(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

fn write_atomic(dir: &Path, key: &str, json: &str) -> Result<(), StorageError> {
    let target = file_for(dir, key);
    let temp_path = dir.join(format!(".{key}.json.tmp"));
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| StorageError::Io { path, source }
    };

    let mut file = std::fs::File::create(&temp_path).map_err(io_err(&temp_path))?;
    file.write_all(json.as_bytes())
        .map_err(io_err(&temp_path))?;
    file.sync_all().map_err(io_err(&temp_path))?;
    std::fs::rename(&temp_path, &target).map_err(io_err(&target))?;

    debug!(key, bytes = json.len(), "Stored");
    Ok(())
}

/// Persists a resource actor's collection as one JSON array under one key.
pub struct KvSnapshot<T> {
    store: KvStore,
    key: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> KvSnapshot<T> {
    pub fn new(store: KvStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _entity: PhantomData,
        }
    }
}

impl<T> Snapshot<T> for KvSnapshot<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Vec<T>, SnapshotError> {
        let items: Option<Vec<T>> = self.store.get_item(self.key).inspect_err(|e| {
            warn!(key = self.key, error = %e, "Snapshot load failed");
        })?;
        Ok(items.unwrap_or_default())
    }

    fn save(&self, items: &[&T]) -> Result<(), SnapshotError> {
        self.store.set_item(self.key, items)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Settings;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = KvStore::in_memory();
        assert_eq!(store.get_item::<Settings>(keys::SETTINGS).unwrap(), None);

        store.set_item(keys::SETTINGS, &Settings::default()).unwrap();
        assert_eq!(
            store.get_item::<Settings>(keys::SETTINGS).unwrap(),
            Some(Settings::default())
        );

        store.remove_item(keys::SETTINGS).unwrap();
        store.remove_item(keys::SETTINGS).unwrap();
        assert_eq!(store.get_item::<Settings>(keys::SETTINGS).unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = KvStore::in_memory();
        let other = store.clone();
        store.set_item(keys::LANGUAGE, "hi").unwrap();
        assert_eq!(
            other.get_item::<String>(keys::LANGUAGE).unwrap().as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_directory_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            low_stock_percent: 35,
            no_change_days: 10,
        };

        KvStore::open(dir.path())
            .unwrap()
            .set_item(keys::SETTINGS, &settings)
            .unwrap();

        let reopened = KvStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item(keys::SETTINGS).unwrap(), Some(settings));
        assert!(dir.path().join("inventory_settings.json").exists());
        assert!(!dir.path().join(".inventory_settings.json.tmp").exists());
    }

    #[test]
    fn test_corrupted_value_is_reported_with_its_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("inventory_settings.json"), "{not json").unwrap();

        let store = KvStore::open(dir.path()).unwrap();
        match store.get_item::<Settings>(keys::SETTINGS) {
            Err(StorageError::Corrupted { key, .. }) => assert_eq!(key, keys::SETTINGS),
            other => panic!("expected Corrupted, got {other:?}"),
        }
    }

    #[test]
    fn test_kv_snapshot_round_trips_collection_in_order() {
        let store = KvStore::in_memory();
        let snapshot = KvSnapshot::<String>::new(store.clone(), "names");
        assert!(snapshot.load().unwrap().is_empty());

        let (a, b) = ("atta".to_string(), "besan".to_string());
        snapshot.save(&[&b, &a]).unwrap();
        assert_eq!(snapshot.load().unwrap(), vec![b, a]);
    }
}
