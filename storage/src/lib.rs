//! # Todolist Storage
//!
//! Key-value persistence primitives and the snapshot adapter.
//!
//! The application persists one serialized snapshot of its state under a
//! fixed key in a local key-value store. This crate provides:
//!
//! - [`kv::KeyValueStorage`]: the storage primitive
//!   (`get(key) -> string | absent`, `set(key, string) -> ok | failure`)
//! - [`kv::MemoryStorage`]: ephemeral in-process backend
//! - [`kv::FileStorage`]: one-file-per-key backend for local durability
//! - [`snapshot::SnapshotStore`]: the best-effort persistence adapter -
//!   `load` degrades every failure to "absent", `save` swallows every
//!   failure
//!
//! Persistence here is best-effort by contract: a failed write never
//! blocks or crashes the transition path, and a corrupt snapshot means
//! starting from the default state, not an error.

/// Key-value storage primitive and backends
pub mod kv {
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use thiserror::Error;

    /// Errors that can occur in a storage backend
    ///
    /// Callers on the transition path never see these: the snapshot
    /// adapter logs and swallows them. They exist so backends stay
    /// honest about what went wrong.
    #[derive(Error, Debug)]
    pub enum StorageError {
        /// An underlying filesystem operation failed
        #[error("storage I/O failed: {0}")]
        Io(#[from] std::io::Error),

        /// The in-memory map's lock was poisoned by a panicking holder
        #[error("storage lock poisoned")]
        Poisoned,
    }

    /// The key-value storage primitive
    ///
    /// A browser-style local store: string keys, string values,
    /// best-effort semantics.
    pub trait KeyValueStorage: Send + Sync {
        /// Read the value stored under `key`, if any
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the backend could not be read at
        /// all. A merely missing key is `Ok(None)`.
        fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

        /// Write `value` under `key`, replacing any prior value
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the write failed.
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    }

    // Shared handles delegate, so one backend can serve both the
    // persistence subscription and direct inspection in tests.
    impl<K: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<K> {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            (**self).get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            (**self).set(key, value)
        }
    }

    /// In-process storage backed by a mutex-guarded map
    ///
    /// Used by tests and available wherever persistence across runs is
    /// not wanted.
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryStorage {
        /// Create an empty in-memory store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
            Ok(entries.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
            entries.insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }

    /// Filesystem storage: one file per key under a base directory
    ///
    /// Writes go to a temporary file in the same directory and are
    /// renamed over the target, so a crash mid-write leaves the prior
    /// snapshot intact rather than a torn one.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        base_dir: PathBuf,
    }

    impl FileStorage {
        /// Create a store rooted at `base_dir`
        ///
        /// The directory is created lazily on first write.
        #[must_use]
        pub fn new(base_dir: impl Into<PathBuf>) -> Self {
            Self {
                base_dir: base_dir.into(),
            }
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.base_dir.join(format!("{key}.json"))
        }
    }

    impl KeyValueStorage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match std::fs::read_to_string(self.path_for(key)) {
                Ok(value) => Ok(Some(value)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            std::fs::create_dir_all(&self.base_dir)?;

            let target = self.path_for(key);
            let staging = self.base_dir.join(format!("{key}.json.tmp"));
            {
                let mut file = std::fs::File::create(&staging)?;
                file.write_all(value.as_bytes())?;
                file.sync_all()?;
            }
            std::fs::rename(&staging, &target)?;
            Ok(())
        }
    }

}

/// Best-effort snapshot persistence over a key-value backend
pub mod snapshot {
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use crate::kv::KeyValueStorage;

    /// Serializes application state to a fixed key, best-effort
    ///
    /// `load` turns every failure mode - missing key, unreadable
    /// backend, malformed payload - into `None`, signaling the caller
    /// to start from the default state. `save` is fire-and-forget:
    /// failures are logged and swallowed, never surfaced to the
    /// transition path.
    #[derive(Debug)]
    pub struct SnapshotStore<K> {
        storage: K,
        key: String,
    }

    impl<K: KeyValueStorage> SnapshotStore<K> {
        /// Create an adapter persisting under `key` in `storage`
        pub fn new(storage: K, key: impl Into<String>) -> Self {
            Self {
                storage,
                key: key.into(),
            }
        }

        /// Load the persisted snapshot, if one exists and parses
        pub fn load<S: DeserializeOwned>(&self) -> Option<S> {
            let raw = match self.storage.get(&self.key) {
                Ok(Some(raw)) => raw,
                Ok(None) => return None,
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "Snapshot read failed");
                    return None;
                },
            };

            match serde_json::from_str(&raw) {
                Ok(state) => Some(state),
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "Snapshot payload malformed");
                    None
                },
            }
        }

        /// Persist `state`, ignoring failures
        pub fn save<S: Serialize>(&self, state: &S) {
            let raw = match serde_json::to_string(state) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "Snapshot serialization failed");
                    return;
                },
            };

            if let Err(err) = self.storage.set(&self.key, &raw) {
                tracing::warn!(key = %self.key, error = %err, "Snapshot write failed");
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::kv::{MemoryStorage, StorageError};
        use serde::Deserialize;

        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        struct Snapshot {
            filter: String,
            count: u32,
        }

        #[test]
        fn load_on_empty_storage_is_absent() {
            let snapshots = SnapshotStore::new(MemoryStorage::new(), "test-state");
            assert_eq!(snapshots.load::<Snapshot>(), None);
        }

        #[test]
        fn save_then_load_round_trips() {
            let snapshots = SnapshotStore::new(MemoryStorage::new(), "test-state");
            let state = Snapshot {
                filter: "all".to_owned(),
                count: 3,
            };

            snapshots.save(&state);
            assert_eq!(snapshots.load::<Snapshot>(), Some(state));
        }

        #[test]
        fn load_of_invalid_json_is_absent() {
            let storage = MemoryStorage::new();
            storage.set("test-state", "{not json").expect("set");

            let snapshots = SnapshotStore::new(storage, "test-state");
            assert_eq!(snapshots.load::<Snapshot>(), None);
        }

        #[test]
        fn load_of_wrong_shape_is_absent() {
            let storage = MemoryStorage::new();
            storage.set("test-state", "[1, 2, 3]").expect("set");

            let snapshots = SnapshotStore::new(storage, "test-state");
            assert_eq!(snapshots.load::<Snapshot>(), None);
        }

        struct FailingStorage;

        impl KeyValueStorage for FailingStorage {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::Poisoned)
            }

            fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Poisoned)
            }
        }

        #[test]
        fn unavailable_storage_degrades_to_absent() {
            let snapshots = SnapshotStore::new(FailingStorage, "test-state");

            // save must not panic, load must yield absent
            snapshots.save(&Snapshot {
                filter: "all".to_owned(),
                count: 1,
            });
            assert_eq!(snapshots.load::<Snapshot>(), None);
        }
    }
}
