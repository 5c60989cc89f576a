/// Directory-backed JSON document store
///
/// `LocalStore` persists each collection as one pretty-printed JSON file
/// under a data directory. It is the Rust counterpart of the browser's
/// local key-value storage the service was designed around: small, local,
/// single-actor, no server.
///
/// # Guarantees
///
/// - `load` never fails the caller: an absent or undecodable document
///   yields the collection's empty default and a structured warning.
/// - `save` writes atomically (temp file + rename) so a crash mid-write
///   cannot leave a half-written collection behind.
/// - `update` performs the whole read-modify-write under an internal
///   async mutex and re-reads the document immediately before the final
///   write. Two saves racing from the same logical actor (a double
///   submit) therefore serialize instead of losing updates;
///   last-writer-wins, no transaction abstraction.
///
/// # Example
///
/// ```no_run
/// use pawfund_shared::store::LocalStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = LocalStore::open("./data")?;
///
/// let count = store
///     .update("counters", |values: &mut Vec<u32>| {
///         values.push(values.len() as u32);
///         values.len()
///     })
///     .await?;
/// println!("{} entries", count);
/// # Ok(())
/// # }
/// ```

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Errors surfaced by store mutations
///
/// Decode failures are deliberately absent: corrupt persisted JSON is
/// recovered locally by substituting the empty default, never returned
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Collection could not be serialized to JSON
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Directory-backed JSON document store
pub struct LocalStore {
    /// Data directory holding one `<key>.json` file per collection
    dir: PathBuf,

    /// Serializes read-modify-write cycles across concurrent saves
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Opens a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened local store");
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the path of the document backing `key`
    pub fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Loads a collection, falling back to its empty default
    ///
    /// An absent document is the normal first-run case and is handled
    /// silently; anything else that prevents decoding (unreadable file,
    /// corrupt JSON) is logged and also yields the default. Load never
    /// propagates a fault to the caller.
    pub async fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.document_path(key);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return T::default();
            }
            Err(err) => {
                warn!(key, error = %err, "Failed to read collection, substituting empty default");
                return T::default();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "Corrupt collection document, substituting empty default");
                T::default()
            }
        }
    }

    /// Persists a whole collection atomically
    ///
    /// The document is written to a sibling temp file first and renamed
    /// into place, so readers never observe a partial write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if serialization fails or
    /// `StoreError::Io` if the write or rename fails.
    pub async fn save<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let path = self.document_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        let encoded = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, &encoded).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(key, bytes = encoded.len(), "Persisted collection");
        Ok(())
    }

    /// Read-modify-write of a collection under the store's write lock
    ///
    /// The document is re-read while the lock is held, mutated by `f`,
    /// and written back before the lock is released. This is the only
    /// mutation primitive: the per-entity model operations all go
    /// through it, which is what guards concurrent saves against lost
    /// updates.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the final write fails. The closure itself
    /// is infallible; operations that can reject (duplicate email, missing
    /// referent) report through their return value `R`.
    pub async fn update<T, R, F>(&self, key: &str, f: F) -> Result<R, StoreError>
    where
        T: DeserializeOwned + Default + Serialize,
        F: FnOnce(&mut T) -> R,
    {
        let _guard = self.write_lock.lock().await;

        let mut value: T = self.load(key).await;
        let result = f(&mut value);
        self.save(key, &value).await?;

        Ok(result)
    }

    /// Removes a collection document entirely
    ///
    /// Missing documents are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` for any failure other than the document
    /// being absent.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::remove_file(self.document_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").field("dir", &self.dir).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path()).expect("open store");
        (dir, store)
    }

    #[tokio::test]
    async fn test_load_missing_returns_default() {
        let (_dir, store) = temp_store();
        let values: Vec<String> = store.load("missing").await;
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let (_dir, store) = temp_store();

        let values = vec!["rex".to_string(), "bella".to_string()];
        store.save("names", &values).await.expect("save");

        let loaded: Vec<String> = store.load("names").await;
        assert_eq!(loaded, values);
    }

    #[tokio::test]
    async fn test_load_corrupt_document_returns_default() {
        let (_dir, store) = temp_store();

        std::fs::write(store.document_path("names"), b"{not json!").expect("write");

        let loaded: Vec<String> = store.load("names").await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_mutation() {
        let (_dir, store) = temp_store();

        let len = store
            .update("nums", |values: &mut Vec<u32>| {
                values.push(7);
                values.len()
            })
            .await
            .expect("update");
        assert_eq!(len, 1);

        let loaded: Vec<u32> = store.load("nums").await;
        assert_eq!(loaded, vec![7]);
    }

    #[tokio::test]
    async fn test_save_load_is_idempotent() {
        let (_dir, store) = temp_store();

        let values = vec![1u32, 2, 3];
        store.save("nums", &values).await.expect("first save");

        let loaded: Vec<u32> = store.load("nums").await;
        store.save("nums", &loaded).await.expect("second save");

        let reloaded: Vec<u32> = store.load("nums").await;
        assert_eq!(reloaded, values);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let (_dir, store) = temp_store();
        store.remove("never-written").await.expect("remove");
    }

    #[tokio::test]
    async fn test_concurrent_updates_do_not_lose_writes() {
        let (_dir, store) = temp_store();
        let store = std::sync::Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..10u32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update("nums", move |values: &mut Vec<u32>| values.push(i))
                    .await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("update");
        }

        let loaded: Vec<u32> = store.load("nums").await;
        assert_eq!(loaded.len(), 10);
    }
}
