//! File-based key/value store
//!
//! Persists every entry in one JSON object, the native counterpart of the
//! browser's `localStorage`. Each write rewrites the whole file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use td_core::ports::{KeyValueStorePort, StorageError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_STORE_FILE: &str = "trackdash-storage.json";

pub struct FileKeyValueStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store with custom file path
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store under `base_dir` with the default file name
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_STORE_FILE))
    }

    /// Store in the platform data directory, e.g. `~/.local/share/trackdash/`.
    pub fn in_data_dir() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::with_defaults(dir.join("trackdash")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !fs::try_exists(&self.file_path).await? {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.file_path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse store file: {e}"))
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| anyhow::anyhow!("Failed to serialize store: {e}"))?;

        let mut file = fs::File::create(&self.file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create store file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write store file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync store file: {e}"))?;

        Ok(())
    }

    async fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await.map_err(io_error)?;
        change(&mut entries);
        self.persist(&entries).await.map_err(io_error)
    }
}

fn io_error(err: anyhow::Error) -> StorageError {
    StorageError::Io(format!("{err:#}"))
}

#[async_trait(?Send)]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.load().await.map_err(io_error)?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
        .await?;
        debug!(key, path = %self.file_path.display(), "store entry written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_returns_none_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("missing.json"));

        assert_eq!(store.get("mode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        let store = FileKeyValueStore::new(path.clone());
        store.set("customerRegCurrentStep", "2").await.unwrap();
        store.set("mode", "dark-only").await.unwrap();
        drop(store);

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(
            reopened.get("customerRegCurrentStep").await.unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(reopened.get("mode").await.unwrap().as_deref(), Some("dark-only"));
    }

    #[tokio::test]
    async fn remove_keeps_other_entries() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_defaults(temp_dir.path().to_path_buf());
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();

        store.remove("a").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
        assert!(store.path().ends_with(DEFAULT_STORE_FILE));
    }

    #[tokio::test]
    async fn empty_file_reads_as_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "  \n").await.unwrap();
        let store = FileKeyValueStore::new(path);

        assert_eq!(store.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "[1, 2").await.unwrap();
        let store = FileKeyValueStore::new(path);

        let result = store.get("anything").await;

        assert!(matches!(result, Err(StorageError::Io(message)) if message.contains("parse")));
    }
}
