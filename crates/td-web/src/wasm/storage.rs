//! `window.localStorage` as a key-value store.

use async_trait::async_trait;
use td_core::ports::{KeyValueStorePort, StorageError};
use web_sys::{Storage, Window};

pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    /// Private browsing modes may deny access; every call then fails with
    /// [`StorageError::Unavailable`].
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage is not available");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

fn io_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Io(format!("{err:?}"))
}

#[async_trait(?Send)]
impl KeyValueStorePort for LocalStorageStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(io_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(io_error)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(io_error)
    }
}
