//! Key-value storage backends
//!
//! The browser build talks to `window.localStorage`; native builds and tests
//! use an in-memory map with the same semantics.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

/// Failure talking to a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage is available (private mode, sandboxed iframe, ...)
    #[error("local storage is unavailable")]
    Unavailable,
    /// The backend rejected the operation (quota, security error)
    #[error("storage access failed: {0}")]
    Access(String),
    /// A record could not be encoded
    #[error("failed to encode record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage` backed store
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the page's local storage
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(js_error)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Access(format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("snakeHighScore", "12").unwrap();
        assert_eq!(store.get("snakeHighScore").unwrap().as_deref(), Some("12"));

        store.set("snakeHighScore", "13").unwrap();
        assert_eq!(store.len(), 1);

        store.remove("snakeHighScore").unwrap();
        assert_eq!(store.get("snakeHighScore").unwrap(), None);
    }

    #[test]
    fn test_storage_error_messages() {
        assert_eq!(
            StorageError::Unavailable.to_string(),
            "local storage is unavailable"
        );
        assert_eq!(
            StorageError::Access("QuotaExceededError".into()).to_string(),
            "storage access failed: QuotaExceededError"
        );
    }
}
