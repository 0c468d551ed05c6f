//! Key/value preference persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The theme toggle persists one string. In the browser that lives in
//! `localStorage`; native builds and tests use [`MemoryStore`].
//!
//! ERROR HANDLING
//! ==============
//! Storage can be disabled (private browsing, sandboxed iframes) or full.
//! Errors are returned to the caller, which logs and carries on.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

pub trait PreferenceStore: Clone + 'static {
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Origin-scoped `window.localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable),
            Err(err) => Err(StorageError::Read(format!("{err:?}"))),
        }
    }
}

#[cfg(feature = "hydrate")]
impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read(format!("{err:?}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}

/// In-memory store. [`MemoryStore::unavailable`] builds one that fails
/// every operation.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    unavailable: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        let store = Self::default();
        store.unavailable.set(true);
        store
    }

    /// Store pre-seeded with one entry.
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable);
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
