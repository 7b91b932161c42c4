use super::backend::StorageBackend;
use crate::error::{NewsdeskError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since newsdesk is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    failing_keys: RefCell<HashSet<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size (key + value bytes) the backend accepts.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Make every write to `key` fail, for testing error handling.
    pub fn fail_writes_for(&self, key: &str) {
        self.failing_keys.borrow_mut().insert(key.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing_keys.borrow_mut().clear();
    }

    /// Raw access for tests that plant corrupt documents.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.failing_keys.borrow().contains(key) {
            return Err(NewsdeskError::Store("Simulated write error".to_string()));
        }

        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(NewsdeskError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
