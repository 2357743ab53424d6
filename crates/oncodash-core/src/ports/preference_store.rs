//! Key-value persistence port for user preferences.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from a preference store backend.
#[derive(Debug, Error)]
pub enum PreferenceStoreError {
    /// The backing storage could not be read or written.
    #[error("Preference storage error: {0}")]
    Storage(String),

    /// The stored data exists but cannot be decoded.
    #[error("Corrupted preference data: {0}")]
    Corrupted(String),
}

/// A flat string-to-string persistence slot facility.
///
/// Implementations may fail; callers decide whether a failure matters.
/// The theme resolver, for one, treats every read failure as "absent".
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceStoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceStoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| PreferenceStoreError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceStoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PreferenceStoreError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_missing() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get("theme-preference").unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_then_get() {
        let store = MemoryPreferenceStore::new();
        store.set("theme-preference", "dark").unwrap();
        assert_eq!(
            store.get("theme-preference").unwrap(),
            Some("dark".to_string())
        );

        store.set("theme-preference", "light").unwrap();
        assert_eq!(
            store.get("theme-preference").unwrap(),
            Some("light".to_string())
        );
    }

    #[test]
    fn test_with_entry() {
        let store = MemoryPreferenceStore::with_entry("k", "v");
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }
}
