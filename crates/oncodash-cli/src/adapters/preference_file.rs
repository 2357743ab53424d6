//! JSON-file backed [`PreferenceStore`].

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use oncodash_core::{PreferenceStore, PreferenceStoreError, ensure_directory};
use tracing::warn;

/// Flat string map stored as a JSON object, e.g. `{"theme-preference":"dark"}`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write within this process.
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, PreferenceStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PreferenceStoreError::Storage(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| PreferenceStoreError::Corrupted(e.to_string()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceStoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceStoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut values = match self.read_map() {
            Ok(values) => values,
            Err(PreferenceStoreError::Corrupted(reason)) => {
                warn!(path = %self.path.display(), %reason, "Replacing corrupted preference file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            ensure_directory(parent).map_err(|e| PreferenceStoreError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| PreferenceStoreError::Storage(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| PreferenceStoreError::Storage(format!("{}: {e}", self.path.display())))
    }
}
