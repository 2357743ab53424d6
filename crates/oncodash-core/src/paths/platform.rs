//! Platform-specific data root resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "ONCODASH_DATA_DIR";

/// Get the root directory for application data (settings, preferences).
///
/// Resolution order:
/// 1. `ONCODASH_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/oncodash`)
///
/// The directory is created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_dir().ok_or(PathError::NoDataDir)?.join("oncodash"),
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}
