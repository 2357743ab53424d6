//! Locations of the files stored under the data root.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Settings file name under the data root.
pub const SETTINGS_FILE: &str = "settings.json";

/// Preference store file name under the data root.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Path to `settings.json`.
pub fn settings_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(SETTINGS_FILE))
}

/// Path to `preferences.json` (theme preference and other UI state).
pub fn preferences_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(PREFERENCES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::platform::DATA_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn test_files_live_under_data_root() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, temp.path().to_string_lossy().as_ref());

        assert_eq!(settings_path().unwrap(), temp.path().join("settings.json"));
        assert_eq!(
            preferences_path().unwrap(),
            temp.path().join("preferences.json")
        );
    }
}
