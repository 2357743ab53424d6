//! `settings.json` persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use oncodash_core::{Settings, SettingsUpdate, ensure_directory, settings_path, validate_settings};
use tracing::debug;

use crate::error::CliError;

/// Reads and writes [`Settings`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file under the data root.
    pub fn locate() -> Result<Self, CliError> {
        Ok(Self::new(settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing or empty file yields all-default settings.
    pub fn load(&self) -> Result<Settings, CliError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(CliError::Io(format!("{}: {e}", self.path.display())));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_json::from_str(&raw)
            .map_err(|e| CliError::Config(format!("{}: {e}", self.path.display())))
    }

    pub fn save(&self, settings: &Settings) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            ensure_directory(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| CliError::Config(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| CliError::Io(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Apply `update`, validate, and persist. Nothing is written if the
    /// result is invalid.
    pub fn update(&self, update: &SettingsUpdate) -> Result<Settings, CliError> {
        let mut settings = self.load()?;
        settings.merge(update);
        validate_settings(&settings)?;
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncodash_core::Locale;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let temp = tempdir().unwrap();
        let file = SettingsFile::new(temp.path().join("settings.json"));
        assert_eq!(file.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_update_persists() {
        let temp = tempdir().unwrap();
        let file = SettingsFile::new(temp.path().join("nested").join("settings.json"));

        let update = SettingsUpdate::from_key_value("locale", "fr").unwrap();
        file.update(&update).unwrap();

        let reloaded = file.load().unwrap();
        assert_eq!(reloaded.locale, Some(Locale::Fr));
        assert_eq!(reloaded.api_base_url, None);
    }

    #[test]
    fn test_invalid_update_is_not_written() {
        let temp = tempdir().unwrap();
        let file = SettingsFile::new(temp.path().join("settings.json"));

        let update = SettingsUpdate::from_key_value("request_timeout_secs", "0").unwrap();
        let err = file.update(&update).unwrap_err();
        assert_eq!(err.exit_code(), 78);
        assert!(!file.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SettingsFile::new(path).load().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
