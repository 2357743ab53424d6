//! Config command handler.

use anyhow::Result;
use oncodash_core::{Settings, SettingsUpdate};

use crate::adapters::SettingsFile;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Execute the config command against the settings file.
pub fn execute(file: &SettingsFile, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = file.load()?;
            println!("Settings file: {}", file.path().display());
            for (key, value) in settings_rows(&settings) {
                println!("  {key:<24} {value}");
            }
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            let update = SettingsUpdate::from_key_value(&key, &value).map_err(CliError::from)?;
            let settings = file.update(&update)?;
            let shown = settings_rows(&settings)
                .into_iter()
                .find(|(name, _)| *name == key)
                .map_or(value, |(_, shown)| shown);
            println!("✓ {key} = {shown}");
            Ok(())
        }
    }
}

/// Effective value of every setting, marking the ones left at their default.
pub fn settings_rows(settings: &Settings) -> Vec<(&'static str, String)> {
    let mark = |is_set: bool, value: String| {
        if is_set { value } else { format!("{value} (default)") }
    };

    vec![
        (
            "api_base_url",
            mark(
                settings.api_base_url.is_some(),
                settings.effective_api_base_url().to_string(),
            ),
        ),
        (
            "request_timeout_secs",
            mark(
                settings.request_timeout_secs.is_some(),
                settings.effective_request_timeout_secs().to_string(),
            ),
        ),
        (
            "locale",
            mark(
                settings.locale.is_some(),
                settings.effective_locale().to_string(),
            ),
        ),
        (
            "theme_poll_interval_ms",
            mark(
                settings.theme_poll_interval_ms.is_some(),
                settings.effective_theme_poll_interval_ms().to_string(),
            ),
        ),
        (
            "export_dir",
            settings
                .export_dir
                .clone()
                .unwrap_or_else(|| "(working directory)".to_string()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncodash_core::{Locale, SETTINGS_KEYS};
    use tempfile::tempdir;

    #[test]
    fn test_rows_cover_every_key() {
        let rows = settings_rows(&Settings::default());
        let keys: Vec<&str> = rows.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, SETTINGS_KEYS);
    }

    #[test]
    fn test_rows_mark_defaults() {
        let settings = Settings {
            locale: Some(Locale::Fr),
            ..Default::default()
        };
        let rows = settings_rows(&settings);
        assert_eq!(rows[0].1, "http://localhost:8000 (default)");
        assert_eq!(rows[2].1, "fr");
    }

    #[test]
    fn test_set_then_reset() {
        let temp = tempdir().unwrap();
        let file = SettingsFile::new(temp.path().join("settings.json"));

        execute(
            &file,
            ConfigCommand::Set {
                key: "theme_poll_interval_ms".to_string(),
                value: "500".to_string(),
            },
        )
        .unwrap();
        assert_eq!(file.load().unwrap().theme_poll_interval_ms, Some(500));

        execute(
            &file,
            ConfigCommand::Set {
                key: "theme_poll_interval_ms".to_string(),
                value: "default".to_string(),
            },
        )
        .unwrap();
        assert_eq!(file.load().unwrap().theme_poll_interval_ms, None);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let temp = tempdir().unwrap();
        let file = SettingsFile::new(temp.path().join("settings.json"));
        let err = execute(
            &file,
            ConfigCommand::Set {
                key: "colour".to_string(),
                value: "blue".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(crate::error::exit_code_for(&err), 78);
    }
}
