//! Settings domain types and validation.
//!
//! Pure types; reading and writing `settings.json` is left to adapters.

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// Base URL of the prediction service when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Request timeout for the prediction service, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How often the OS color scheme is sampled, in milliseconds.
pub const DEFAULT_THEME_POLL_INTERVAL_MS: u64 = 2_000;

/// Keys accepted by [`SettingsUpdate::from_key_value`].
pub const SETTINGS_KEYS: [&str; 5] = [
    "api_base_url",
    "request_timeout_secs",
    "locale",
    "theme_poll_interval_ms",
    "export_dir",
];

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the prediction service.
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds (1-300).
    pub request_timeout_secs: Option<u64>,

    /// Interface language.
    pub locale: Option<Locale>,

    /// OS color-scheme polling interval in milliseconds (100-60000).
    pub theme_poll_interval_ms: Option<u64>,

    /// Directory exported reports are written to. Defaults to the working directory.
    pub export_dir: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            locale: Some(Locale::default()),
            theme_poll_interval_ms: Some(DEFAULT_THEME_POLL_INTERVAL_MS),
            export_dir: None,
        }
    }

    #[must_use]
    pub fn effective_api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    #[must_use]
    pub const fn effective_request_timeout_secs(&self) -> u64 {
        match self.request_timeout_secs {
            Some(secs) => secs,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn effective_locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }

    #[must_use]
    pub const fn effective_theme_poll_interval_ms(&self) -> u64 {
        match self.theme_poll_interval_ms {
            Some(ms) => ms,
            None => DEFAULT_THEME_POLL_INTERVAL_MS,
        }
    }

    /// Merge an update into this one, only touching fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref url) = other.api_base_url {
            self.api_base_url.clone_from(url);
        }
        if let Some(ref secs) = other.request_timeout_secs {
            self.request_timeout_secs = *secs;
        }
        if let Some(ref locale) = other.locale {
            self.locale = *locale;
        }
        if let Some(ref ms) = other.theme_poll_interval_ms {
            self.theme_poll_interval_ms = *ms;
        }
        if let Some(ref dir) = other.export_dir {
            self.export_dir.clone_from(dir);
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub api_base_url: Option<Option<String>>,
    pub request_timeout_secs: Option<Option<u64>>,
    pub locale: Option<Option<Locale>>,
    pub theme_poll_interval_ms: Option<Option<u64>>,
    pub export_dir: Option<Option<String>>,
}

impl SettingsUpdate {
    /// Build a single-field update from a `key value` pair as typed on the
    /// command line. The value `default` resets the field.
    pub fn from_key_value(key: &str, value: &str) -> Result<Self, SettingsError> {
        let value = value.trim();
        let reset = value.eq_ignore_ascii_case("default");
        let number = |key: &str| -> Result<Option<u64>, SettingsError> {
            if reset {
                return Ok(None);
            }
            value
                .parse::<u64>()
                .map(Some)
                .map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })
        };

        let mut update = Self::default();
        match key {
            "api_base_url" => {
                update.api_base_url = Some((!reset).then(|| value.to_string()));
            }
            "request_timeout_secs" => update.request_timeout_secs = Some(number(key)?),
            "locale" => {
                let locale = if reset {
                    None
                } else {
                    Some(
                        Locale::parse(value).ok_or_else(|| SettingsError::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                        })?,
                    )
                };
                update.locale = Some(locale);
            }
            "theme_poll_interval_ms" => update.theme_poll_interval_ms = Some(number(key)?),
            "export_dir" => {
                update.export_dir = Some((!reset).then(|| value.to_string()));
            }
            other => return Err(SettingsError::UnknownKey(other.to_string())),
        }
        Ok(update)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("API base URL must start with http:// or https:// and name a host, got {0:?}")]
    InvalidApiBaseUrl(String),

    #[error("Request timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Theme poll interval must be between 100 and 60000 ms, got {0}")]
    InvalidPollInterval(u64),

    #[error("Export directory cannot be empty")]
    EmptyExportDir,

    #[error("Unknown setting {0:?} (expected one of: {keys})", keys = SETTINGS_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

fn is_http_url(raw: &str) -> bool {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    matches!(scheme, "http" | "https") && !host.is_empty() && !host.contains(char::is_whitespace)
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(ref url) = settings.api_base_url {
        if !is_http_url(url) {
            return Err(SettingsError::InvalidApiBaseUrl(url.clone()));
        }
    }

    if let Some(secs) = settings.request_timeout_secs {
        if !(1..=300).contains(&secs) {
            return Err(SettingsError::InvalidTimeout(secs));
        }
    }

    if let Some(ms) = settings.theme_poll_interval_ms {
        if !(100..=60_000).contains(&ms) {
            return Err(SettingsError::InvalidPollInterval(ms));
        }
    }

    if settings
        .export_dir
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyExportDir);
    }

    Ok(())
}
