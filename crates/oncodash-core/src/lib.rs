//! Core domain types, ports and services for oncodash.
//!
//! This crate owns everything that does not touch a concrete transport:
//! the patient/prediction domain, the theme-resolution state machine, the
//! dashboard session state, localization tables and settings. Adapters
//! (HTTP client, CLI, report encoders) depend on it and never the other way
//! around.

#![deny(unsafe_code)]

pub mod domain;
pub mod i18n;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CurrentPrediction, ExportArtifact, HistoryEntry, PatientInput, PatientRecord, PatientSummary,
    PredictionResult, ReportFormat, ResolvedTheme, RiskLevel, SystemColorSignal, ThemePreference,
    ValidationError,
};
pub use i18n::{Locale, Translator};
pub use paths::{PathError, data_root, ensure_directory, preferences_path, settings_path};
pub use ports::{
    ColorSchemeSource, DownloadSink, GENERIC_PREDICTION_ERROR, ManualColorScheme,
    MemoryPreferenceStore, PredictionPortError, PredictionPortResult, PredictionServicePort,
    PreferenceStore, PreferenceStoreError, ReportEncodeError, ReportEncoder, ServiceHealth,
    SignalCallback, SinkError, Subscription, ThemeObserver,
};
pub use services::{
    CLEAR_HISTORY_ERROR, Dashboard, DashboardError, Dropdown, ObserverId, THEME_PREFERENCE_KEY,
    ThemeResolver,
};
pub use settings::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_THEME_POLL_INTERVAL_MS,
    SETTINGS_KEYS, Settings, SettingsError, SettingsUpdate, validate_settings,
};
