//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Settings from `settings.json`, overridden by flags and environment
//! - Prediction service client (via oncodash-api)
//! - Theme resolver over the JSON preference file and the OS color scheme
//! - Report exporter (via oncodash-report)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use oncodash_api::{ApiClientConfig, DefaultPredictionClient};
use oncodash_core::{
    ColorSchemeSource, Dashboard, Locale, ManualColorScheme, PredictionServicePort,
    PreferenceStore, Settings, SettingsUpdate, ThemeResolver, Translator, preferences_path,
    validate_settings,
};
use oncodash_report::ReportExporter;
use tracing::debug;

use crate::adapters::{DarkLightColorScheme, FilePreferenceStore, SettingsFile};
use crate::error::CliError;
use crate::parser::Cli;

/// Per-invocation overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Service base URL (`--api-url` / `ONCODASH_API_URL`).
    pub api_url: Option<String>,
    /// Interface language (`--lang` / `ONCODASH_LOCALE`).
    pub locale: Option<Locale>,
    /// Follow the OS color scheme; `false` assumes light.
    pub detect_os_theme: bool,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            locale: cli.lang,
            detect_os_theme: !cli.no_os_theme,
        }
    }

    /// Apply the overrides on top of stored settings.
    pub fn apply(&self, settings: &mut Settings) {
        settings.merge(&SettingsUpdate {
            api_base_url: self.api_url.clone().map(Some),
            locale: self.locale.map(Some),
            ..Default::default()
        });
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    settings: Settings,
    translator: Translator,
    service: Arc<dyn PredictionServicePort>,
    theme: Arc<ThemeResolver>,
    color_scheme: Arc<dyn ColorSchemeSource>,
    exporter: ReportExporter,
}

impl CliContext {
    /// Assemble a context from already-built parts.
    pub fn from_parts(
        settings: Settings,
        service: Arc<dyn PredictionServicePort>,
        preferences: Arc<dyn PreferenceStore>,
        color_scheme: Arc<dyn ColorSchemeSource>,
        exporter: ReportExporter,
    ) -> Self {
        Self {
            translator: Translator::new(settings.effective_locale()),
            theme: Arc::new(ThemeResolver::load(preferences)),
            settings,
            service,
            color_scheme,
            exporter,
        }
    }

    /// Effective settings for this invocation.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn translator(&self) -> Translator {
        self.translator
    }

    pub fn service(&self) -> &Arc<dyn PredictionServicePort> {
        &self.service
    }

    /// A fresh dashboard session over the prediction service.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(Arc::clone(&self.service))
    }

    pub fn theme(&self) -> &Arc<ThemeResolver> {
        &self.theme
    }

    pub fn color_scheme(&self) -> &dyn ColorSchemeSource {
        self.color_scheme.as_ref()
    }

    pub fn exporter(&self) -> &ReportExporter {
        &self.exporter
    }

    /// Where a report goes: `--out`, then `export_dir`, then the working directory.
    pub fn export_dir(&self, out: Option<PathBuf>) -> PathBuf {
        out.or_else(|| self.settings.export_dir.as_ref().map(PathBuf::from))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Bootstrap the CLI application.
///
/// Reads `settings.json`, applies per-invocation overrides, validates the
/// result and builds every adapter. Must run inside the tokio runtime when
/// OS theme detection is enabled.
pub fn bootstrap(config: &CliConfig, settings_file: &SettingsFile) -> Result<CliContext> {
    let mut settings = settings_file.load()?;
    config.apply(&mut settings);
    validate_settings(&settings).map_err(CliError::from)?;

    let api_config = ApiClientConfig::new()
        .with_base_url(settings.effective_api_base_url())
        .with_timeout(Duration::from_secs(settings.effective_request_timeout_secs()));
    let client = DefaultPredictionClient::new(&api_config)
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!(base_url = api_config.base_url(), "Prediction client ready");

    let preferences = Arc::new(FilePreferenceStore::new(
        preferences_path().map_err(CliError::from)?,
    ));

    let color_scheme: Arc<dyn ColorSchemeSource> = if config.detect_os_theme {
        let interval = Duration::from_millis(settings.effective_theme_poll_interval_ms());
        Arc::new(DarkLightColorScheme::new(interval)?)
    } else {
        Arc::new(ManualColorScheme::default())
    };

    Ok(CliContext::from_parts(
        settings,
        Arc::new(client),
        preferences,
        color_scheme,
        ReportExporter::new(),
    ))
}
