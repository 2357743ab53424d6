//! CLI-specific error types and mappings.
//!
//! Handlers return `anyhow::Result`; `main` looks for a [`CliError`] in the
//! chain to pick the process exit code.

use oncodash_core::{DashboardError, PathError, PreferenceStoreError, SettingsError, ValidationError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or form validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The prediction service failed or reported itself unhealthy.
    #[error("{0}")]
    Service(String),

    /// A report could not be produced or written.
    #[error("Export failed: {0}")]
    Export(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Arguments(_) => 2,
            CliError::Service(_) => 69, // EX_UNAVAILABLE
            CliError::Export(_) => 73,  // EX_CANTCREAT
            CliError::Io(_) => 74,      // EX_IOERR
            CliError::Config(_) => 78,  // EX_CONFIG
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Arguments(err.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<PreferenceStoreError> for CliError {
    fn from(err: PreferenceStoreError) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<DashboardError> for CliError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Busy | DashboardError::Service(_) => CliError::Service(err.to_string()),
            DashboardError::NoPrediction
            | DashboardError::Export(_)
            | DashboardError::Delivery(_) => CliError::Export(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

/// Exit code for an error returned from a handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
