//! `oncodash` command-line dashboard.
//!
//! The binary in `main.rs` parses arguments, calls [`bootstrap`] and hands
//! the resulting [`CliContext`] to a handler. Everything that touches the
//! operating system (settings and preference files, report downloads, the
//! OS color scheme) lives in [`adapters`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

// Used by the integration tests only
#[cfg(test)]
use async_trait as _;

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, ExportFormat, HistoryCommand, PredictArgs, ThemeCommand};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
