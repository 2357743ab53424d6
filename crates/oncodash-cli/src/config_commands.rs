//! Configuration management subcommands.

use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Show all current settings and where they are stored
    Show,
    /// Change one setting; the value `default` resets it
    Set {
        /// Setting name (api_base_url, request_timeout_secs, locale,
        /// theme_poll_interval_ms, export_dir)
        key: String,
        /// New value
        value: String,
    },
}
