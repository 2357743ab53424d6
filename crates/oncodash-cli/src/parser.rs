//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use oncodash_core::Locale;

use crate::commands::Commands;

/// Command-line interface for the breast-cancer risk dashboard.
///
/// Global options override `settings.json` and the `ONCODASH_*`
/// environment variables for a single invocation.
#[derive(Parser)]
#[command(name = "oncodash")]
#[command(about = "Breast cancer risk prediction dashboard")]
#[command(version)]
pub struct Cli {
    /// Prediction service base URL
    #[arg(long = "api-url", global = true, env = "ONCODASH_API_URL")]
    pub api_url: Option<String>,

    /// Interface language (en, fr)
    #[arg(long = "lang", global = true, env = "ONCODASH_LOCALE")]
    pub lang: Option<Locale>,

    /// Ignore the OS color scheme and assume a light system theme
    #[arg(long = "no-os-theme", global = true)]
    pub no_os_theme: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "oncodash",
            "--verbose",
            "--api-url",
            "http://predict.local:9000",
            "--lang",
            "fr",
            "status",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://predict.local:9000"));
        assert_eq!(cli.lang, Some(Locale::Fr));
        assert!(matches!(cli.command, Some(Commands::Status)));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["oncodash", "history", "--lang", "en", "--no-os-theme"]);
        assert_eq!(cli.lang, Some(Locale::En));
        assert!(cli.no_os_theme);
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["oncodash", "--lang", "de", "status"]).is_err());
    }
}
