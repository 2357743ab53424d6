//! CLI entry point.
//!
//! Loads `.env`, parses arguments, initializes logging, then routes each
//! command to its handler. Failures print one line to stderr and exit with
//! the code chosen by `CliError::exit_code`.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use oncodash_cli::adapters::SettingsFile;
use oncodash_cli::error::exit_code_for;
use oncodash_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

/// Logs go to stderr so report paths and tables on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings_file = SettingsFile::locate()?;
    let context = || bootstrap(&config, &settings_file);

    match command {
        // Runs without bootstrap so invalid stored settings can be fixed.
        Commands::Config { command } => handlers::config::execute(&settings_file, command),
        Commands::Predict(args) => handlers::predict::execute(&context()?, args)
            .await
            .map(|_| ()),
        Commands::History { command } => handlers::history::execute(&context()?, command).await,
        Commands::Theme { command } => handlers::theme::execute(&context()?, command).await,
        Commands::Status => handlers::status::execute(&context()?).await,
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads ONCODASH_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}
