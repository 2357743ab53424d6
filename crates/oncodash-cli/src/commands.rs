//! Main commands enum and primary subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use oncodash_core::{PatientInput, ReportFormat};

use crate::config_commands::ConfigCommand;

/// Available commands for the dashboard.
#[derive(Subcommand)]
pub enum Commands {
    /// Submit patient details and show the predicted risk
    Predict(PredictArgs),

    /// Show or clear the recent prediction history
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },

    /// Show or change the light/dark theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },

    /// Check prediction service health
    Status,

    /// View or change settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Patient form fields. Defaults match the initial dashboard form.
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Age in years (20-90)
    #[arg(long, default_value_t = 50)]
    pub age: u32,

    /// Height in centimetres (140-200)
    #[arg(long, default_value_t = 165.0)]
    pub height: f64,

    /// Weight in kilograms (40-150)
    #[arg(long, default_value_t = 70.0)]
    pub weight: f64,

    /// Patient has diabetes
    #[arg(long)]
    pub diabetes: bool,

    /// Patient has high blood pressure
    #[arg(long = "high-bp")]
    pub high_bp: bool,

    /// Family history of cancer
    #[arg(long = "family-history")]
    pub family_history: bool,

    /// Age at first menstruation (8-20)
    #[arg(long, default_value_t = 13)]
    pub menarche: u32,

    /// Export the prediction as a report
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Directory the report is written to (defaults to `export_dir`, then the working directory)
    #[arg(long, requires = "export")]
    pub out: Option<PathBuf>,
}

impl PredictArgs {
    pub fn to_input(&self) -> PatientInput {
        PatientInput {
            age: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            has_diabetes: self.diabetes,
            has_high_bp: self.high_bp,
            family_history: self.family_history,
            age_at_menarche: self.menarche,
        }
    }
}

/// Report formats offered by the export menu.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl From<ExportFormat> for ReportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => Self::Csv,
            ExportFormat::Pdf => Self::Pdf,
        }
    }
}

/// History subcommands. Without one, the history is shown.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommand {
    /// Show the recent predictions
    Show,
    /// Delete the prediction history on the service
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Theme subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ThemeCommand {
    /// Show the preference, the OS color scheme and the resolved theme
    Show,
    /// Store a new preference (light, dark or system)
    Set { preference: String },
    /// Print the resolved theme whenever it changes, until Ctrl-C
    Watch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_predict_defaults_match_form() {
        let cli = Cli::parse_from(["oncodash", "predict"]);
        let Some(Commands::Predict(args)) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.to_input(), PatientInput::default());
        assert_eq!(args.export, None);
    }

    #[test]
    fn test_predict_flags() {
        let cli = Cli::parse_from([
            "oncodash",
            "predict",
            "--age",
            "62",
            "--height",
            "158.5",
            "--weight",
            "81",
            "--diabetes",
            "--family-history",
            "--menarche",
            "11",
            "--export",
            "pdf",
            "--out",
            "/tmp/reports",
        ]);
        let Some(Commands::Predict(args)) = cli.command else {
            panic!("expected predict");
        };
        let input = args.to_input();
        assert_eq!(input.age, 62);
        assert!((input.height_cm - 158.5).abs() < f64::EPSILON);
        assert!(input.has_diabetes);
        assert!(!input.has_high_bp);
        assert!(input.family_history);
        assert_eq!(input.age_at_menarche, 11);
        assert_eq!(args.export.map(ReportFormat::from), Some(ReportFormat::Pdf));
        assert_eq!(args.out, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_out_requires_export() {
        assert!(Cli::try_parse_from(["oncodash", "predict", "--out", "/tmp"]).is_err());
    }

    #[test]
    fn test_history_subcommands() {
        let cli = Cli::parse_from(["oncodash", "history"]);
        assert!(matches!(cli.command, Some(Commands::History { command: None })));

        let cli = Cli::parse_from(["oncodash", "history", "clear", "--yes"]);
        assert!(matches!(
            cli.command,
            Some(Commands::History {
                command: Some(HistoryCommand::Clear { yes: true })
            })
        ));
    }

    #[test]
    fn test_theme_set_takes_raw_value() {
        let cli = Cli::parse_from(["oncodash", "theme", "set", "dark"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                command: ThemeCommand::Set { ref preference }
            }) if preference == "dark"
        ));
    }
}
