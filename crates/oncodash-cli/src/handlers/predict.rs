//! Predict command handler.

use anyhow::Result;
use oncodash_core::PatientRecord;

use crate::adapters::DirectorySink;
use crate::bootstrap::CliContext;
use crate::commands::{ExportFormat, PredictArgs};
use crate::error::CliError;
use crate::presentation::{history_lines, prediction_lines, print_lines};

/// Execute the predict command.
///
/// Validates the form values, submits them once, prints the overview and
/// the refreshed history, then optionally exports a report. Returns the
/// exported path, if any.
pub async fn execute(ctx: &CliContext, args: PredictArgs) -> Result<Option<std::path::PathBuf>> {
    let patient = PatientRecord::new(args.to_input()).map_err(CliError::from)?;
    let tr = ctx.translator();
    let mut dashboard = ctx.dashboard();

    let outcome = dashboard
        .submit(patient)
        .await
        .map(|current| prediction_lines(current, tr));
    let overview = match outcome {
        Ok(lines) => lines,
        Err(e) => {
            let message = dashboard.error().map_or_else(|| e.to_string(), str::to_string);
            return Err(CliError::Service(message).into());
        }
    };

    print_lines(&overview);
    println!();
    print_lines(&history_lines(dashboard.history(), tr));

    let Some(format) = args.export else {
        return Ok(None);
    };

    let sink = DirectorySink::new(ctx.export_dir(args.out));
    let localize = tr.localizer();
    let path = dashboard
        .export(format.into(), ctx.exporter(), &localize, &sink)
        .map_err(CliError::from)?;

    let label = match format {
        ExportFormat::Csv => "downloadCSV",
        ExportFormat::Pdf => "downloadPDF",
    };
    println!();
    println!("✓ {}: {}", tr.t(label), path.display());
    Ok(Some(path))
}
