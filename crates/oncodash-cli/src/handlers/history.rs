//! History command handler.

use anyhow::Result;
use oncodash_core::CLEAR_HISTORY_ERROR;
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::commands::HistoryCommand;
use crate::error::CliError;
use crate::presentation::{history_lines, print_lines};
use crate::utils::input::prompt_confirmation;

/// Execute the history command. Without a subcommand the history is shown.
pub async fn execute(ctx: &CliContext, command: Option<HistoryCommand>) -> Result<()> {
    match command.unwrap_or(HistoryCommand::Show) {
        HistoryCommand::Show => show(ctx).await,
        HistoryCommand::Clear { yes } => clear(ctx, yes).await,
    }
}

async fn show(ctx: &CliContext) -> Result<()> {
    let mut dashboard = ctx.dashboard();
    dashboard.refresh_history().await;
    print_lines(&history_lines(dashboard.history(), ctx.translator()));
    Ok(())
}

/// Clear the service-side history, asking first unless `yes` is set.
///
/// The list printed afterwards is whatever the service reports, even when
/// the delete failed.
async fn clear(ctx: &CliContext, yes: bool) -> Result<()> {
    let tr = ctx.translator();
    let prompt = tr.t("clearHistoryConfirm");
    let mut dashboard = ctx.dashboard();

    let outcome = dashboard
        .clear_history(|| {
            yes || prompt_confirmation(&prompt).unwrap_or_else(|e| {
                warn!(error = %e, "Could not read confirmation");
                false
            })
        })
        .await;

    match outcome {
        Ok(false) => {
            println!("History left unchanged.");
            Ok(())
        }
        Ok(true) => {
            println!("✓ History cleared.");
            print_lines(&history_lines(dashboard.history(), tr));
            Ok(())
        }
        Err(_) => {
            print_lines(&history_lines(dashboard.history(), tr));
            let message = dashboard.error().unwrap_or(CLEAR_HISTORY_ERROR);
            Err(CliError::Service(message.to_string()).into())
        }
    }
}
