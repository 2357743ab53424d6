//! Theme command handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use oncodash_core::{ResolvedTheme, ThemeObserver};

use crate::bootstrap::CliContext;
use crate::commands::ThemeCommand;
use crate::error::CliError;
use crate::presentation::{print_lines, theme_label, theme_lines};

/// Execute the theme command.
pub async fn execute(ctx: &CliContext, command: ThemeCommand) -> Result<()> {
    match command {
        ThemeCommand::Show => {
            show(ctx);
            Ok(())
        }
        ThemeCommand::Set { preference } => set(ctx, &preference),
        ThemeCommand::Watch => watch(ctx).await,
    }
}

fn show(ctx: &CliContext) {
    let theme = ctx.theme();
    theme.attach(ctx.color_scheme());
    print_lines(&theme_lines(
        theme.preference(),
        theme.system_signal(),
        theme.resolved(),
        ctx.translator(),
    ));
    theme.detach();
}

fn set(ctx: &CliContext, raw: &str) -> Result<()> {
    if !ctx.theme().set_preference_str(raw) {
        return Err(CliError::Arguments(format!(
            "unknown theme preference {raw:?} (expected light, dark or system)"
        ))
        .into());
    }
    show(ctx);
    Ok(())
}

/// Print the resolved theme on every change until Ctrl-C.
async fn watch(ctx: &CliContext) -> Result<()> {
    let theme = ctx.theme();
    let tr = ctx.translator();

    theme.attach(ctx.color_scheme());
    println!("{}", theme_label(theme.resolved(), tr));

    let observer: Arc<dyn ThemeObserver> =
        Arc::new(move |resolved: ResolvedTheme| println!("{}", theme_label(resolved, tr)));
    let id = theme.subscribe(observer);

    eprintln!("Watching the system color scheme (Ctrl-C to stop)...");
    let stopped = tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C");

    theme.unsubscribe(id);
    theme.detach();
    stopped
}
