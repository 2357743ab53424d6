//! Status command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Probe the prediction service and fail unless model and scaler are loaded.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let base_url = ctx.settings().effective_api_base_url();
    let health = ctx
        .service()
        .health()
        .await
        .map_err(|e| CliError::Service(e.to_string()))?;

    let loaded = |flag: bool| if flag { "loaded" } else { "missing" };
    println!("Service: {base_url}");
    println!("Status:  {}", health.status);
    println!("Model:   {}", loaded(health.model_loaded));
    println!("Scaler:  {}", loaded(health.scaler_loaded));

    if !health.is_healthy() {
        return Err(CliError::Service(format!("Prediction service at {base_url} is not ready")).into());
    }
    Ok(())
}
