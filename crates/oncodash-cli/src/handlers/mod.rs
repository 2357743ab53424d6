//! Command handlers that delegate to the core services.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call the dashboard session or theme resolver
//!   3. Format output for the terminal
//!
//! `config` is the exception: it works on the settings file directly so a
//! broken configuration can still be repaired.

pub mod config;
pub mod history;
pub mod predict;
pub mod status;
pub mod theme;
