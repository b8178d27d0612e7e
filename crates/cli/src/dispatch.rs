//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//! - Pass the shared configuration and cancellation token along.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;
use mintwizard_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;

pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let record_metrics = cli.metrics_bind.is_some();

    match cli.command {
        Commands::Run { yes } => {
            commands::run::run(&config, yes, cli.quiet, record_metrics, cancel_token).await?;
        }
        Commands::Status { json } => {
            commands::status::run(&config, json, cli.quiet, record_metrics, cancel_token).await?;
        }
        Commands::Balance => {
            commands::balance::run(&config, cli.quiet, record_metrics, cancel_token).await?;
        }
        Commands::Links { token_id, tx } => {
            commands::links::run(&config, token_id, tx.as_deref())?;
        }
    }
    Ok(())
}
