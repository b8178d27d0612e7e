//! Balance command implementation.

use anyhow::{Context, Result};
use mintwizard_client::WalletError;
use mintwizard_config::Config;

use crate::cancellation::CancellationToken;
use crate::commands::build_session;
use crate::progress::Spinner;

pub async fn run(
    config: &Config,
    quiet: bool,
    record_metrics: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let session = build_session(config, record_metrics)?;
    session.detect_wallet()?;

    let spinner = Spinner::new(!quiet, "Reading balance");
    let account = cancel
        .until_cancelled(session.silent_connect())
        .await
        .context("Failed to read authorized accounts")?
        .ok_or(WalletError::NotConnected)
        .context("No single authorized account; connect with `mintwizard run` first")?;

    let balance = cancel
        .until_cancelled(session.refresh_balance())
        .await
        .context("Failed to read balance")?
        .ok_or(WalletError::NotConnected)?;
    drop(spinner);

    println!("{}  {}", account, balance);
    Ok(())
}
