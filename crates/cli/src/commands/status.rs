//! Status command implementation.

use anyhow::{Context, Result};
use mintwizard_client::SessionSnapshot;
use mintwizard_config::Config;
use serde_json::json;

use crate::cancellation::CancellationToken;
use crate::commands::{build_session, stage_line};
use crate::progress::Spinner;

pub async fn run(
    config: &Config,
    as_json: bool,
    quiet: bool,
    record_metrics: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let session = build_session(config, record_metrics)?;

    if session.has_wallet() {
        let _spinner = Spinner::new(!quiet, "Checking authorized accounts");
        cancel
            .until_cancelled(session.silent_connect())
            .await
            .context("Failed to read wallet status")?;
    }

    let snapshot = session.snapshot();
    if as_json {
        let value = snapshot_json(&snapshot, session.has_wallet(), session.chain_id());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", snapshot_text(&snapshot, session.has_wallet()));
    }
    Ok(())
}

fn snapshot_json(snapshot: &SessionSnapshot, has_wallet: bool, chain_id: u64) -> serde_json::Value {
    json!({
        "wallet_detected": has_wallet,
        "chain_id": chain_id,
        "stage": snapshot.stage.as_str(),
        "stage_index": snapshot.stage_index,
        "stage_count": snapshot.stage_count,
        "progress_percent": snapshot.progress_percent,
        "state": snapshot.state.as_str(),
        "account": snapshot.account.as_ref().map(|a| a.as_str()),
        "balance": snapshot.balance.display(),
        "token_id": snapshot.mint_result.map(|r| r.token_id.0),
        "mining": snapshot.mining,
    })
}

fn snapshot_text(snapshot: &SessionSnapshot, has_wallet: bool) -> String {
    let account = snapshot
        .account
        .as_ref()
        .map(|a| a.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let wallet = if has_wallet { "configured" } else { "not detected" };

    format!(
        "{}\nWallet:  {}\nState:   {}\nAccount: {}\nBalance: {}\n",
        stage_line(snapshot),
        wallet,
        snapshot.state.as_str(),
        account,
        snapshot.balance.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_for_new_session() {
        let session = build_session(&Config::default(), false).unwrap();
        let value = snapshot_json(&session.snapshot(), false, 4);

        assert_eq!(value["stage"], "wallet");
        assert_eq!(value["state"], "disconnected");
        assert_eq!(value["balance"], "0.000 ETH");
        assert!(value["account"].is_null());
        assert!(value["token_id"].is_null());
    }

    #[test]
    fn test_snapshot_text_marks_missing_account() {
        let session = build_session(&Config::default(), false).unwrap();
        let text = snapshot_text(&session.snapshot(), false);

        assert!(text.contains("Wallet:  not detected"));
        assert!(text.contains("Account: -"));
    }
}
