//! Command implementations for mintwizard.

pub mod balance;
pub mod links;
pub mod run;
pub mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use mintwizard_client::{
    CallPolicy, JsonRpcWallet, MetricsCollector, SessionSnapshot, WalletProvider, WizardSession,
};
use mintwizard_config::Config;

/// Build a wizard session for `config`, wired to the JSON-RPC wallet when
/// an endpoint is configured.
pub(crate) fn build_session(config: &Config, record_metrics: bool) -> Result<Arc<WizardSession>> {
    let provider = JsonRpcWallet::from_config(config)
        .context("Failed to create JSON-RPC wallet")?
        .map(|wallet| Arc::new(wallet) as Arc<dyn WalletProvider>);

    let mut builder = WizardSession::builder()
        .from_config(config)
        .maybe_provider(provider);
    if record_metrics {
        builder = builder
            .policy(CallPolicy::from_config(&config.policy).with_metrics(MetricsCollector::new()));
    }

    Ok(Arc::new(builder.build()))
}

/// One-line stage header, e.g. `[2/4] Fund your wallet (33%)`.
pub(crate) fn stage_line(snapshot: &SessionSnapshot) -> String {
    format!(
        "[{}/{}] {} ({}%)",
        snapshot.stage_index + 1,
        snapshot.stage_count,
        snapshot.stage.title(),
        snapshot.progress_percent
    )
}
