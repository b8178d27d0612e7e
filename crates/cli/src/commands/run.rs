//! Interactive wizard: connect, fund, mint.

use anyhow::{Context, Result};
use mintwizard_client::links::explorer_tx_url;
use mintwizard_client::models::format_ether;
use mintwizard_client::{
    Balance, MIN_GAS_BALANCE, Stage, WALLET_ACQUISITION, WalletError, WizardSession,
};
use mintwizard_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::{build_session, stage_line};
use crate::interactive::{FundingAction, Prompter};
use crate::progress::Spinner;

pub async fn run(
    config: &Config,
    assume_yes: bool,
    quiet: bool,
    record_metrics: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let session = build_session(config, record_metrics)?;
    if !session.has_wallet() {
        println!("{}", WALLET_ACQUISITION.message());
        return Err(WalletError::ProviderAbsent.into());
    }

    let prompter = Prompter::new(assume_yes);
    let wizard = Wizard {
        session: &session,
        config,
        prompter,
        quiet,
        cancel,
    };

    if !wizard.connect().await? {
        return Ok(());
    }
    if !wizard.fund().await? {
        return Ok(());
    }
    wizard.mint().await
}

struct Wizard<'a> {
    session: &'a WizardSession,
    config: &'a Config,
    prompter: Prompter,
    quiet: bool,
    cancel: &'a CancellationToken,
}

impl Wizard<'_> {
    fn print_stage(&self) {
        println!("\n{}", stage_line(&self.session.snapshot()));
    }

    /// Returns `false` when the user chose not to connect.
    async fn connect(&self) -> Result<bool> {
        self.print_stage();

        let adopted = {
            let _spinner = Spinner::new(!self.quiet, "Checking authorized accounts");
            self.cancel
                .until_cancelled(self.session.silent_connect())
                .await?
        };

        let account = match adopted {
            Some(account) => account,
            None => {
                if !self.prompter.confirm("Connect your wallet?")? {
                    println!("{}", not_connected_message());
                    return Ok(false);
                }
                let spinner = Spinner::new(!self.quiet, "Waiting for the wallet");
                let account = self
                    .cancel
                    .until_cancelled(self.session.request_connect())
                    .await
                    .context("Failed to connect wallet")?;
                spinner.finish();
                account
            }
        };

        println!("Connected {}", account.short());
        Ok(true)
    }

    /// Returns `false` when the user quit before minting.
    async fn fund(&self) -> Result<bool> {
        if self.session.current_stage() != Stage::Fund {
            return Ok(true);
        }
        self.print_stage();
        let symbol = &self.config.chain.currency_symbol;
        println!("{}", funding_advice(symbol));

        loop {
            let balance = self.session.balance();
            if let Some(warning) = low_balance_warning(&balance, symbol) {
                println!("{warning}");
            }
            match self.prompter.funding_action(balance.display())? {
                FundingAction::Continue => break,
                FundingAction::Refresh => {
                    let _spinner = Spinner::new(!self.quiet, "Reading balance");
                    self.cancel
                        .until_cancelled(self.session.refresh_balance())
                        .await
                        .context("Failed to refresh balance")?;
                }
                FundingAction::Quit => return Ok(false),
            }
        }

        self.session.continue_funding();
        Ok(true)
    }

    async fn mint(&self) -> Result<()> {
        self.print_stage();
        if !self.prompter.confirm("Mint your token now?")? {
            println!("Mint skipped.");
            return Ok(());
        }

        let spinner = Spinner::new(!self.quiet, "Waiting for the transaction");
        let outcome = self
            .cancel
            .until_cancelled(self.session.mint())
            .await
            .context("Mint failed")?;
        spinner.finish();

        info!(tx = %outcome.tx, block = ?outcome.receipt.block_number, "Mint confirmed");
        println!(
            "Transaction: {}",
            explorer_tx_url(&self.config.links, &outcome.tx)
        );

        self.print_stage();
        match (outcome.mint_result, self.session.marketplace_url()) {
            (Some(result), Some(url)) => {
                println!("Minted token #{}", result.token_id);
                println!("View it at {url}");
            }
            _ => println!("Minted. The token id was not reported yet; check the transaction."),
        }
        Ok(())
    }
}

/// Shown when the user declines to connect: where to get a wallet.
fn not_connected_message() -> String {
    format!("Not connected.\n{}", WALLET_ACQUISITION.message())
}

/// How to fund the account before minting.
fn funding_advice(symbol: &str) -> String {
    format!(
        "Buy {symbol} on an exchange and withdraw it to your wallet address. \
         Keep at least {} {symbol} for gas.",
        format_ether(MIN_GAS_BALANCE)
    )
}

/// Warning shown while `balance` is below [`MIN_GAS_BALANCE`].
fn low_balance_warning(balance: &Balance, symbol: &str) -> Option<String> {
    (!balance.covers_min_gas()).then(|| {
        format!(
            "Warning: balance {} is below the {} {symbol} needed for gas.",
            balance.display(),
            format_ether(MIN_GAS_BALANCE)
        )
    })
}
