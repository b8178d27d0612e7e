//! Mint submission and mint-event handling.

use std::sync::Mutex;

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, WalletError};
use crate::models::{Account, MintEvent, MintResult, TxHash, TxReceipt};
use crate::policy::Retry;
use crate::stage::Stage;

use super::{SessionInner, SessionState, WizardSession};

/// What a confirmed mint produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintOutcome {
    pub tx: TxHash,
    pub receipt: TxReceipt,
    /// `None` when the mint event did not arrive within the event timeout.
    pub mint_result: Option<MintResult>,
}

/// Holds the mining flag for the duration of one mint.
///
/// Dropping the guard without [`MiningGuard::confirm`] (error or cancelled
/// future) clears the flag and returns the session to `Connected`.
struct MiningGuard<'a> {
    inner: &'a Mutex<SessionInner>,
    confirmed: bool,
}

impl<'a> MiningGuard<'a> {
    fn acquire(session: &'a WizardSession) -> Result<Self> {
        let mut inner = session.lock();
        if inner.mining {
            return Err(WalletError::MintInFlight);
        }
        let stage = *inner.stepper.current();
        if stage != Stage::Mint || inner.state == SessionState::Minted {
            return Err(WalletError::MintUnavailable(stage));
        }
        inner.mining = true;
        inner.state = SessionState::Minting;
        Ok(Self {
            inner: &session.inner,
            confirmed: false,
        })
    }

    fn confirm(mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.mining = false;
        inner.state = SessionState::Minted;
        self.confirmed = true;
    }
}

impl Drop for MiningGuard<'_> {
    fn drop(&mut self) {
        if self.confirmed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.mining = false;
        inner.state = if inner.account.is_some() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        };
    }
}

impl WizardSession {
    /// Submit the mint transaction and wait for it to be mined.
    ///
    /// On confirmation the stepper advances past the mint stage and the
    /// session waits up to the event timeout for the mint event carrying the
    /// token id.
    ///
    /// # Errors
    /// - [`WalletError::NotConnected`] without an account.
    /// - [`WalletError::MintInFlight`] while another mint is pending.
    /// - [`WalletError::MintUnavailable`] off the mint stage or after a
    ///   confirmed mint.
    /// - [`WalletError::Rejected`] when the transaction is declined or reverts.
    /// - [`WalletError::Timeout`] when confirmation takes too long.
    #[instrument(skip(self))]
    pub async fn mint(&self) -> Result<MintOutcome> {
        let outcome = self.mint_once().await;
        match &outcome {
            Ok(_) => self.policy.metrics().record_mint("confirmed"),
            Err(e) => {
                warn!(error = %e, "Mint failed");
                self.policy.metrics().record_mint("failed");
            }
        }
        outcome
    }

    async fn mint_once(&self) -> Result<MintOutcome> {
        let provider = self.detect_wallet()?;
        let account = self.account().ok_or(WalletError::NotConnected)?;
        let guard = MiningGuard::acquire(self)?;

        let contract = self.bind_contract(provider.as_ref(), &account)?;
        if !self.has_subscription()
            && let Err(e) = self.subscribe_mint_event().await
        {
            warn!(error = %e, "Minting without a mint event subscription");
        }

        let tx = self
            .policy
            .call("mint", Retry::Never, || contract.mint())
            .await?;
        info!(tx = %tx, "Mint transaction submitted, mining");

        let receipt = self
            .policy
            .confirm("wait_confirmed", || contract.wait_confirmed(&tx))
            .await?;
        guard.confirm();

        if self.lock().stepper.advance_from(&Stage::Mint) {
            info!(
                tx = %tx,
                block = ?receipt.block_number,
                explorer = %crate::links::explorer_tx_url(&self.links, &tx),
                "Mint confirmed"
            );
        }

        let mint_result = self.await_mint_event(&account).await;
        Ok(MintOutcome {
            tx,
            receipt,
            mint_result,
        })
    }

    async fn await_mint_event(&self, account: &Account) -> Option<MintResult> {
        let mut events = self.events_rx.lock().await;
        let wait = async {
            while let Some(event) = events.recv().await {
                if let Some(result) = self.record_event(event, account) {
                    return Some(result);
                }
            }
            None
        };

        match tokio::time::timeout(self.policy.event_timeout(), wait).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    after = ?self.policy.event_timeout(),
                    "Mint event not observed, token id unknown"
                );
                None
            }
        }
    }

    /// Store the token id when `event` belongs to `account`.
    fn record_event(&self, event: MintEvent, account: &Account) -> Option<MintResult> {
        if event.from != *account {
            debug!(from = %event.from.short(), "Ignoring mint event for another account");
            return None;
        }
        let result = MintResult {
            token_id: event.token_id,
        };
        self.lock().mint_result = Some(result);
        info!(token_id = %event.token_id, "Mint event received");
        Some(result)
    }

    /// Drop undelivered events. Skipped while a mint is waiting on the
    /// channel.
    pub(super) fn discard_pending_events(&self) {
        let Ok(mut events) = self.events_rx.try_lock() else {
            return;
        };
        let mut discarded = 0usize;
        while events.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "Discarded stale mint events");
        }
    }

    /// Apply mint events already delivered by the subscription, without
    /// waiting. Returns the current mint result.
    pub fn poll_events(&self) -> Option<MintResult> {
        let Some(account) = self.account() else {
            return self.mint_result();
        };
        if let Ok(mut events) = self.events_rx.try_lock() {
            while let Ok(event) = events.try_recv() {
                self.record_event(event, &account);
            }
        }
        self.mint_result()
    }
}
