//! Account acquisition, chain switch, balance and event subscription.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, WalletError};
use crate::models::{Account, Balance};
use crate::policy::Retry;
use crate::provider::{MintContract, WalletProvider};
use crate::stage::Stage;

use super::{SessionState, WizardSession};

impl WizardSession {
    /// Adopt an already-authorized account without prompting.
    ///
    /// Returns `Ok(None)` when there is no provider, no authorized account,
    /// or more than one authorized account to choose from.
    #[instrument(skip(self))]
    pub async fn silent_connect(&self) -> Result<Option<Account>> {
        let Some(provider) = self.provider.clone() else {
            debug!("No wallet provider, skipping silent connect");
            return Ok(None);
        };

        let accounts = self
            .policy
            .call("eth_accounts", Retry::Transient, || {
                provider.authorized_accounts()
            })
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to query authorized accounts"))?;

        let account = match accounts.as_slice() {
            [] => {
                debug!("No authorized accounts");
                return Ok(None);
            }
            [only] => only.clone(),
            many => {
                warn!(
                    count = many.len(),
                    "Several authorized accounts, waiting for an explicit connect"
                );
                return Ok(None);
            }
        };

        self.adopt_account(provider.as_ref(), account.clone())
            .await?;
        Ok(Some(account))
    }

    /// Prompt the wallet for account access and adopt the first account.
    ///
    /// # Errors
    /// - [`WalletError::ProviderAbsent`] when no wallet is available.
    /// - [`WalletError::Declined`] when the user rejects the prompt.
    /// - [`WalletError::NoAccounts`] when the wallet grants no account.
    #[instrument(skip(self))]
    pub async fn request_connect(&self) -> Result<Account> {
        let provider = self.detect_wallet()?;

        {
            let mut inner = self.lock();
            if inner.state == SessionState::Disconnected {
                inner.state = SessionState::Connecting;
            }
        }

        let requested = self
            .policy
            .call("eth_requestAccounts", Retry::Transient, || {
                provider.request_accounts()
            })
            .await
            .and_then(|accounts| accounts.into_iter().next().ok_or(WalletError::NoAccounts));

        let account = match requested {
            Ok(account) => account,
            Err(e) => {
                warn!(error = %e, "Wallet connection failed");
                self.revert_connecting();
                return Err(e);
            }
        };

        self.adopt_account(provider.as_ref(), account.clone())
            .await?;
        Ok(account)
    }

    fn revert_connecting(&self) {
        let mut inner = self.lock();
        if inner.state == SessionState::Connecting {
            inner.state = if inner.account.is_some() {
                SessionState::Connected
            } else {
                SessionState::Disconnected
            };
        }
    }

    /// Record `account`, switch chains, then refresh dependent state and
    /// advance past the wallet stage.
    async fn adopt_account(&self, provider: &dyn WalletProvider, account: Account) -> Result<()> {
        let changed = {
            let mut inner = self.lock();
            let changed = inner.account.as_ref() != Some(&account);
            inner.account = Some(account.clone());
            if matches!(
                inner.state,
                SessionState::Disconnected | SessionState::Connecting
            ) {
                inner.state = SessionState::Connected;
            }
            if changed {
                // The binding signs with the previous account.
                inner.contract = None;
            }
            changed
        };
        info!(account = %account.short(), changed, "Wallet account adopted");

        self.policy
            .call("wallet_switchEthereumChain", Retry::Transient, || {
                provider.switch_chain(self.chain_id)
            })
            .await
            .inspect_err(|e| warn!(chain_id = self.chain_id, error = %e, "Network switch failed"))?;

        if let Err(e) = self.refresh_balance().await {
            warn!(error = %e, "Balance refresh failed");
        }
        if let Err(e) = self.subscribe_mint_event().await {
            warn!(error = %e, "Mint event subscription failed");
        }

        if self.lock().stepper.advance_from(&Stage::Wallet) {
            info!("Wallet connected, moving to funding");
        }
        Ok(())
    }

    /// Query and format the balance of the connected account.
    ///
    /// Without an account the balance is left unchanged and `Ok(None)` is
    /// returned.
    #[instrument(skip(self))]
    pub async fn refresh_balance(&self) -> Result<Option<Balance>> {
        let Some(account) = self.account() else {
            debug!("No account connected, balance unchanged");
            return Ok(None);
        };
        let provider = self.detect_wallet()?;

        let wei = self
            .policy
            .call("eth_getBalance", Retry::Transient, || {
                provider.balance(&account)
            })
            .await?;

        let balance = Balance::from_wei(wei, self.balance_chars, &self.currency_symbol);
        debug!(balance = %balance, "Balance refreshed");
        self.lock().balance = balance.clone();
        Ok(Some(balance))
    }

    /// Bind the contract with the current signer and listen for mint events.
    ///
    /// Any previous subscription is released, and events it delivered but
    /// nobody consumed are discarded, before the new one is registered.
    #[instrument(skip(self))]
    pub async fn subscribe_mint_event(&self) -> Result<()> {
        let provider = self.detect_wallet()?;
        let account = self.account().ok_or(WalletError::NotConnected)?;
        let contract = self.bind_contract(provider.as_ref(), &account)?;

        let previous = self.lock().subscription.take();
        if let Some(previous) = previous {
            previous.unsubscribe();
            debug!("Released previous mint event subscription");
        }
        self.discard_pending_events();

        let subscription = self
            .policy
            .call("subscribe_minted", Retry::Transient, || {
                contract.subscribe_minted(self.events_tx.clone())
            })
            .await?;

        self.lock().subscription = Some(subscription);
        debug!(contract = %self.contract_spec.address, "Subscribed to mint events");
        Ok(())
    }

    /// Cached contract binding for the current signer, binding on first use.
    pub(super) fn bind_contract(
        &self,
        provider: &dyn WalletProvider,
        account: &Account,
    ) -> Result<Arc<dyn MintContract>> {
        if let Some(contract) = self.lock().contract.clone() {
            return Ok(contract);
        }
        let contract = provider.bind_contract(&self.contract_spec, account)?;
        self.lock().contract = Some(contract.clone());
        Ok(contract)
    }
}
