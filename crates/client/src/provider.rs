//! Wallet and contract capabilities injected into the session.
//!
//! Responsibilities:
//! - Define the object-safe async surface the session drives.
//! - Own event subscriptions as handles that release on drop.
//!
//! Does NOT handle:
//! - Timeouts or retries (see [`crate::policy`]).
//! - Transport details (see [`crate::rpc`] and [`crate::testing`]).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use mintwizard_config::ContractConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::{Account, MintEvent, TxHash, TxReceipt, Wei};

/// Channel end that receives decoded mint events.
pub type MintEventSink = mpsc::UnboundedSender<MintEvent>;

/// Contract location and the signatures used to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    pub address: String,
    pub mint_function: String,
    pub mint_event: String,
}

impl From<&ContractConfig> for ContractSpec {
    fn from(config: &ContractConfig) -> Self {
        Self {
            address: config.address.clone(),
            mint_function: config.mint_function.clone(),
            mint_event: config.mint_event.clone(),
        }
    }
}

/// A wallet able to expose accounts, switch chains and sign transactions.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts already authorized for this client, without prompting.
    async fn authorized_accounts(&self) -> Result<Vec<Account>>;

    /// Prompt the user for account access.
    async fn request_accounts(&self) -> Result<Vec<Account>>;

    /// Ask the wallet to switch to `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> Result<()>;

    /// Native balance of `account`.
    async fn balance(&self, account: &Account) -> Result<Wei>;

    /// Bind the mint contract with `signer` as the transaction sender.
    fn bind_contract(&self, spec: &ContractSpec, signer: &Account)
    -> Result<Arc<dyn MintContract>>;
}

/// A contract binding able to mint and report mint events.
#[async_trait]
pub trait MintContract: Send + Sync {
    /// Submit the mint transaction.
    async fn mint(&self) -> Result<TxHash>;

    /// Wait until `tx` is mined. A reverted transaction is `Rejected`.
    async fn wait_confirmed(&self, tx: &TxHash) -> Result<TxReceipt>;

    /// Deliver every future mint event to `sink` until the returned
    /// subscription is released.
    async fn subscribe_minted(&self, sink: MintEventSink) -> Result<Subscription>;
}

/// Owned registration of an event listener.
///
/// The listener is released exactly once, either by [`Subscription::unsubscribe`]
/// or when the handle is dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Subscription that runs `release` when it ends.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Subscription backed by a background task, aborted on release.
    pub fn from_task(handle: JoinHandle<()>) -> Self {
        Self::new(move || handle.abort())
    }

    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
