//! Scriptable wallet and contract doubles.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! ```ignore
//! use mintwizard_client::testing::{MockContract, MockWallet, test_account};
//!
//! let contract = Arc::new(MockContract::confirming(42));
//! let wallet = MockWallet::new()
//!     .with_authorized_accounts(vec![test_account()])
//!     .with_contract(contract.clone());
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{Result, WalletError};
use crate::models::{Account, MintEvent, TokenId, TxHash, TxReceipt, Wei};
use crate::provider::{
    ContractSpec, MintContract, MintEventSink, Subscription, WalletProvider,
};

/// Default account used by the doubles.
pub const TEST_ACCOUNT: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";

/// A second, distinct account.
pub const OTHER_ACCOUNT: &str = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";

/// Parse a known-good address.
///
/// # Panics
/// If `address` is malformed.
pub fn account(address: &str) -> Account {
    Account::parse(address).unwrap_or_else(|e| panic!("invalid test address: {e}"))
}

pub fn test_account() -> Account {
    account(TEST_ACCOUNT)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted failure of a mocked call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// User declined the prompt.
    Declined,
    /// Transaction rejected.
    Rejected,
    /// Transient transport error.
    Transport,
    /// Never resolve.
    Hang,
}

async fn scripted(failure: Option<Failure>) -> Result<()> {
    match failure {
        None => Ok(()),
        Some(Failure::Declined) => Err(WalletError::Declined(
            "User rejected the request.".to_string(),
        )),
        Some(Failure::Rejected) => Err(WalletError::Rejected(
            "User denied transaction signature.".to_string(),
        )),
        Some(Failure::Transport) => Err(WalletError::Transport("connection reset".to_string())),
        Some(Failure::Hang) => std::future::pending().await,
    }
}

/// In-memory [`WalletProvider`].
pub struct MockWallet {
    authorized: Vec<Account>,
    requested: Vec<Account>,
    authorized_failure: Option<Failure>,
    request_failure: Option<Failure>,
    switch_failure: Option<Failure>,
    balance: Wei,
    balance_failure: Option<Failure>,
    transient_failures: AtomicUsize,
    contract: Arc<MockContract>,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWallet {
    /// Wallet with no authorized accounts that grants [`TEST_ACCOUNT`] on
    /// request and mints token 1.
    pub fn new() -> Self {
        Self {
            authorized: Vec::new(),
            requested: vec![test_account()],
            authorized_failure: None,
            request_failure: None,
            switch_failure: None,
            balance: Wei::default(),
            balance_failure: None,
            transient_failures: AtomicUsize::new(0),
            contract: Arc::new(MockContract::confirming(1)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_authorized_accounts(mut self, accounts: Vec<Account>) -> Self {
        self.authorized = accounts;
        self
    }

    pub fn with_requested_accounts(mut self, accounts: Vec<Account>) -> Self {
        self.requested = accounts;
        self
    }

    pub fn failing_authorized(mut self, failure: Failure) -> Self {
        self.authorized_failure = Some(failure);
        self
    }

    pub fn failing_request(mut self, failure: Failure) -> Self {
        self.request_failure = Some(failure);
        self
    }

    pub fn failing_switch(mut self, failure: Failure) -> Self {
        self.switch_failure = Some(failure);
        self
    }

    pub fn with_balance(mut self, wei: Wei) -> Self {
        self.balance = wei;
        self
    }

    pub fn failing_balance(mut self, failure: Failure) -> Self {
        self.balance_failure = Some(failure);
        self
    }

    /// Fail the next `count` account queries with a transport error.
    pub fn with_transient_failures(self, count: usize) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn with_contract(mut self, contract: Arc<MockContract>) -> Self {
        self.contract = contract;
        self
    }

    pub fn contract(&self) -> Arc<MockContract> {
        self.contract.clone()
    }

    /// Names of the wallet methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|c| **c == method).count()
    }

    fn record(&self, method: &'static str) {
        lock(&self.calls).push(method);
    }

    fn take_transient(&self) -> bool {
        self.transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn authorized_accounts(&self) -> Result<Vec<Account>> {
        self.record("eth_accounts");
        if self.take_transient() {
            return Err(WalletError::Transport("connection reset".to_string()));
        }
        scripted(self.authorized_failure).await?;
        Ok(self.authorized.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Account>> {
        self.record("eth_requestAccounts");
        if self.take_transient() {
            return Err(WalletError::Transport("connection reset".to_string()));
        }
        scripted(self.request_failure).await?;
        Ok(self.requested.clone())
    }

    async fn switch_chain(&self, _chain_id: u64) -> Result<()> {
        self.record("wallet_switchEthereumChain");
        scripted(self.switch_failure).await
    }

    async fn balance(&self, _account: &Account) -> Result<Wei> {
        self.record("eth_getBalance");
        scripted(self.balance_failure).await?;
        Ok(self.balance)
    }

    fn bind_contract(
        &self,
        _spec: &ContractSpec,
        signer: &Account,
    ) -> Result<Arc<dyn MintContract>> {
        self.record("bind_contract");
        *lock(&self.contract.signer) = Some(signer.clone());
        Ok(self.contract.clone())
    }
}

/// How [`MockContract`] handles a mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintBehavior {
    /// Confirm and emit a mint event with this token id.
    Confirm(u64),
    /// Refuse the submission.
    RejectSubmit,
    /// Accept the submission, then revert.
    Revert,
    /// Accept the submission and never confirm.
    HangConfirm,
}

type SinkList = Arc<Mutex<Vec<(usize, MintEventSink)>>>;

/// In-memory [`MintContract`].
pub struct MockContract {
    behavior: MintBehavior,
    confirm_gate: Option<Arc<Notify>>,
    emit_as: Option<Account>,
    subscribe_failure: Option<Failure>,
    signer: Mutex<Option<Account>>,
    sinks: SinkList,
    next_sink_id: AtomicUsize,
    subscribe_calls: AtomicUsize,
    mint_calls: AtomicUsize,
}

impl MockContract {
    fn with_behavior(behavior: MintBehavior) -> Self {
        Self {
            behavior,
            confirm_gate: None,
            emit_as: None,
            subscribe_failure: None,
            signer: Mutex::new(None),
            sinks: Arc::new(Mutex::new(Vec::new())),
            next_sink_id: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
            mint_calls: AtomicUsize::new(0),
        }
    }

    pub fn confirming(token_id: u64) -> Self {
        Self::with_behavior(MintBehavior::Confirm(token_id))
    }

    pub fn rejecting() -> Self {
        Self::with_behavior(MintBehavior::RejectSubmit)
    }

    pub fn reverting() -> Self {
        Self::with_behavior(MintBehavior::Revert)
    }

    pub fn hanging() -> Self {
        Self::with_behavior(MintBehavior::HangConfirm)
    }

    /// Hold confirmation until `gate` is notified.
    pub fn with_confirm_gate(mut self, gate: Arc<Notify>) -> Self {
        self.confirm_gate = Some(gate);
        self
    }

    /// Emit mint events for `account` instead of the signer.
    pub fn emitting_for(mut self, account: Account) -> Self {
        self.emit_as = Some(account);
        self
    }

    pub fn failing_subscribe(mut self, failure: Failure) -> Self {
        self.subscribe_failure = Some(failure);
        self
    }

    /// Deliver `event` to every active subscription.
    pub fn emit(&self, event: MintEvent) {
        for (_, sink) in lock(&self.sinks).iter() {
            let _ = sink.send(event.clone());
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        lock(&self.sinks).len()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn mint_calls(&self) -> usize {
        self.mint_calls.load(Ordering::SeqCst)
    }

    /// Account the contract was last bound with.
    pub fn signer(&self) -> Option<Account> {
        lock(&self.signer).clone()
    }
}

#[async_trait]
impl MintContract for MockContract {
    async fn mint(&self) -> Result<TxHash> {
        let n = self.mint_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.behavior == MintBehavior::RejectSubmit {
            scripted(Some(Failure::Rejected)).await?;
        }
        TxHash::parse(&format!("{n:#066x}"))
    }

    async fn wait_confirmed(&self, tx: &TxHash) -> Result<TxReceipt> {
        if let Some(gate) = &self.confirm_gate {
            gate.notified().await;
        }

        match self.behavior {
            MintBehavior::Confirm(token_id) => {
                let from = self
                    .emit_as
                    .clone()
                    .or_else(|| self.signer())
                    .unwrap_or_else(test_account);
                self.emit(MintEvent {
                    from,
                    token_id: TokenId(token_id),
                });
                Ok(TxReceipt {
                    hash: tx.clone(),
                    block_number: Some(1),
                })
            }
            MintBehavior::Revert => Err(WalletError::Rejected("transaction reverted".to_string())),
            MintBehavior::HangConfirm => std::future::pending().await,
            MintBehavior::RejectSubmit => Err(WalletError::InvalidResponse(
                "confirmation requested for a rejected submission".to_string(),
            )),
        }
    }

    async fn subscribe_minted(&self, sink: MintEventSink) -> Result<Subscription> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        scripted(self.subscribe_failure).await?;

        let id = self.next_sink_id.fetch_add(1, Ordering::SeqCst);
        lock(&self.sinks).push((id, sink));

        let sinks = self.sinks.clone();
        Ok(Subscription::new(move || {
            lock(&sinks).retain(|(sink_id, _)| *sink_id != id);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_accounts_are_valid_and_distinct() {
        assert_ne!(test_account(), account(OTHER_ACCOUNT));
    }

    #[tokio::test]
    async fn test_mock_wallet_records_calls() {
        let wallet = MockWallet::new().with_authorized_accounts(vec![test_account()]);
        let accounts = wallet.authorized_accounts().await.unwrap();

        assert_eq!(accounts, vec![test_account()]);
        assert_eq!(wallet.calls(), vec!["eth_accounts"]);
    }

    #[tokio::test]
    async fn test_transient_failures_are_consumed() {
        let wallet = MockWallet::new().with_transient_failures(1);
        assert!(wallet.authorized_accounts().await.is_err());
        assert!(wallet.authorized_accounts().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_contract_releases_sink_on_unsubscribe() {
        let contract = MockContract::confirming(7);
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

        let subscription = contract.subscribe_minted(tx).await.unwrap();
        assert_eq!(contract.active_subscriptions(), 1);

        subscription.unsubscribe();
        assert_eq!(contract.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_mock_contract_emits_on_confirmation() {
        let contract = MockContract::confirming(7);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let _subscription = contract.subscribe_minted(tx).await.unwrap();

        let hash = contract.mint().await.unwrap();
        contract.wait_confirmed(&hash).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.token_id, TokenId(7));
        assert_eq!(event.from, test_account());
    }
}
