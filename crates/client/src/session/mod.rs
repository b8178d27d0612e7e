//! Wallet/contract session driving the onboarding stepper.
//!
//! Responsibilities:
//! - Track the connected account, formatted balance, mint result and mining flag.
//! - Connect silently or by prompt, switch to the target chain, keep one
//!   mint-event subscription alive.
//! - Submit the mint and advance the stepper on confirmation.
//!
//! Does NOT handle:
//! - Transport details (the injected [`WalletProvider`] does).
//! - Rendering or prompting (the CLI does).
//!
//! Invariants:
//! - Every stepper advance is gated on the expected current stage.
//! - The state mutex is never held across an `.await`.
//! - At most one mint is in flight; the mining flag is cleared on every exit path.
//! - At most one mint-event subscription is active.

mod builder;
mod connect;
mod mint;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mintwizard_config::LinksConfig;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{Result, WalletError};
use crate::links;
use crate::models::{Account, Balance, MintEvent, MintResult};
use crate::policy::CallPolicy;
use crate::provider::{ContractSpec, MintContract, MintEventSink, Subscription, WalletProvider};
use crate::stage::Stage;
use crate::stepper::Stepper;

pub use builder::WizardSessionBuilder;
pub use mint::MintOutcome;

/// Connection and mint lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Minting,
    Minted,
}

impl SessionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Connected => "connected",
            SessionState::Minting => "minting",
            SessionState::Minted => "minted",
        }
    }
}

/// Point-in-time copy of the session, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub stage_index: usize,
    pub stage_count: usize,
    pub progress_percent: u8,
    pub state: SessionState,
    pub account: Option<Account>,
    pub balance: Balance,
    pub mint_result: Option<MintResult>,
    pub mining: bool,
}

struct SessionInner {
    stepper: Stepper<Stage>,
    state: SessionState,
    account: Option<Account>,
    balance: Balance,
    mint_result: Option<MintResult>,
    mining: bool,
    contract: Option<Arc<dyn MintContract>>,
    subscription: Option<Subscription>,
}

/// Session shared by reference between the wizard surface and its tasks.
pub struct WizardSession {
    provider: Option<Arc<dyn WalletProvider>>,
    contract_spec: ContractSpec,
    chain_id: u64,
    currency_symbol: String,
    balance_chars: usize,
    links: LinksConfig,
    policy: CallPolicy,
    inner: Mutex<SessionInner>,
    events_tx: MintEventSink,
    events_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<MintEvent>>,
}

impl WizardSession {
    pub fn builder() -> WizardSessionBuilder {
        WizardSessionBuilder::new()
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The injected wallet provider.
    ///
    /// # Errors
    /// Returns [`WalletError::ProviderAbsent`] when no wallet is available;
    /// callers show the acquisition links.
    pub fn detect_wallet(&self) -> Result<Arc<dyn WalletProvider>> {
        self.provider.clone().ok_or_else(|| {
            warn!("No wallet provider available");
            WalletError::ProviderAbsent
        })
    }

    pub fn has_wallet(&self) -> bool {
        self.provider.is_some()
    }

    /// Advance past the funding stage. No-op unless currently on it.
    pub fn continue_funding(&self) -> bool {
        let advanced = self.lock().stepper.advance_from(&Stage::Fund);
        if advanced {
            tracing::info!("Funding acknowledged, moving to mint");
        }
        advanced
    }

    pub fn current_stage(&self) -> Stage {
        *self.lock().stepper.current()
    }

    pub fn stage_index(&self) -> usize {
        self.lock().stepper.current_index()
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn account(&self) -> Option<Account> {
        self.lock().account.clone()
    }

    pub fn balance(&self) -> Balance {
        self.lock().balance.clone()
    }

    pub fn mint_result(&self) -> Option<MintResult> {
        self.lock().mint_result
    }

    pub fn is_mining(&self) -> bool {
        self.lock().mining
    }

    pub fn has_subscription(&self) -> bool {
        self.lock().subscription.is_some()
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_spec.address
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn policy(&self) -> &CallPolicy {
        &self.policy
    }

    /// Marketplace page of the minted token, once known.
    pub fn marketplace_url(&self) -> Option<String> {
        self.mint_result().map(|result| {
            links::marketplace_url(&self.links, &self.contract_spec.address, result.token_id)
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            stage: *inner.stepper.current(),
            stage_index: inner.stepper.current_index(),
            stage_count: inner.stepper.len(),
            progress_percent: inner.stepper.progress_percent(),
            state: inner.state,
            account: inner.account.clone(),
            balance: inner.balance.clone(),
            mint_result: inner.mint_result,
            mining: inner.mining,
        }
    }
}
