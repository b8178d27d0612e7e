//! Builder for [`WizardSession`].

use std::sync::{Arc, Mutex};

use mintwizard_config::{Config, LinksConfig};
use tokio::sync::mpsc;

use crate::models::Balance;
use crate::policy::CallPolicy;
use crate::provider::{ContractSpec, WalletProvider};
use crate::stepper::Stepper;

use super::{SessionInner, SessionState, WizardSession};

/// Builder for creating a [`WizardSession`].
///
/// Every option has a default taken from [`Config::default`]; a session
/// built without a provider reports [`crate::WalletError::ProviderAbsent`]
/// from every wallet operation.
///
/// ```rust,ignore
/// let session = WizardSession::builder()
///     .from_config(&config)
///     .provider(Arc::new(wallet))
///     .build();
/// ```
pub struct WizardSessionBuilder {
    provider: Option<Arc<dyn WalletProvider>>,
    contract_spec: ContractSpec,
    chain_id: u64,
    currency_symbol: String,
    balance_chars: usize,
    links: LinksConfig,
    policy: CallPolicy,
}

impl Default for WizardSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSessionBuilder {
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            provider: None,
            contract_spec: ContractSpec::from(&config.contract),
            chain_id: config.chain.chain_id,
            currency_symbol: config.chain.currency_symbol,
            balance_chars: config.display.balance_chars,
            links: config.links,
            policy: CallPolicy::from_config(&config.policy),
        }
    }

    /// Take chain, contract, display, link and policy settings from `config`.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.contract_spec = ContractSpec::from(&config.contract);
        self.chain_id = config.chain.chain_id;
        self.currency_symbol = config.chain.currency_symbol.clone();
        self.balance_chars = config.display.balance_chars;
        self.links = config.links.clone();
        self.policy =
            CallPolicy::from_config(&config.policy).with_metrics(self.policy.metrics().clone());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn WalletProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set or clear the provider.
    pub fn maybe_provider(mut self, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        self.provider = provider;
        self
    }

    pub fn contract(mut self, spec: ContractSpec) -> Self {
        self.contract_spec = spec;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> WizardSession {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let inner = SessionInner {
            stepper: Stepper::default(),
            state: SessionState::Disconnected,
            account: None,
            balance: Balance::initial(&self.currency_symbol),
            mint_result: None,
            mining: false,
            contract: None,
            subscription: None,
        };

        WizardSession {
            provider: self.provider,
            contract_spec: self.contract_spec,
            chain_id: self.chain_id,
            currency_symbol: self.currency_symbol,
            balance_chars: self.balance_chars,
            links: self.links,
            policy: self.policy,
            inner: Mutex::new(inner),
            events_tx,
            events_rx: tokio::sync::Mutex::new(events_rx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;

    #[test]
    fn test_default_session_starts_on_wallet_stage() {
        let session = WizardSession::builder().build();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.stage, Stage::Wallet);
        assert_eq!(snapshot.stage_index, 0);
        assert_eq!(snapshot.stage_count, 4);
        assert_eq!(snapshot.state, SessionState::Disconnected);
        assert_eq!(snapshot.balance.display(), "0.000 ETH");
        assert!(snapshot.account.is_none());
        assert!(snapshot.mint_result.is_none());
        assert!(!snapshot.mining);
        assert!(!session.has_wallet());
    }

    #[test]
    fn test_from_config_applies_chain_and_contract() {
        let mut config = Config::default();
        config.chain.chain_id = 1337;
        config.chain.currency_symbol = "GO".to_string();
        config.contract.address = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4".to_string();

        let session = WizardSession::builder().from_config(&config).build();

        assert_eq!(session.chain_id(), 1337);
        assert_eq!(session.balance().display(), "0.000 GO");
        assert_eq!(
            session.contract_address(),
            "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4"
        );
    }

    #[test]
    fn test_missing_provider_is_reported() {
        let session = WizardSession::builder().build();
        assert!(matches!(
            session.detect_wallet(),
            Err(crate::WalletError::ProviderAbsent)
        ));
    }
}
