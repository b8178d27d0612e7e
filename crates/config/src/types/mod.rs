//! Configuration types for mintwizard.
//!
//! Responsibilities:
//! - Define the final, validated `Config` consumed by the client and CLI.
//! - Group settings by concern (wallet endpoint, chain, contract, call policy, links).
//!
//! Does NOT handle:
//! - Loading or layering configuration sources (see `loader`).
//! - Any network access (see the client crate).
//!
//! Invariants:
//! - `Config::default()` targets the default test network and contract with no wallet endpoint.
//! - The wallet endpoint is held as a `SecretString`; it commonly embeds an API key.

mod chain;
mod links;
mod policy;

pub use chain::{ChainConfig, ContractConfig, WalletConfig};
pub use links::{DisplayConfig, LinksConfig};
pub use policy::CallPolicyConfig;

/// Complete wizard configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Wallet provider endpoint settings.
    pub wallet: WalletConfig,
    /// Target chain settings.
    pub chain: ChainConfig,
    /// Deployed contract settings.
    pub contract: ContractConfig,
    /// Timeout and retry policy for external calls.
    pub policy: CallPolicyConfig,
    /// Presentational link bases.
    pub links: LinksConfig,
    /// Display settings.
    pub display: DisplayConfig,
}

impl Config {
    /// Returns true when a wallet endpoint is configured.
    pub fn has_wallet(&self) -> bool {
        self.wallet.rpc_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_CHAIN_ID, DEFAULT_CONTRACT_ADDRESS, DEFAULT_MAX_RETRIES};

    #[test]
    fn test_default_config_has_no_wallet() {
        let config = Config::default();
        assert!(!config.has_wallet());
        assert_eq!(config.chain.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.contract.address, DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.policy.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_debug_output_redacts_rpc_url() {
        let config = Config {
            wallet: WalletConfig {
                rpc_url: Some(secrecy::SecretString::new(
                    "https://node.example/v3/secret-key".into(),
                )),
            },
            ..Config::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
    }
}
