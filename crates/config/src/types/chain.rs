//! Wallet endpoint, chain and contract settings.

use secrecy::SecretString;

use crate::constants::{
    DEFAULT_CHAIN_ID, DEFAULT_CONTRACT_ADDRESS, DEFAULT_CURRENCY_SYMBOL, DEFAULT_MINT_EVENT,
    DEFAULT_MINT_FUNCTION,
};

/// Wallet provider endpoint settings.
#[derive(Debug, Clone, Default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint exposing the wallet methods, if any.
    ///
    /// `None` means no wallet is available and the wizard shows the
    /// acquisition prompt instead of connecting.
    pub rpc_url: Option<SecretString>,
}

/// Target chain settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Chain the wallet is asked to switch to after connecting.
    pub chain_id: u64,
    /// Native currency symbol appended to formatted balances.
    pub currency_symbol: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl ChainConfig {
    /// Chain id as the `0x`-prefixed hex quantity used by wallet requests.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

/// Deployed contract settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Contract address (`0x` + 40 hex characters).
    pub address: String,
    /// Signature of the mint entry point, e.g. `mint()`.
    pub mint_function: String,
    /// Signature of the mint-completion event, e.g. `Minted(address,uint256)`.
    pub mint_event: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            mint_function: DEFAULT_MINT_FUNCTION.to_string(),
            mint_event: DEFAULT_MINT_EVENT.to_string(),
        }
    }
}
