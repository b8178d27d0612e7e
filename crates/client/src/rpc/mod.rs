//! Wallet provider speaking Ethereum JSON-RPC over HTTP.
//!
//! Responsibilities:
//! - Implement [`WalletProvider`] with the EIP-1193 wallet methods.
//! - Map JSON-RPC error codes onto [`WalletError`] kinds.
//! - Bind the mint contract (see [`contract`]).
//!
//! Does NOT handle:
//! - Timeouts and retries across calls (the session's call policy does).
//! - Signing; the endpoint holds the keys (browser bridge, node with
//!   unlocked accounts, or a remote signer).

mod builder;
mod contract;
mod transport;
mod wire;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::abi::parse_hex_quantity;
use crate::error::{Result, WalletError};
use crate::models::{Account, Wei};
use crate::provider::{ContractSpec, MintContract, WalletProvider};

pub use builder::JsonRpcWalletBuilder;
pub use contract::RpcMintContract;

use transport::{CODE_UNRECOGNIZED_CHAIN, RpcTransport};

/// JSON-RPC wallet provider.
#[derive(Clone)]
pub struct JsonRpcWallet {
    transport: Arc<RpcTransport>,
    poll_interval: Duration,
}

impl JsonRpcWallet {
    pub fn builder() -> JsonRpcWalletBuilder {
        JsonRpcWalletBuilder::new()
    }

    /// Chain the endpoint is currently connected to.
    pub async fn chain_id(&self) -> Result<u64> {
        let quantity: String = self.transport.request("eth_chainId", json!([])).await?;
        let chain_id = parse_hex_quantity(&quantity)?;
        u64::try_from(chain_id)
            .map_err(|_| WalletError::InvalidResponse(format!("chain id {quantity} out of range")))
    }

    async fn accounts(&self, method: &str) -> Result<Vec<Account>> {
        let raw: Vec<String> = self.transport.request(method, json!([])).await?;
        raw.iter().map(|address| Account::parse(address)).collect()
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn authorized_accounts(&self) -> Result<Vec<Account>> {
        self.accounts("eth_accounts").await
    }

    async fn request_accounts(&self) -> Result<Vec<Account>> {
        match self.accounts("eth_requestAccounts").await {
            Err(WalletError::UnsupportedMethod(_)) => {
                // Plain nodes expose their unlocked accounts without a prompt.
                debug!("eth_requestAccounts unsupported, using eth_accounts");
                self.accounts("eth_accounts").await
            }
            other => other,
        }
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        let params = json!([{ "chainId": format!("{chain_id:#x}") }]);
        match self
            .transport
            .request::<Value>("wallet_switchEthereumChain", params)
            .await
        {
            Ok(_) => Ok(()),
            Err(WalletError::Rpc { code, .. }) if code == CODE_UNRECOGNIZED_CHAIN => {
                Err(WalletError::UnknownChain(chain_id))
            }
            Err(WalletError::UnsupportedMethod(_)) => {
                let actual = self.chain_id().await?;
                debug!(actual, expected = chain_id, "Chain switch unsupported, comparing chain ids");
                if actual == chain_id {
                    Ok(())
                } else {
                    Err(WalletError::ChainMismatch {
                        expected: chain_id,
                        actual,
                    })
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn balance(&self, account: &Account) -> Result<Wei> {
        let quantity: String = self
            .transport
            .request("eth_getBalance", json!([account.as_str(), "latest"]))
            .await?;
        Wei::from_hex_quantity(&quantity)
    }

    fn bind_contract(
        &self,
        spec: &ContractSpec,
        signer: &Account,
    ) -> Result<Arc<dyn MintContract>> {
        let contract =
            RpcMintContract::new(self.transport.clone(), spec, signer.clone(), self.poll_interval)?;
        Ok(Arc::new(contract))
    }
}
