//! JSON-RPC over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, WalletError};
use crate::tracing::inject_trace_context;

use super::wire::{RpcErrorObject, RpcRequest, RpcResponse};

/// EIP-1193 "User Rejected Request".
pub(crate) const CODE_USER_REJECTED: i64 = 4001;
/// EIP-1193 "Unauthorized".
pub(crate) const CODE_UNAUTHORIZED: i64 = 4100;
/// EIP-3326 "Unrecognized chain ID".
pub(crate) const CODE_UNRECOGNIZED_CHAIN: i64 = 4902;
/// JSON-RPC "Method not found".
pub(crate) const CODE_METHOD_NOT_FOUND: i64 = -32601;

/// Sends JSON-RPC requests to a single endpoint.
pub(crate) struct RpcTransport {
    http: reqwest::Client,
    endpoint: SecretString,
    next_id: AtomicU64,
}

impl RpcTransport {
    pub(crate) fn new(http: reqwest::Client, endpoint: SecretString) -> Self {
        Self {
            http,
            endpoint,
            next_id: AtomicU64::new(1),
        }
    }

    /// Call `method` and decode its result.
    pub(crate) async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        trace!(id, method, "Sending JSON-RPC request");

        let builder = self.http.post(self.endpoint.expose_secret()).json(&body);
        let response = inject_trace_context(builder).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = format!("{method}: HTTP {status}");
            return Err(if WalletError::is_retryable_status(status.as_u16()) {
                WalletError::Transport(message)
            } else {
                WalletError::InvalidResponse(message)
            });
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(error) = envelope.error {
            debug!(method, code = error.code, message = %error.message, "JSON-RPC error");
            return Err(map_rpc_error(method, error));
        }

        serde_json::from_value(envelope.result)
            .map_err(|e| WalletError::InvalidResponse(format!("{method}: {e}")))
    }
}

fn map_rpc_error(method: &str, error: RpcErrorObject) -> WalletError {
    match error.code {
        CODE_USER_REJECTED | CODE_UNAUTHORIZED => WalletError::Declined(error.message),
        CODE_METHOD_NOT_FOUND => WalletError::UnsupportedMethod(method.to_string()),
        code => WalletError::Rpc {
            code,
            message: error.message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(code: i64) -> RpcErrorObject {
        RpcErrorObject {
            code,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_map_rpc_error_codes() {
        assert!(matches!(
            map_rpc_error("eth_requestAccounts", error(4001)),
            WalletError::Declined(_)
        ));
        assert!(matches!(
            map_rpc_error("eth_sendTransaction", error(4100)),
            WalletError::Declined(_)
        ));
        assert!(matches!(
            map_rpc_error("wallet_switchEthereumChain", error(-32601)),
            WalletError::UnsupportedMethod(m) if m == "wallet_switchEthereumChain"
        ));
        assert!(matches!(
            map_rpc_error("wallet_switchEthereumChain", error(4902)),
            WalletError::Rpc { code: 4902, .. }
        ));
        assert!(matches!(
            map_rpc_error("eth_call", error(-32000)),
            WalletError::Rpc { code: -32000, .. }
        ));
    }
}
