//! Error types for wallet and contract operations.

use std::time::Duration;
use thiserror::Error;

use crate::stage::Stage;

/// Result type alias for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Errors that can occur while talking to a wallet provider or contract.
#[derive(Error, Debug)]
pub enum WalletError {
    /// No wallet provider is available.
    #[error("No wallet provider detected")]
    ProviderAbsent,

    /// The user declined a wallet prompt.
    #[error("Request declined by the wallet: {0}")]
    Declined(String),

    /// The transaction was rejected or reverted.
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// A call did not complete within its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Transient transport failure (connection reset, gateway errors).
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON-RPC error object returned by the endpoint.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The provider does not implement the requested method.
    #[error("Wallet does not support {0}")]
    UnsupportedMethod(String),

    /// The provider does not know the requested chain.
    #[error("Wallet does not recognize chain {0:#x}")]
    UnknownChain(u64),

    /// The provider is connected to a different chain.
    #[error("Wallet is on chain {actual:#x}, expected {expected:#x}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Response could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The wallet client was configured with unusable settings.
    #[error("Invalid wallet configuration: {0}")]
    InvalidConfig(String),

    /// Malformed address.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// The provider returned an empty account list.
    #[error("Wallet returned no accounts")]
    NoAccounts,

    /// The operation requires a connected account.
    #[error("No wallet account connected")]
    NotConnected,

    /// A mint transaction is already pending for this session.
    #[error("A mint transaction is already in flight")]
    MintInFlight,

    /// Minting is only offered on the mint stage, and only once.
    #[error("Minting is not available on the {0} stage")]
    MintUnavailable(Stage),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts): {1}")]
    MaxRetriesExceeded(usize, #[source] Box<WalletError>),
}

impl WalletError {
    /// Check if this error is a transient transport failure worth retrying.
    ///
    /// Timeouts, declined prompts, rejected transactions and RPC error
    /// objects are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http(_))
    }

    /// Check if an HTTP status code indicates a transient gateway failure.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if the user declined a wallet prompt.
    pub fn is_declined(&self) -> bool {
        match self {
            Self::Declined(_) => true,
            Self::MaxRetriesExceeded(_, inner) => inner.is_declined(),
            _ => false,
        }
    }

    /// Check if this error is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::MaxRetriesExceeded(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }
}
