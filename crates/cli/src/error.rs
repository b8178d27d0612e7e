//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map WalletError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use mintwizard_client::WalletError;

/// Structured exit codes for mintwizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// No wallet configured.
    ///
    /// Scripts should configure an RPC endpoint (see `mintwizard links`).
    WalletUnavailable = 2,

    /// The user declined a wallet prompt or rejected the transaction.
    Declined = 3,

    /// Connection error - network failure or timeout.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 4,

    /// The wallet is on, or cannot switch to, a different chain.
    WrongNetwork = 5,

    /// The wallet answered with something unexpected.
    ProtocolError = 6,

    /// No account is connected or the wallet granted none.
    NotConnected = 7,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[allow(dead_code)]
    pub const fn is_retryable(self) -> bool {
        matches!(self, ExitCode::ConnectionError)
    }
}

impl From<&WalletError> for ExitCode {
    fn from(err: &WalletError) -> Self {
        match err {
            WalletError::ProviderAbsent => ExitCode::WalletUnavailable,

            WalletError::Declined(_) | WalletError::Rejected(_) => ExitCode::Declined,

            WalletError::Timeout { .. } | WalletError::Transport(_) | WalletError::Http(_) => {
                ExitCode::ConnectionError
            }

            WalletError::UnknownChain(_) | WalletError::ChainMismatch { .. } => {
                ExitCode::WrongNetwork
            }

            WalletError::Rpc { .. }
            | WalletError::UnsupportedMethod(_)
            | WalletError::InvalidResponse(_)
            | WalletError::InvalidAddress(_) => ExitCode::ProtocolError,

            WalletError::NoAccounts | WalletError::NotConnected => ExitCode::NotConnected,

            WalletError::InvalidConfig(_)
            | WalletError::MintInFlight
            | WalletError::MintUnavailable(_) => ExitCode::GeneralError,

            // Classify by the last underlying failure.
            WalletError::MaxRetriesExceeded(_, inner) => Self::from(inner.as_ref()),
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no WalletError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<WalletError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use mintwizard_client::Stage;
    use std::time::Duration;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::WalletUnavailable.as_i32(), 2);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_is_retryable() {
        assert!(ExitCode::ConnectionError.is_retryable());
        assert!(!ExitCode::Declined.is_retryable());
        assert!(!ExitCode::WrongNetwork.is_retryable());
    }

    #[test]
    fn test_declined_and_rejected_share_exit_code() {
        assert_eq!(
            ExitCode::from(&WalletError::Declined("no".to_string())),
            ExitCode::Declined
        );
        assert_eq!(
            ExitCode::from(&WalletError::Rejected("no".to_string())),
            ExitCode::Declined
        );
    }

    #[test]
    fn test_timeout_is_connection_error() {
        let err = WalletError::Timeout {
            operation: "eth_accounts",
            after: Duration::from_secs(30),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::ConnectionError);
    }

    #[test]
    fn test_chain_errors_are_wrong_network() {
        assert_eq!(
            ExitCode::from(&WalletError::UnknownChain(4)),
            ExitCode::WrongNetwork
        );
        assert_eq!(
            ExitCode::from(&WalletError::ChainMismatch {
                expected: 4,
                actual: 1
            }),
            ExitCode::WrongNetwork
        );
    }

    #[test]
    fn test_local_state_errors_are_general() {
        assert_eq!(
            ExitCode::from(&WalletError::MintUnavailable(Stage::Success)),
            ExitCode::GeneralError
        );
        assert_eq!(
            ExitCode::from(&WalletError::MintInFlight),
            ExitCode::GeneralError
        );
        assert_eq!(
            ExitCode::from(&WalletError::InvalidConfig("poll".to_string())),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_max_retries_uses_inner_error() {
        let inner = WalletError::Transport("connection reset".to_string());
        let err = WalletError::MaxRetriesExceeded(2, Box::new(inner));
        assert_eq!(ExitCode::from(&err), ExitCode::ConnectionError);
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = anyhow::Error::from(WalletError::ProviderAbsent);
        assert_eq!(err.exit_code(), ExitCode::WalletUnavailable);

        let wrapped: anyhow::Result<()> =
            Err(WalletError::NotConnected).context("Failed to read balance");
        assert_eq!(wrapped.unwrap_err().exit_code(), ExitCode::NotConnected);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
