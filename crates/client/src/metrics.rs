//! Metrics collection for wallet and contract calls.
//!
//! This module provides metrics collection for wallet calls, including:
//! - Call latency histograms
//! - Call counters (total, retries, errors)
//! - Mint outcome counters
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `operation`, `outcome`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::WalletError;
use std::time::Duration;

/// Metric name for call duration histogram.
pub const METRIC_CALL_DURATION: &str = "mintwizard_wallet_call_duration_seconds";

/// Metric name for total call counter.
pub const METRIC_CALLS_TOTAL: &str = "mintwizard_wallet_calls_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "mintwizard_wallet_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "mintwizard_wallet_errors_total";

/// Metric name for mint outcome counter.
pub const METRIC_MINTS_TOTAL: &str = "mintwizard_mints_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, gateway errors)
    Transport,
    /// User declined a prompt
    Declined,
    /// Transaction rejected or reverted
    Rejected,
    /// Deadline expired
    Timeout,
    /// JSON-RPC error objects and unsupported methods
    Rpc,
    /// Chain selection failures
    Chain,
    /// Missing provider or account
    Provider,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Declined => "declined",
            ErrorCategory::Rejected => "rejected",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Rpc => "rpc",
            ErrorCategory::Chain => "chain",
            ErrorCategory::Provider => "provider",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&WalletError> for ErrorCategory {
    fn from(error: &WalletError) -> Self {
        match error {
            WalletError::Transport(_) | WalletError::Http(_) => ErrorCategory::Transport,
            WalletError::Declined(_) => ErrorCategory::Declined,
            WalletError::Rejected(_) => ErrorCategory::Rejected,
            WalletError::Timeout { .. } => ErrorCategory::Timeout,
            WalletError::Rpc { .. } | WalletError::UnsupportedMethod(_) => ErrorCategory::Rpc,
            WalletError::UnknownChain(_) | WalletError::ChainMismatch { .. } => {
                ErrorCategory::Chain
            }
            WalletError::ProviderAbsent | WalletError::NoAccounts | WalletError::NotConnected => {
                ErrorCategory::Provider
            }
            WalletError::MaxRetriesExceeded(_, inner) => ErrorCategory::from(inner.as_ref()),
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for wallet calls.
///
/// Thin wrapper around the `metrics` crate macros that keeps label names
/// consistent.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    /// Whether metrics collection is enabled.
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one call attempt and its duration.
    pub fn record_call(&self, operation: &str, duration: Duration, success: bool) {
        if !self.enabled {
            return;
        }

        let outcome = if success { "ok" } else { "error" };

        metrics::counter!(METRIC_CALLS_TOTAL,
            "operation" => operation.to_string(),
            "outcome" => outcome,
        )
        .increment(1);

        metrics::histogram!(METRIC_CALL_DURATION,
            "operation" => operation.to_string(),
            "outcome" => outcome,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a retry attempt (1-based, excluding the initial call).
    pub fn record_retry(&self, operation: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "operation" => operation.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record a failed call, categorized from the error.
    pub fn record_error(&self, operation: &str, error: &WalletError) {
        if !self.enabled {
            return;
        }

        let category = ErrorCategory::from(error);
        metrics::counter!(METRIC_ERRORS_TOTAL,
            "operation" => operation.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record the outcome of a mint attempt (`confirmed`, `failed`).
    pub fn record_mint(&self, outcome: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_MINTS_TOTAL, "outcome" => outcome).increment(1);
    }
}
