//! Timeout and retry policy settings for external wallet calls.

use std::time::Duration;

use crate::constants::{
    DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_EVENT_TIMEOUT_SECS,
    DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RETRY_BACKOFF_MS,
};

/// Call policy applied to every wallet and contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicyConfig {
    /// Timeout for a single provider call.
    pub call_timeout: Duration,
    /// Timeout for waiting on a transaction confirmation.
    pub confirmation_timeout: Duration,
    /// Time to wait for the mint-completion event once the transaction is confirmed.
    pub event_timeout: Duration,
    /// Retries for transient transport failures of read-only calls.
    pub max_retries: usize,
    /// Delay before each retry.
    pub retry_backoff: Duration,
    /// Interval for receipt and event-log polling.
    pub poll_interval: Duration,
}

impl Default for CallPolicyConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            confirmation_timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
            event_timeout: Duration::from_secs(DEFAULT_EVENT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}
