//! Timeout and retry policy for external wallet calls.
//!
//! Responsibilities:
//! - Bound every call with a deadline and report expiry as `Timeout`.
//! - Retry transient transport failures a bounded number of times.
//! - Record call, retry and error metrics.
//!
//! Does NOT handle:
//! - Retrying declined prompts, rejected transactions or RPC errors.
//! - Retrying timeouts (a hung wallet is reported, not re-prompted).

use std::future::Future;
use std::time::{Duration, Instant};

use mintwizard_config::CallPolicyConfig;
use tracing::debug;

use crate::error::{Result, WalletError};
use crate::metrics::MetricsCollector;

/// Whether a call may be repeated after a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    /// Repeat after transport failures, up to the configured limit.
    Transient,
    /// Run once. Used for transaction submission.
    Never,
}

/// Deadlines and retry limits applied to wallet calls.
#[derive(Debug, Clone)]
pub struct CallPolicy {
    call_timeout: Duration,
    confirmation_timeout: Duration,
    event_timeout: Duration,
    max_retries: usize,
    retry_backoff: Duration,
    metrics: MetricsCollector,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::from_config(&CallPolicyConfig::default())
    }
}

impl CallPolicy {
    pub fn from_config(config: &CallPolicyConfig) -> Self {
        Self {
            call_timeout: config.call_timeout,
            confirmation_timeout: config.confirmation_timeout,
            event_timeout: config.event_timeout,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
            metrics: MetricsCollector::disabled(),
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub fn confirmation_timeout(&self) -> Duration {
        self.confirmation_timeout
    }

    pub fn event_timeout(&self) -> Duration {
        self.event_timeout
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Run `f` under the call timeout.
    pub async fn call<T, F, Fut>(&self, operation: &'static str, retry: Retry, f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run(operation, self.call_timeout, retry, f).await
    }

    /// Run `f` once under the confirmation timeout.
    pub async fn confirm<T, F, Fut>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run(operation, self.confirmation_timeout, Retry::Never, f)
            .await
    }

    async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        deadline: Duration,
        retry: Retry,
        mut f: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = match retry {
            Retry::Transient => self.max_retries,
            Retry::Never => 0,
        };
        let mut attempt = 0;

        loop {
            let start = Instant::now();
            let result = match tokio::time::timeout(deadline, f()).await {
                Ok(result) => result,
                Err(_) => Err(WalletError::Timeout {
                    operation,
                    after: deadline,
                }),
            };
            self.metrics
                .record_call(operation, start.elapsed(), result.is_ok());

            match result {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(operation, attempt, "Call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    attempt += 1;
                    self.metrics.record_retry(operation, attempt);
                    debug!(
                        operation,
                        attempt,
                        max_retries,
                        backoff_ms = self.retry_backoff.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                }
                Err(e) => {
                    self.metrics.record_error(operation, &e);
                    if attempt > 0 && e.is_retryable() {
                        return Err(WalletError::MaxRetriesExceeded(attempt + 1, Box::new(e)));
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn policy(max_retries: usize) -> CallPolicy {
        CallPolicy::from_config(&CallPolicyConfig {
            call_timeout: Duration::from_secs(5),
            confirmation_timeout: Duration::from_secs(60),
            event_timeout: Duration::from_secs(10),
            max_retries,
            retry_backoff: Duration::from_millis(100),
            poll_interval: Duration::from_millis(100),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_call_times_out() {
        let result: Result<()> = policy(1)
            .call("eth_accounts", Retry::Transient, || std::future::pending())
            .await;

        match result {
            Err(WalletError::Timeout { operation, after }) => {
                assert_eq!(operation, "eth_accounts");
                assert_eq!(after, Duration::from_secs(5));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_retried_once() {
        let calls = AtomicUsize::new(0);
        let result = policy(1)
            .call("eth_getBalance", Retry::Transient, || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(WalletError::Transport("connection reset".to_string()))
                    } else {
                        Ok(7u32)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_bounded() {
        let calls = AtomicUsize::new(0);
        let result: Result<()> = policy(1)
            .call("eth_getBalance", Retry::Transient, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(WalletError::Transport("gateway".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(WalletError::MaxRetriesExceeded(2, _))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_declined_is_not_retried() {
        let calls = AtomicUsize::new(0);
        let result: Result<()> = policy(3)
            .call("eth_requestAccounts", Retry::Transient, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(WalletError::Declined("User rejected".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(WalletError::Declined(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_never_retry_runs_once() {
        let calls = AtomicUsize::new(0);
        let result: Result<()> = policy(3)
            .call("mint", Retry::Never, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(WalletError::Transport("reset".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(WalletError::Transport(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_uses_confirmation_timeout() {
        let result: Result<()> = policy(1)
            .confirm("wait_confirmed", || std::future::pending())
            .await;

        assert!(matches!(
            result,
            Err(WalletError::Timeout { after, .. }) if after == Duration::from_secs(60)
        ));
    }
}
