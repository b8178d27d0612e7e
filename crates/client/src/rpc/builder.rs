//! Builder for [`JsonRpcWallet`].

use std::sync::Arc;
use std::time::Duration;

use mintwizard_config::Config;
use mintwizard_config::constants::{DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS};
use secrecy::SecretString;

use crate::error::{Result, WalletError};

use super::JsonRpcWallet;
use super::transport::RpcTransport;

/// Builder for creating a [`JsonRpcWallet`].
///
/// ```rust,ignore
/// let wallet = JsonRpcWallet::builder()
///     .endpoint(SecretString::new("http://localhost:8545".into()))
///     .poll_interval(Duration::from_millis(500))
///     .build()?;
/// ```
pub struct JsonRpcWalletBuilder {
    endpoint: Option<SecretString>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for JsonRpcWalletBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl JsonRpcWalletBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON-RPC endpoint URL. Often embeds an API key, hence secret.
    pub fn endpoint(mut self, endpoint: SecretString) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Per-request HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Interval between receipt and log polls. Must be non-zero.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Take the endpoint, call timeout and poll interval from `config`.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.endpoint = config.wallet.rpc_url.clone();
        self.timeout = config.policy.call_timeout;
        self.poll_interval = config.policy.poll_interval;
        self
    }

    /// # Errors
    /// Returns [`WalletError::ProviderAbsent`] without an endpoint and
    /// [`WalletError::Http`] if the HTTP client fails to build.
    /// A zero poll interval is [`WalletError::InvalidConfig`].
    pub fn build(self) -> Result<JsonRpcWallet> {
        let endpoint = self.endpoint.ok_or(WalletError::ProviderAbsent)?;
        if self.poll_interval.is_zero() {
            return Err(WalletError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(JsonRpcWallet {
            transport: Arc::new(RpcTransport::new(http, endpoint)),
            poll_interval: self.poll_interval,
        })
    }
}

impl JsonRpcWallet {
    /// Wallet for the configured endpoint, or `None` when none is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        if !config.has_wallet() {
            return Ok(None);
        }
        JsonRpcWalletBuilder::new().from_config(config).build().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_endpoint_is_provider_absent() {
        assert!(matches!(
            JsonRpcWalletBuilder::new().build(),
            Err(WalletError::ProviderAbsent)
        ));
    }

    #[test]
    fn test_build_rejects_zero_poll_interval() {
        let result = JsonRpcWalletBuilder::new()
            .endpoint(SecretString::new("http://localhost:8545".into()))
            .poll_interval(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(WalletError::InvalidConfig(m)) if m.contains("poll interval")));
    }

    #[test]
    fn test_from_config_without_endpoint_is_none() {
        assert!(JsonRpcWallet::from_config(&Config::default()).unwrap().is_none());
    }

    #[test]
    fn test_from_config_with_endpoint() {
        let mut config = Config::default();
        config.wallet.rpc_url = Some(SecretString::new("http://localhost:8545".into()));
        assert!(JsonRpcWallet::from_config(&config).unwrap().is_some());
    }
}
