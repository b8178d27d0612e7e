//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Support loading from environment variables, a JSON config file, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Environment variable parsing logic (delegated to env.rs).
//! - Config file parsing logic (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods and environment variables overwrite earlier values.
//! - Config file values only fill fields that are still unset.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{
    MAX_CONFIRMATION_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS, MIN_POLL_INTERVAL_MS,
};
use crate::types::{
    CallPolicyConfig, ChainConfig, Config, ContractConfig, DisplayConfig, LinksConfig,
    WalletConfig,
};

/// Configuration loader that builds config from files, environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    pub(super) rpc_url: Option<SecretString>,
    pub(super) chain_id: Option<u64>,
    pub(super) currency_symbol: Option<String>,
    pub(super) contract_address: Option<String>,
    pub(super) mint_function: Option<String>,
    pub(super) mint_event: Option<String>,
    pub(super) marketplace_base_url: Option<String>,
    pub(super) explorer_tx_base_url: Option<String>,
    pub(super) call_timeout: Option<Duration>,
    pub(super) confirmation_timeout: Option<Duration>,
    pub(super) event_timeout: Option<Duration>,
    pub(super) max_retries: Option<usize>,
    pub(super) retry_backoff: Option<Duration>,
    pub(super) poll_interval: Option<Duration>,
    pub(super) balance_chars: Option<usize>,
    pub(super) config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read configuration from the JSON config file.
    ///
    /// Uses the path set via `with_config_path` / `MINTWIZARD_CONFIG_PATH`, or the
    /// platform default. A missing file at the default location is not an error.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the wallet JSON-RPC endpoint.
    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = Some(SecretString::new(url.into()));
        self
    }

    /// Set the target chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Set the contract address.
    pub fn with_contract_address(mut self, address: String) -> Self {
        self.contract_address = Some(address);
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the receipt/log polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = Config::default();

        if let Some(url) = &self.rpc_url {
            validate_url("rpc_url", url.expose_secret())?;
        }

        let contract = ContractConfig {
            address: self.contract_address.unwrap_or(defaults.contract.address),
            mint_function: self
                .mint_function
                .unwrap_or(defaults.contract.mint_function),
            mint_event: self.mint_event.unwrap_or(defaults.contract.mint_event),
        };
        validate_contract(&contract)?;

        let links = LinksConfig {
            marketplace_base_url: normalize_base_url(
                self.marketplace_base_url
                    .unwrap_or(defaults.links.marketplace_base_url),
            ),
            explorer_tx_base_url: normalize_base_url(
                self.explorer_tx_base_url
                    .unwrap_or(defaults.links.explorer_tx_base_url),
            ),
        };
        validate_url("marketplace_base_url", &links.marketplace_base_url)?;
        validate_url("explorer_tx_base_url", &links.explorer_tx_base_url)?;

        let policy = CallPolicyConfig {
            call_timeout: self.call_timeout.unwrap_or(defaults.policy.call_timeout),
            confirmation_timeout: self
                .confirmation_timeout
                .unwrap_or(defaults.policy.confirmation_timeout),
            event_timeout: self.event_timeout.unwrap_or(defaults.policy.event_timeout),
            max_retries: self.max_retries.unwrap_or(defaults.policy.max_retries),
            retry_backoff: self.retry_backoff.unwrap_or(defaults.policy.retry_backoff),
            poll_interval: self.poll_interval.unwrap_or(defaults.policy.poll_interval),
        };
        Self::validate_policy(&policy)?;

        let display = DisplayConfig {
            balance_chars: self
                .balance_chars
                .unwrap_or(defaults.display.balance_chars),
        };
        if display.balance_chars == 0 {
            return Err(ConfigError::InvalidValue {
                var: "balance_display_chars".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(Config {
            wallet: WalletConfig {
                rpc_url: self.rpc_url,
            },
            chain: ChainConfig {
                chain_id: self.chain_id.unwrap_or(defaults.chain.chain_id),
                currency_symbol: self
                    .currency_symbol
                    .unwrap_or(defaults.chain.currency_symbol),
            },
            contract,
            policy,
            links,
            display,
        })
    }

    /// Validates timeout and retry configuration values.
    ///
    /// Checks:
    /// - call timeout is greater than 0 and not exceeding MAX_TIMEOUT_SECS
    /// - confirmation timeout is greater than 0 and not exceeding MAX_CONFIRMATION_TIMEOUT_SECS
    /// - max retries does not exceed MAX_MAX_RETRIES
    /// - poll interval is at least MIN_POLL_INTERVAL_MS
    fn validate_policy(policy: &CallPolicyConfig) -> Result<(), ConfigError> {
        if policy.call_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if policy.call_timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if policy.confirmation_timeout.is_zero()
            || policy.confirmation_timeout.as_secs() > MAX_CONFIRMATION_TIMEOUT_SECS
        {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "confirmation timeout must be between 1 and {} seconds",
                    MAX_CONFIRMATION_TIMEOUT_SECS
                ),
            });
        }

        if policy.event_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "event timeout must be greater than 0 seconds".to_string(),
            });
        }

        if policy.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, policy.max_retries
                ),
            });
        }

        if policy.poll_interval < Duration::from_millis(MIN_POLL_INTERVAL_MS) {
            return Err(ConfigError::InvalidValue {
                var: "poll_interval".to_string(),
                message: format!("must be at least {} ms", MIN_POLL_INTERVAL_MS),
            });
        }

        Ok(())
    }
}

/// Remove trailing slashes so link interpolation never produces `//`.
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn validate_url(var: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        var: var.to_string(),
        message: format!("not a valid URL ({e})"),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "URL scheme must be http or https".to_string(),
        });
    }

    Ok(())
}

fn validate_contract(contract: &ContractConfig) -> Result<(), ConfigError> {
    let hex = contract
        .address
        .strip_prefix("0x")
        .or_else(|| contract.address.strip_prefix("0X"));
    let valid = hex.is_some_and(|h| h.len() == 40 && h.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(ConfigError::InvalidContractAddress(contract.address.clone()));
    }

    for (var, signature) in [
        ("mint_function", &contract.mint_function),
        ("mint_event", &contract.mint_event),
    ] {
        let well_formed = signature.ends_with(')')
            && signature
                .find('(')
                .is_some_and(|open| open > 0 && !signature[..open].contains(char::is_whitespace));
        if !well_formed {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                message: format!("'{signature}' is not a signature like name(type,...)"),
            });
        }
    }

    Ok(())
}
