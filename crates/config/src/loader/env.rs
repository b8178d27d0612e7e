//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `MINTWIZARD_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_var<T: FromStr>(key: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|value| {
            value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: message.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over config file values.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("MINTWIZARD_RPC_URL") {
        loader.rpc_url = Some(SecretString::new(url.into()));
    }
    if let Some(chain_id) = parse_var::<u64>("MINTWIZARD_CHAIN_ID", "must be a number")? {
        loader.chain_id = Some(chain_id);
    }
    if let Some(symbol) = env_var_or_none("MINTWIZARD_CURRENCY_SYMBOL") {
        loader.currency_symbol = Some(symbol);
    }
    if let Some(address) = env_var_or_none("MINTWIZARD_CONTRACT_ADDRESS") {
        loader.contract_address = Some(address);
    }
    if let Some(function) = env_var_or_none("MINTWIZARD_MINT_FUNCTION") {
        loader.mint_function = Some(function);
    }
    if let Some(event) = env_var_or_none("MINTWIZARD_MINT_EVENT") {
        loader.mint_event = Some(event);
    }
    if let Some(url) = env_var_or_none("MINTWIZARD_MARKETPLACE_URL") {
        loader.marketplace_base_url = Some(url);
    }
    if let Some(url) = env_var_or_none("MINTWIZARD_EXPLORER_TX_URL") {
        loader.explorer_tx_base_url = Some(url);
    }
    if let Some(secs) = parse_var::<u64>("MINTWIZARD_TIMEOUT", "must be a number")? {
        loader.call_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(secs) = parse_var::<u64>("MINTWIZARD_CONFIRMATION_TIMEOUT", "must be a number")? {
        loader.confirmation_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(secs) = parse_var::<u64>("MINTWIZARD_EVENT_TIMEOUT", "must be a number")? {
        loader.event_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(retries) = parse_var::<usize>(
        "MINTWIZARD_MAX_RETRIES",
        "must be a non-negative integer",
    )? {
        loader.max_retries = Some(retries);
    }
    if let Some(ms) = parse_var::<u64>("MINTWIZARD_RETRY_BACKOFF_MS", "must be a number")? {
        loader.retry_backoff = Some(Duration::from_millis(ms));
    }
    if let Some(ms) = parse_var::<u64>("MINTWIZARD_POLL_INTERVAL_MS", "must be a number")? {
        loader.poll_interval = Some(Duration::from_millis(ms));
    }
    if let Some(chars) = parse_var::<usize>(
        "MINTWIZARD_BALANCE_DISPLAY_CHARS",
        "must be a positive integer",
    )? {
        loader.balance_chars = Some(chars);
    }

    // Config path from environment (only if not already set via CLI)
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none("MINTWIZARD_CONFIG_PATH")
    {
        loader.config_path = Some(std::path::PathBuf::from(config_path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        temp_env::with_vars(
            [
                ("MINTWIZARD_TEST_EMPTY", Some("")),
                ("MINTWIZARD_TEST_SPACES", Some("   ")),
                ("MINTWIZARD_TEST_PADDED", Some("  value  ")),
                ("MINTWIZARD_TEST_PLAIN", Some("value")),
            ],
            || {
                assert_eq!(env_var_or_none("MINTWIZARD_TEST_EMPTY"), None);
                assert_eq!(env_var_or_none("MINTWIZARD_TEST_SPACES"), None);
                assert_eq!(
                    env_var_or_none("MINTWIZARD_TEST_PADDED"),
                    Some("value".to_string())
                );
                assert_eq!(
                    env_var_or_none("MINTWIZARD_TEST_PLAIN"),
                    Some("value".to_string())
                );
                assert_eq!(env_var_or_none("MINTWIZARD_TEST_UNSET_VARIABLE"), None);
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_number_reports_variable_name() {
        temp_env::with_var("MINTWIZARD_CHAIN_ID", Some("four"), || {
            let mut loader = ConfigLoader::new();
            let err = apply_env(&mut loader).unwrap_err();
            match err {
                ConfigError::InvalidValue { var, .. } => assert_eq!(var, "MINTWIZARD_CHAIN_ID"),
                other => panic!("unexpected error: {other}"),
            }
        });
    }
}
