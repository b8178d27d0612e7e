//! JSON config file loading.
//!
//! Responsibilities:
//! - Resolve the config file path (explicit path or platform default).
//! - Parse the JSON file and fill unset loader fields.
//!
//! Invariants:
//! - File values never overwrite values already set by env vars or builder methods.
//! - A missing file at the default location is silently skipped; a missing file at an
//!   explicitly configured path is an error.
//! - Parse errors report the path only, never file contents.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::paths::default_config_path;

/// On-disk representation of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
    pub currency_symbol: Option<String>,
    pub contract_address: Option<String>,
    pub mint_function: Option<String>,
    pub mint_event: Option<String>,
    pub marketplace_base_url: Option<String>,
    pub explorer_tx_base_url: Option<String>,
    pub call_timeout_secs: Option<u64>,
    pub confirmation_timeout_secs: Option<u64>,
    pub event_timeout_secs: Option<u64>,
    pub max_retries: Option<usize>,
    pub retry_backoff_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub balance_display_chars: Option<usize>,
}

pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Apply config file values to the loader without overriding values already set.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let (path, explicit) = match loader.config_path() {
        Some(path) => (path.clone(), true),
        None => (default_config_path()?, false),
    };

    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "No config file at default location");
        return Ok(());
    }

    let file = read_config_file(&path)?;
    tracing::debug!(path = %path.display(), "Loaded config file");

    fill(
        &mut loader.rpc_url,
        file.rpc_url.map(|url| SecretString::new(url.into())),
    );
    fill(&mut loader.chain_id, file.chain_id);
    fill(&mut loader.currency_symbol, file.currency_symbol);
    fill(&mut loader.contract_address, file.contract_address);
    fill(&mut loader.mint_function, file.mint_function);
    fill(&mut loader.mint_event, file.mint_event);
    fill(&mut loader.marketplace_base_url, file.marketplace_base_url);
    fill(&mut loader.explorer_tx_base_url, file.explorer_tx_base_url);
    fill(
        &mut loader.call_timeout,
        file.call_timeout_secs.map(Duration::from_secs),
    );
    fill(
        &mut loader.confirmation_timeout,
        file.confirmation_timeout_secs.map(Duration::from_secs),
    );
    fill(
        &mut loader.event_timeout,
        file.event_timeout_secs.map(Duration::from_secs),
    );
    fill(&mut loader.max_retries, file.max_retries);
    fill(
        &mut loader.retry_backoff,
        file.retry_backoff_ms.map(Duration::from_millis),
    );
    fill(
        &mut loader.poll_interval,
        file.poll_interval_ms.map(Duration::from_millis),
    );
    fill(&mut loader.balance_chars, file.balance_display_chars);

    Ok(())
}
