//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;
pub mod file_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, cleared so host settings cannot leak into tests.
pub const LOADER_VARS: &[&str] = &[
    "MINTWIZARD_RPC_URL",
    "MINTWIZARD_CHAIN_ID",
    "MINTWIZARD_CURRENCY_SYMBOL",
    "MINTWIZARD_CONTRACT_ADDRESS",
    "MINTWIZARD_MINT_FUNCTION",
    "MINTWIZARD_MINT_EVENT",
    "MINTWIZARD_MARKETPLACE_URL",
    "MINTWIZARD_EXPLORER_TX_URL",
    "MINTWIZARD_TIMEOUT",
    "MINTWIZARD_CONFIRMATION_TIMEOUT",
    "MINTWIZARD_EVENT_TIMEOUT",
    "MINTWIZARD_MAX_RETRIES",
    "MINTWIZARD_RETRY_BACKOFF_MS",
    "MINTWIZARD_POLL_INTERVAL_MS",
    "MINTWIZARD_BALANCE_DISPLAY_CHARS",
    "MINTWIZARD_CONFIG_PATH",
];

/// Run `f` with all loader variables unset except the given overrides.
pub fn with_loader_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = LOADER_VARS
        .iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| *value);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}
