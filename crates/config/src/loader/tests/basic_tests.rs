//! Builder defaults and override tests.

use std::time::Duration;

use secrecy::ExposeSecret;

use crate::constants::{
    DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_CHAIN_ID, DEFAULT_CONTRACT_ADDRESS,
    DEFAULT_MARKETPLACE_BASE_URL, DEFAULT_MAX_RETRIES,
};
use crate::loader::builder::ConfigLoader;

#[test]
fn test_build_with_no_sources_uses_defaults() {
    let config = ConfigLoader::new().build().unwrap();

    assert!(config.wallet.rpc_url.is_none());
    assert_eq!(config.chain.chain_id, DEFAULT_CHAIN_ID);
    assert_eq!(config.contract.address, DEFAULT_CONTRACT_ADDRESS);
    assert_eq!(config.links.marketplace_base_url, DEFAULT_MARKETPLACE_BASE_URL);
    assert_eq!(
        config.policy.call_timeout,
        Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS)
    );
    assert_eq!(config.policy.max_retries, DEFAULT_MAX_RETRIES);
}

#[test]
fn test_builder_overrides() {
    let config = ConfigLoader::new()
        .with_rpc_url("http://127.0.0.1:8545".to_string())
        .with_chain_id(31337)
        .with_contract_address("0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string())
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(0)
        .with_poll_interval(Duration::from_millis(250))
        .build()
        .unwrap();

    assert_eq!(
        config.wallet.rpc_url.as_ref().unwrap().expose_secret(),
        "http://127.0.0.1:8545"
    );
    assert_eq!(config.chain.chain_id, 31337);
    assert_eq!(
        config.contract.address,
        "0x5FbDB2315678afecb367f032d93F642f64180aa3"
    );
    assert_eq!(config.policy.call_timeout, Duration::from_secs(5));
    assert_eq!(config.policy.max_retries, 0);
    assert_eq!(config.policy.poll_interval, Duration::from_millis(250));
}
