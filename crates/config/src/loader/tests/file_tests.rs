//! Config file loading tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

use super::{env_lock, with_loader_env};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

pub fn write_config_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_file_values_are_applied() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(
        temp_dir.path(),
        r#"{
            "rpc_url": "http://127.0.0.1:8545",
            "chain_id": 31337,
            "marketplace_base_url": "https://market.example/assets/",
            "call_timeout_secs": 7,
            "max_retries": 2
        }"#,
    );

    with_loader_env(&[], || {
        let config = ConfigLoader::new()
            .with_config_path(path.clone())
            .from_env()
            .unwrap()
            .from_file()
            .unwrap()
            .build()
            .unwrap();

        assert!(config.has_wallet());
        assert_eq!(config.chain.chain_id, 31337);
        // Trailing slash is normalized away.
        assert_eq!(
            config.links.marketplace_base_url,
            "https://market.example/assets"
        );
        assert_eq!(config.policy.call_timeout, Duration::from_secs(7));
        assert_eq!(config.policy.max_retries, 2);
    });
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "chain_id": 31337 }"#);

    with_loader_env(&[("MINTWIZARD_CHAIN_ID", "5")], || {
        let config = ConfigLoader::new()
            .with_config_path(path.clone())
            .from_env()
            .unwrap()
            .from_file()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.chain.chain_id, 5);
    });
}

#[test]
#[serial]
fn test_config_path_from_env() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "currency_symbol": "tETH" }"#);
    let path_str = path.to_string_lossy().to_string();

    with_loader_env(&[("MINTWIZARD_CONFIG_PATH", path_str.as_str())], || {
        let config = ConfigLoader::new()
            .from_env()
            .unwrap()
            .from_file()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.chain.currency_symbol, "tETH");
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("missing.json"))
        .from_file();
    assert!(matches!(result, Err(ConfigError::ConfigFileRead { .. })));
}

#[test]
fn test_unknown_field_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "base_url": "https://x" }"#);
    let result = ConfigLoader::new().with_config_path(path).from_file();
    assert!(matches!(result, Err(ConfigError::ConfigFileParse { .. })));
}
