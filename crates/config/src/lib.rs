//! Configuration management for mintwizard.
//!
//! This crate provides the typed configuration for the onboarding wizard
//! (wallet endpoint, target chain, contract, links and call policy) and a
//! layered loader reading a JSON file, environment variables and `.env`.

pub mod constants;
mod loader;
mod paths;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use paths::default_config_path;
pub use types::{
    CallPolicyConfig, ChainConfig, Config, ContractConfig, DisplayConfig, LinksConfig,
    WalletConfig,
};
