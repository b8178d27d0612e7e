//! Wallet session and stepper for the mintwizard onboarding flow.
//!
//! This crate provides the four-stage wizard stepper, the wallet/contract
//! session that drives it, the capability traits the session is injected
//! with, and a JSON-RPC implementation of those traits.

pub mod abi;
pub mod error;
pub mod links;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod policy;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod stage;
pub mod stepper;
pub mod tracing;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use error::{Result, WalletError};
pub use links::{WALLET_ACQUISITION, WalletAcquisitionLinks};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    Account, Balance, MIN_GAS_BALANCE, MintEvent, MintResult, TokenId, TxHash, TxReceipt, Wei,
};
pub use policy::{CallPolicy, Retry};
pub use provider::{ContractSpec, MintContract, MintEventSink, Subscription, WalletProvider};
pub use rpc::{JsonRpcWallet, JsonRpcWalletBuilder};
pub use session::{MintOutcome, SessionSnapshot, SessionState, WizardSession, WizardSessionBuilder};
pub use stage::Stage;
pub use stepper::Stepper;
pub use tracing::{TracingConfig, TracingError, TracingGuard};
