//! Common test utilities for integration tests.
//!
//! Shared helpers for building sessions around the mock wallet and for
//! answering JSON-RPC calls from a `wiremock` server.
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use std::sync::Arc;
use std::time::Duration;

use mintwizard_client::{CallPolicy, WizardSession, WalletProvider};
use mintwizard_config::CallPolicyConfig;
use serde_json::{Value, json};

#[allow(unused_imports)]
pub use mintwizard_client::testing::{
    Failure, MockContract, MockWallet, OTHER_ACCOUNT, TEST_ACCOUNT, account, test_account,
};
#[allow(unused_imports)]
pub use wiremock::matchers::{body_partial_json, method};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Short deadlines so paused-clock tests resolve quickly.
#[allow(dead_code)]
pub fn fast_policy() -> CallPolicy {
    CallPolicy::from_config(&CallPolicyConfig {
        call_timeout: Duration::from_secs(5),
        confirmation_timeout: Duration::from_secs(30),
        event_timeout: Duration::from_secs(2),
        max_retries: 1,
        retry_backoff: Duration::from_millis(10),
        poll_interval: Duration::from_millis(100),
    })
}

/// Session driven by `wallet`, returned alongside it for inspection.
#[allow(dead_code)]
pub fn session_with(wallet: MockWallet) -> (Arc<WizardSession>, Arc<MockWallet>) {
    let wallet = Arc::new(wallet);
    let provider: Arc<dyn WalletProvider> = wallet.clone();
    let session = WizardSession::builder()
        .provider(provider)
        .policy(fast_policy())
        .build();
    (Arc::new(session), wallet)
}

/// Respond to every JSON-RPC call of `rpc_method` with `result`.
#[allow(dead_code)]
pub async fn mount_result(server: &MockServer, rpc_method: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": result,
            })),
        )
        .mount(server)
        .await;
}

/// Respond to every JSON-RPC call of `rpc_method` with an error object.
#[allow(dead_code)]
pub async fn mount_error(server: &MockServer, rpc_method: &str, code: i64, message: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": code, "message": message },
            })),
        )
        .mount(server)
        .await;
}

/// 32-byte ABI word holding `bytes` right-aligned, hex encoded without prefix.
#[allow(dead_code)]
pub fn word(bytes: &[u8]) -> String {
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    hex::encode(word)
}
