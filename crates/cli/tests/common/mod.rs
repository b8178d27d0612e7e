//! Shared test utilities for mintwizard integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Answer JSON-RPC calls from a `wiremock` server.
//!
//! Invariants / Assumptions:
//! - Every `MINTWIZARD_*` variable from the host is cleared.
//! - The config file is an empty fixture, so defaults apply unless a test overrides them.

use assert_cmd::Command;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOST_VARS: &[&str] = &[
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
    "MINTWIZARD_OTLP_ENDPOINT",
    "MINTWIZARD_METRICS_BIND",
    "RUST_LOG",
];

/// Returns a hermetic `mintwizard` command for integration testing.
pub fn mintwizard_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mintwizard");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env(
        "MINTWIZARD_CONFIG_PATH",
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/empty_config.json"),
    );
    for var in HOST_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic command pointed at a JSON-RPC endpoint.
#[allow(dead_code)]
pub fn mintwizard_cmd_with_rpc(rpc_url: &str) -> Command {
    let mut cmd = mintwizard_cmd();
    cmd.env("MINTWIZARD_RPC_URL", rpc_url)
        .env("MINTWIZARD_POLL_INTERVAL_MS", "100")
        .env("MINTWIZARD_EVENT_TIMEOUT", "10");
    cmd
}

/// Respond to every JSON-RPC call of `rpc_method` with `result`.
#[allow(dead_code)]
pub async fn mount_result(server: &MockServer, rpc_method: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result,
        })))
        .mount(server)
        .await;
}

/// Respond to every JSON-RPC call of `rpc_method` with an error object.
#[allow(dead_code)]
pub async fn mount_error(server: &MockServer, rpc_method: &str, code: i64, message: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": code, "message": message },
        })))
        .mount(server)
        .await;
}
