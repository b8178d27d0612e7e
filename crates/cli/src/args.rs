//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load configuration (see `main()`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mintwizard")]
#[command(about = "mintwizard - Connect a wallet, fund it and mint an NFT", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  mintwizard run\n  mintwizard --rpc-url http://localhost:8545 run --yes\n  mintwizard status --json\n  mintwizard balance\n  mintwizard links --token-id 42\n"
)]
pub struct Cli {
    /// JSON-RPC endpoint of the wallet (e.g., http://localhost:8545)
    #[arg(long, global = true, env = "MINTWIZARD_RPC_URL", hide_env_values = true)]
    pub rpc_url: Option<String>,

    /// Chain the wallet is switched to before minting
    #[arg(long, global = true, env = "MINTWIZARD_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Address of the mint contract
    #[arg(long, global = true, env = "MINTWIZARD_CONTRACT_ADDRESS")]
    pub contract: Option<String>,

    /// Timeout for individual wallet calls in seconds
    #[arg(long, global = true, env = "MINTWIZARD_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for transient transport failures
    #[arg(long, global = true, env = "MINTWIZARD_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Path to a custom configuration file (overrides default location).
    ///
    /// Can also be set via MINTWIZARD_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "MINTWIZARD_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Suppress all progress output (spinners).
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// OTLP collector endpoint for exporting traces (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "MINTWIZARD_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, env = "MINTWIZARD_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the wizard: connect, fund, mint
    Run {
        /// Answer yes to every prompt (non-interactive)
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the wizard stage, connection state and balance
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the balance of the authorized account
    Balance,

    /// Print marketplace, explorer or wallet download links
    Links {
        /// Token id whose marketplace page to print
        #[arg(long)]
        token_id: Option<u64>,

        /// Transaction hash whose explorer page to print
        #[arg(long, value_name = "HASH", conflicts_with = "token_id")]
        tx: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mintwizard",
            "run",
            "--yes",
            "--chain-id",
            "11155111",
            "--quiet",
        ])
        .unwrap();

        assert_eq!(cli.chain_id, Some(11155111));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Run { yes: true }));
    }

    #[test]
    fn test_links_token_and_tx_conflict() {
        let result = Cli::try_parse_from([
            "mintwizard",
            "links",
            "--token-id",
            "1",
            "--tx",
            "0xabc",
        ]);
        assert!(result.is_err());
    }
}
