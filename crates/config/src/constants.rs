//! Centralized constants for the mintwizard workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Chain & Contract Defaults
// =============================================================================

/// Default target chain id (Rinkeby test network).
pub const DEFAULT_CHAIN_ID: u64 = 4;

/// Default address of the deployed mint contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xDB93165f586eA309A8008580520114b1f8fB8Bf9";

/// Default signature of the contract's mint entry point.
pub const DEFAULT_MINT_FUNCTION: &str = "mint()";

/// Default signature of the contract's mint-completion event.
pub const DEFAULT_MINT_EVENT: &str = "DraftDayNFTMinted(address,uint256)";

/// Default native currency symbol used when displaying balances.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "ETH";

/// Number of leading characters of the formatted balance that are displayed.
pub const DEFAULT_BALANCE_DISPLAY_CHARS: usize = 5;

// =============================================================================
// Link Defaults
// =============================================================================

/// Default marketplace base URL for token pages.
pub const DEFAULT_MARKETPLACE_BASE_URL: &str = "https://testnets.opensea.io/assets";

/// Default block explorer base URL for transaction pages.
pub const DEFAULT_EXPLORER_TX_BASE_URL: &str = "https://rinkeby.etherscan.io/tx";

/// Wallet extension download page.
pub const WALLET_DOWNLOAD_URL: &str = "https://metamask.io/download.html";

/// Wallet mobile app link for iOS.
pub const WALLET_IOS_URL: &str = "https://metamask.app.link/skAH3BaF99";

/// Wallet mobile app link for Android.
pub const WALLET_ANDROID_URL: &str = "https://metamask.app.link/bxwkE8oF99";

// =============================================================================
// Call Policy Defaults
// =============================================================================

/// Default timeout for a single wallet/provider call in seconds.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Default timeout for waiting on a mint transaction confirmation in seconds.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 600;

/// Default time to wait for the mint-completion event after confirmation.
pub const DEFAULT_EVENT_TIMEOUT_SECS: u64 = 60;

/// Default number of retries for transient transport failures.
pub const DEFAULT_MAX_RETRIES: usize = 1;

/// Default backoff before a retry in milliseconds.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Default polling interval for receipts and event logs in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

// =============================================================================
// Configuration Bounds
// =============================================================================

/// Maximum allowed call timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed confirmation timeout in seconds (24 hours).
pub const MAX_CONFIRMATION_TIMEOUT_SECS: u64 = 86400;

/// Maximum allowed retry count. The call policy is a single bounded retry by default.
pub const MAX_MAX_RETRIES: usize = 5;

/// Minimum polling interval in milliseconds.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;
