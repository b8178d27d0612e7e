//! Presentational link bases and display settings.

use crate::constants::{
    DEFAULT_BALANCE_DISPLAY_CHARS, DEFAULT_EXPLORER_TX_BASE_URL, DEFAULT_MARKETPLACE_BASE_URL,
};

/// Base URLs used to build marketplace and explorer links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinksConfig {
    /// Marketplace base; token pages live at `{base}/{contract}/{token_id}`.
    pub marketplace_base_url: String,
    /// Explorer base; transaction pages live at `{base}/{tx_hash}`.
    pub explorer_tx_base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            marketplace_base_url: DEFAULT_MARKETPLACE_BASE_URL.to_string(),
            explorer_tx_base_url: DEFAULT_EXPLORER_TX_BASE_URL.to_string(),
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Number of leading characters of the formatted balance to show.
    pub balance_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            balance_chars: DEFAULT_BALANCE_DISPLAY_CHARS,
        }
    }
}
