//! Marketplace, explorer and wallet acquisition links.

use mintwizard_config::LinksConfig;
use mintwizard_config::constants::{WALLET_ANDROID_URL, WALLET_DOWNLOAD_URL, WALLET_IOS_URL};

use crate::models::{TokenId, TxHash};

/// Where to get a wallet when none is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletAcquisitionLinks {
    pub desktop: &'static str,
    pub ios: &'static str,
    pub android: &'static str,
}

/// Default wallet download locations.
pub const WALLET_ACQUISITION: WalletAcquisitionLinks = WalletAcquisitionLinks {
    desktop: WALLET_DOWNLOAD_URL,
    ios: WALLET_IOS_URL,
    android: WALLET_ANDROID_URL,
};

impl WalletAcquisitionLinks {
    /// Message shown when no wallet provider is available.
    pub fn message(&self) -> String {
        format!(
            "No wallet detected. Install a wallet to continue:\n  Desktop: {}\n  iOS:     {}\n  Android: {}",
            self.desktop, self.ios, self.android
        )
    }
}

/// Token page on the marketplace: `{base}/{contract}/{token_id}`.
pub fn marketplace_url(links: &LinksConfig, contract: &str, token_id: TokenId) -> String {
    format!(
        "{}/{}/{}",
        links.marketplace_base_url.trim_end_matches('/'),
        contract,
        token_id
    )
}

/// Transaction page on the block explorer: `{base}/{tx_hash}`.
pub fn explorer_tx_url(links: &LinksConfig, tx: &TxHash) -> String {
    format!(
        "{}/{}",
        links.explorer_tx_base_url.trim_end_matches('/'),
        tx
    )
}
