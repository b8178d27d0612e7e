//! Native currency amounts.

use std::fmt;

use crate::error::{Result, WalletError};

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Balance recommended before minting, to cover gas (0.025 ether).
pub const MIN_GAS_BALANCE: Wei = Wei(25_000_000_000_000_000);

/// An amount in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Wei(pub u128);

impl Wei {
    /// Parse a JSON-RPC hex quantity such as `0x1bc16d674ec80000`.
    pub fn from_hex_quantity(quantity: &str) -> Result<Self> {
        crate::abi::parse_hex_quantity(quantity).map(Wei)
    }
}

/// Format a wei amount as ether.
///
/// Trailing fractional zeros are trimmed but at least one fractional digit
/// is kept, so one ether renders as `1.0`.
pub fn format_ether(wei: Wei) -> String {
    let whole = wei.0 / WEI_PER_ETHER;
    let fraction = format!("{:018}", wei.0 % WEI_PER_ETHER);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}

/// A formatted account balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    wei: Wei,
    display: String,
}

impl Balance {
    /// Placeholder shown before the first balance query.
    pub fn initial(currency_symbol: &str) -> Self {
        Self {
            wei: Wei::default(),
            display: format!("0.000 {currency_symbol}"),
        }
    }

    /// Format `wei` as ether truncated to `max_chars` characters, followed by
    /// the currency symbol.
    pub fn from_wei(wei: Wei, max_chars: usize, currency_symbol: &str) -> Self {
        let ether = format_ether(wei);
        let truncated: String = ether.chars().take(max_chars).collect();
        Self {
            wei,
            display: format!("{truncated} {currency_symbol}"),
        }
    }

    pub fn wei(&self) -> Wei {
        self.wei
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Whether the balance reaches [`MIN_GAS_BALANCE`].
    pub fn covers_min_gas(&self) -> bool {
        self.wei >= MIN_GAS_BALANCE
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl TryFrom<&str> for Wei {
    type Error = WalletError;

    fn try_from(value: &str) -> Result<Self> {
        Wei::from_hex_quantity(value)
    }
}
