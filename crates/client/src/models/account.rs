//! Wallet account addresses.

use std::fmt;

use crate::error::{Result, WalletError};

/// A `0x`-prefixed 20-byte hex address.
///
/// The original casing is preserved for display; equality ignores case so
/// checksummed and lowercase forms of the same address match.
#[derive(Debug, Clone, Eq)]
pub struct Account(String);

impl Account {
    /// Validate and wrap an address string.
    pub fn parse(address: &str) -> Result<Self> {
        let trimmed = address.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| WalletError::InvalidAddress(address.to_string()))?;

        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidAddress(address.to_string()));
        }

        Ok(Self(format!("0x{hex_part}")))
    }

    /// Build an account from the low 20 bytes of a 32-byte ABI word.
    pub(crate) fn from_word(word: &[u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(&word[12..])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form, e.g. `0x5B38...ddC4`.
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
