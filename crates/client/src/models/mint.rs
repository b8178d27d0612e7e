//! Mint transaction and event types.

use std::fmt;

use crate::error::{Result, WalletError};
use crate::models::Account;

/// Token identifier assigned by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(String);

impl TxHash {
    /// Validate a `0x`-prefixed hex transaction hash.
    pub fn parse(hash: &str) -> Result<Self> {
        let valid = hash
            .strip_prefix("0x")
            .is_some_and(|h| !h.is_empty() && h.chars().all(|c| c.is_ascii_hexdigit()));
        if !valid {
            return Err(WalletError::InvalidResponse(format!(
                "malformed transaction hash '{hash}'"
            )));
        }
        Ok(Self(hash.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confirmation of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
}

/// A decoded mint-completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintEvent {
    /// Account the token was minted for.
    pub from: Account,
    pub token_id: TokenId,
}

/// Outcome of a successful mint, populated from the mint event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintResult {
    pub token_id: TokenId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_validation() {
        assert!(TxHash::parse("0xabc123").is_ok());
        assert!(TxHash::parse("abc123").is_err());
        assert!(TxHash::parse("0x").is_err());
        assert!(TxHash::parse("0xnothex").is_err());
    }

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId(42).to_string(), "42");
    }
}
