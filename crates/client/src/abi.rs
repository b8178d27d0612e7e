//! Minimal Solidity ABI helpers for the mint call and event.
//!
//! Responsibilities:
//! - Keccak-256 selectors for argument-less function signatures.
//! - Event topic hashes.
//! - Decoding the `(address, uint256)` mint event from log data or topics.
//! - Parsing JSON-RPC hex quantities.
//!
//! Does NOT handle:
//! - Encoding call arguments (the mint entry point takes none).
//! - Dynamic ABI types.

use sha3::{Digest, Keccak256};

use crate::error::{Result, WalletError};
use crate::models::{Account, MintEvent, TokenId};

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of the Keccak-256 hash of a function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// `0x`-prefixed call data invoking an argument-less function.
pub fn encode_call(signature: &str) -> String {
    format!("0x{}", hex::encode(function_selector(signature)))
}

/// `0x`-prefixed topic hash of an event signature.
pub fn event_topic(signature: &str) -> String {
    format!("0x{}", hex::encode(keccak256(signature.as_bytes())))
}

/// Parse a `0x`-prefixed hex quantity. `0x` alone is zero.
pub fn parse_hex_quantity(quantity: &str) -> Result<u128> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| WalletError::InvalidResponse(format!("expected hex quantity, got '{quantity}'")))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| WalletError::InvalidResponse(format!("invalid hex quantity '{quantity}': {e}")))
}

/// Decode a `0x`-prefixed hex string into 32-byte words.
fn decode_words(data: &str) -> Result<Vec<[u8; 32]>> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    let bytes = hex::decode(digits)
        .map_err(|e| WalletError::InvalidResponse(format!("invalid log data: {e}")))?;
    if bytes.len() % 32 != 0 {
        return Err(WalletError::InvalidResponse(format!(
            "log data is {} bytes, not a multiple of 32",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(32)
        .map(|chunk| {
            let mut word = [0u8; 32];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

fn word_to_token_id(word: &[u8; 32]) -> Result<TokenId> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(WalletError::InvalidResponse(
            "token id does not fit in 64 bits".to_string(),
        ));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    Ok(TokenId(u64::from_be_bytes(low)))
}

/// Decode a mint event log.
///
/// `topics[0]` is the event topic. When both parameters are indexed they
/// appear in `topics[1..3]`; otherwise they are the first two data words.
pub fn decode_mint_event(topics: &[String], data: &str) -> Result<MintEvent> {
    let words = if topics.len() >= 3 {
        topics[1..3]
            .iter()
            .map(|topic| decode_words(topic))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect()
    } else {
        decode_words(data)?
    };

    match words.as_slice() {
        [from, token, ..] => Ok(MintEvent {
            from: Account::from_word(from),
            token_id: word_to_token_id(token)?,
        }),
        _ => Err(WalletError::InvalidResponse(
            "mint event carries fewer than two words".to_string(),
        )),
    }
}
