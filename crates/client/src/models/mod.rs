//! Data models for wallet and mint state.

mod account;
mod balance;
mod mint;

pub use account::Account;
pub use balance::{Balance, MIN_GAS_BALANCE, Wei, format_ether};
pub use mint::{MintEvent, MintResult, TokenId, TxHash, TxReceipt};
