//! # kas-wallet
//!
//! Treasury wallet for Kaspa: fetches the treasury's unspent outputs,
//! selects inputs largest-first, builds payment and change outputs, signs
//! every input with Schnorr and submits the transaction.
//!
//! The wallet performs no retries and no UTXO reservation. Callers that need
//! exactly-once spending must serialize sends per source address.

pub mod amount;
pub mod config;
pub mod error;
pub mod selection;
pub mod wallet;

#[cfg(test)]
mod tests;

pub use amount::{format_sompi, parse_kas, SOMPI_PER_KAS};
pub use config::{FeePolicy, TreasuryConfig, WalletConfig};
pub use error::WalletError;
pub use selection::{select_utxos, Selection};
pub use wallet::{BuiltTransaction, TreasuryWallet};
