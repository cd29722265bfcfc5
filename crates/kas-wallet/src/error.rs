//! Error taxonomy for treasury sends.

use kas_rest::RestError;
use kas_script::ScriptError;
use kas_transaction::TransactionError;

/// Errors surfaced by the treasury wallet.
///
/// Display strings carry the specifics an operator needs: amounts for
/// funding problems and variable names for configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Missing or invalid configuration. Raised before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The source address has no spendable outputs.
    #[error("no UTXOs available for {0}")]
    NoUtxosAvailable(String),

    /// The UTXO set cannot cover amount plus fee.
    #[error("insufficient funds: available {available} sompi, needed {needed} sompi")]
    InsufficientFunds { available: u64, needed: u64 },

    /// The address version is neither pay-to-pubkey nor pay-to-script-hash.
    #[error("unsupported address version {0}")]
    UnsupportedAddressVersion(u8),

    /// Malformed address string.
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// Address does not belong to the wallet's network.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A decimal amount string could not be parsed.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    /// The node refused the transaction.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// Transport failure. The transaction's fate is unknown; reconcile
    /// against address history before retrying.
    #[error("network error: {0}")]
    Network(String),

    /// Building or signing the transaction failed.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

impl From<ScriptError> for WalletError {
    fn from(e: ScriptError) -> Self {
        match e {
            ScriptError::UnsupportedAddressVersion(v) => WalletError::UnsupportedAddressVersion(v),
            ScriptError::Bech32(inner) => WalletError::Bech32Decode(inner.to_string()),
            other => WalletError::InvalidAddress(other.to_string()),
        }
    }
}

impl From<RestError> for WalletError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Rejected(reason) => WalletError::SubmissionRejected(reason),
            other => WalletError::Network(other.to_string()),
        }
    }
}
