/// Kaspa SDK - Transaction model, signature hashing, and signing.
///
/// Provides the Transaction type with inputs, outputs and spent UTXO
/// entries, the domain-separated BLAKE2b signature hash (SIGHASH_ALL),
/// Schnorr signing through an explicit `SigningContext`, the local
/// transaction id, and the JSON wire model used for submission.

pub mod transaction;
pub mod input;
pub mod output;
pub mod utxo;
pub mod sighash;
pub mod signing;
pub mod template;
pub mod rpc;

mod error;
pub use error::TransactionError;
pub use transaction::{SubnetworkId, Transaction, SUBNETWORK_ID_NATIVE};
pub use input::{TransactionInput, TransactionOutpoint};
pub use output::TransactionOutput;
pub use utxo::{UnspentOutput, UtxoEntry};
pub use signing::SigningContext;
