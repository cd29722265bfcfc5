//! Script templates for standard transaction types.
//!
//! Provides the `UnlockingScriptTemplate` trait and a pay-to-pubkey
//! implementation that produces Schnorr signature scripts.

pub mod p2pk;

use crate::sighash::SighashCache;
use crate::transaction::Transaction;
use crate::utxo::UtxoEntry;
use crate::TransactionError;

/// Trait for script templates that produce signature scripts.
///
/// The `sign` method receives the transaction, the spent entries and the
/// input index, computes the signature hash, signs it, and returns the
/// signature script for that input.
pub trait UnlockingScriptTemplate {
    /// Produce a signature script for the given input.
    ///
    /// # Arguments
    /// * `tx` - The transaction being signed.
    /// * `entries` - Spent UTXO entries, one per input.
    /// * `input_index` - The index of the input to sign.
    /// * `cache` - Sub-hashes shared by all inputs of `tx`.
    ///
    /// # Returns
    /// The signature script bytes, or an error on failure.
    fn sign(
        &self,
        tx: &Transaction,
        entries: &[UtxoEntry],
        input_index: usize,
        cache: &SighashCache,
    ) -> Result<Vec<u8>, TransactionError>;

    /// Byte length of the signature script this template produces.
    fn estimate_length(&self) -> usize;
}
