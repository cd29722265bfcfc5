//! Spendable outputs as reported by the network.

use kas_script::ScriptPublicKey;

use crate::input::TransactionOutpoint;

/// The state of an unspent output that a signature commits to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtxoEntry {
    /// Amount in sompi.
    pub amount: u64,
    /// The output's own locking script.
    pub script_public_key: ScriptPublicKey,
    /// DAA score of the block that created the output.
    pub block_daa_score: u64,
    /// Whether the output was created by a coinbase transaction.
    pub is_coinbase: bool,
}

/// An unspent output together with the outpoint that identifies it.
///
/// Fetched read-only from the network and consumed exactly once as an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnspentOutput {
    pub outpoint: TransactionOutpoint,
    pub entry: UtxoEntry,
}

impl UnspentOutput {
    pub fn new(outpoint: TransactionOutpoint, entry: UtxoEntry) -> Self {
        UnspentOutput { outpoint, entry }
    }

    /// Amount in sompi.
    pub fn amount(&self) -> u64 {
        self.entry.amount
    }
}
