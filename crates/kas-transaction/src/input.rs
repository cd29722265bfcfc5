//! Transaction input referencing a previous output.
//!
//! An input names the outpoint it spends, carries the signature script that
//! authorizes the spend, and commits to a sequence number and sig-op count.

use kas_primitives::chainhash::TransactionId;
use kas_primitives::util::KasWriter;
use serde::{Deserialize, Serialize};

/// Sequence number used for plain transfers.
pub const DEFAULT_SEQUENCE: u64 = 0;

/// Sig-op count of a single pay-to-pubkey input.
pub const DEFAULT_SIG_OP_COUNT: u8 = 1;

/// Reference to a specific output of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    /// Id of the transaction holding the output.
    pub transaction_id: TransactionId,
    /// Output index within that transaction.
    pub index: u32,
}

impl TransactionOutpoint {
    /// Create a new outpoint.
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        TransactionOutpoint { transaction_id, index }
    }

    /// Append `txid(32) || u32le(index)` to the writer.
    pub fn write_to(&self, writer: &mut KasWriter) {
        writer
            .write_bytes(self.transaction_id.as_bytes())
            .write_u32_le(self.index);
    }
}

/// A single input in a Kaspa transaction.
///
/// | Field              | Hashed as        |
/// |--------------------|------------------|
/// | previous_outpoint  | 32 bytes + u32le |
/// | signature_script   | var_bytes        |
/// | sequence           | u64le            |
/// | sig_op_count       | u8               |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The output being spent.
    pub previous_outpoint: TransactionOutpoint,

    /// The signature script; empty until the input is signed.
    pub signature_script: Vec<u8>,

    /// Sequence number. Plain transfers use 0.
    pub sequence: u64,

    /// Number of signature operations the input performs.
    pub sig_op_count: u8,
}

impl TransactionInput {
    /// Create an unsigned input with an empty signature script.
    pub fn new(previous_outpoint: TransactionOutpoint, sequence: u64, sig_op_count: u8) -> Self {
        TransactionInput {
            previous_outpoint,
            signature_script: Vec::new(),
            sequence,
            sig_op_count,
        }
    }

    /// Create an unsigned input with sequence 0 and one sig-op.
    pub fn from_outpoint(previous_outpoint: TransactionOutpoint) -> Self {
        Self::new(previous_outpoint, DEFAULT_SEQUENCE, DEFAULT_SIG_OP_COUNT)
    }

    /// Whether a signature script has been attached.
    pub fn is_signed(&self) -> bool {
        !self.signature_script.is_empty()
    }
}
