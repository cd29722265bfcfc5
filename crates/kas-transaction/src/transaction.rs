//! Core transaction type for the Kaspa network.
//!
//! Represents a complete transaction with version, inputs, outputs, lock
//! time, subnetwork, gas and payload. Provides the local transaction id and
//! helpers used when assembling a transfer.

use kas_primitives::chainhash::TransactionId;
use kas_primitives::hash::DomainHasher;
use kas_primitives::util::KasWriter;

use crate::input::TransactionInput;
use crate::output::TransactionOutput;

/// Transaction format version used by plain transfers.
pub const TX_VERSION: u16 = 0;

/// Length of a subnetwork id in bytes.
pub const SUBNETWORK_ID_SIZE: usize = 20;

/// A 20-byte subnetwork identifier.
pub type SubnetworkId = [u8; SUBNETWORK_ID_SIZE];

/// The native subnetwork, used for plain value transfers.
pub const SUBNETWORK_ID_NATIVE: SubnetworkId = [0u8; SUBNETWORK_ID_SIZE];

/// A Kaspa transaction.
///
/// # Hashing layout
///
/// | Field         | Encoding              |
/// |---------------|-----------------------|
/// | version       | u16le                 |
/// | inputs        | u64le count + inputs  |
/// | outputs       | u64le count + outputs |
/// | lock_time     | u64le                 |
/// | subnetwork_id | 20 bytes              |
/// | gas           | u64le                 |
/// | payload       | var_bytes             |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version. Currently 0.
    pub version: u16,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. Zero for immediately spendable transactions.
    pub lock_time: u64,

    /// Subnetwork the transaction belongs to.
    pub subnetwork_id: SubnetworkId,

    /// Gas limit. Zero on the native subnetwork.
    pub gas: u64,

    /// Arbitrary payload. Empty on the native subnetwork.
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Create a new empty native-subnetwork transaction with version 0 and lock time 0.
    ///
    /// # Returns
    /// A `Transaction` with no inputs or outputs.
    pub fn new() -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            subnetwork_id: SUBNETWORK_ID_NATIVE,
            gas: 0,
            payload: Vec::new(),
        }
    }

    /// Create a native-subnetwork transaction from inputs and outputs.
    pub fn with_io(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        Transaction { inputs, outputs, ..Self::new() }
    }

    // -----------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------

    /// Append an input.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Append an output.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Number of inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of outputs.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output values, or `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, out| acc.checked_add(out.value))
    }

    /// Whether every input carries a signature script.
    pub fn is_fully_signed(&self) -> bool {
        self.inputs.iter().all(TransactionInput::is_signed)
    }

    /// Whether the transaction lives on the native subnetwork.
    pub fn is_native(&self) -> bool {
        self.subnetwork_id == SUBNETWORK_ID_NATIVE
    }

    // -----------------------------------------------------------------
    // Transaction id
    // -----------------------------------------------------------------

    /// Compute the transaction id.
    ///
    /// The id is the `TransactionID`-keyed BLAKE2b-256 hash of the
    /// transaction with every signature script replaced by an empty field,
    /// so signing an input never changes the id.
    ///
    /// # Returns
    /// The 32-byte transaction id, displayed as hex in byte order.
    pub fn id(&self) -> TransactionId {
        let mut writer = KasWriter::new();
        writer
            .write_u16_le(self.version)
            .write_u64_le(self.inputs.len() as u64);
        for input in &self.inputs {
            input.previous_outpoint.write_to(&mut writer);
            writer.write_var_bytes(&[]).write_u64_le(input.sequence);
        }

        writer.write_u64_le(self.outputs.len() as u64);
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer
            .write_u64_le(self.lock_time)
            .write_bytes(&self.subnetwork_id)
            .write_u64_le(self.gas)
            .write_var_bytes(&self.payload);

        TransactionId::new(DomainHasher::transaction_id().hash(writer.as_bytes()))
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}
