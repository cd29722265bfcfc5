/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. missing inputs or outputs).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// An input index past the end of the input list was requested.
    #[error("input index {index} out of range (tx has {count} inputs)")]
    InputIndexOutOfRange { index: usize, count: usize },
    /// The spent UTXO entries do not line up with the inputs.
    #[error("expected {inputs} utxo entries (one per input), got {entries}")]
    UtxoEntryCountMismatch { inputs: usize, entries: usize },
    /// After signing, the number of signature scripts differs from the input count.
    #[error("signed {signed} of {inputs} inputs")]
    SignatureCountMismatch { signed: usize, inputs: usize },
    /// An error occurred while producing a signature.
    #[error("signing error: {0}")]
    Signing(String),
    /// An underlying script or address error (forwarded from `kas-script`).
    #[error("script error: {0}")]
    Script(#[from] kas_script::ScriptError),
    /// An underlying primitives error (forwarded from `kas-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] kas_primitives::PrimitivesError),
}
