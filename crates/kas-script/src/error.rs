use kas_primitives::PrimitivesError;

/// Error types for address and script operations.
///
/// Covers bech32 failures, unsupported address versions, payload and
/// prefix validation, and scripts that match no standard template.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The address version byte is neither pay-to-pubkey nor pay-to-script-hash.
    #[error("unsupported address version {0}")]
    UnsupportedAddressVersion(u8),

    /// The address string failed bech32 decoding or bit regrouping.
    #[error("bech32 decode error: {0}")]
    Bech32(#[from] PrimitivesError),

    /// Decoded payload has the wrong size for its version.
    #[error("invalid address payload length: expected {expected}, got {got}")]
    InvalidPayloadLength { expected: usize, got: usize },

    /// The address prefix is not a known Kaspa network.
    #[error("unknown address prefix '{0}'")]
    UnknownPrefix(String),

    /// The address belongs to a different network than expected.
    #[error("address prefix mismatch: expected '{expected}', got '{got}'")]
    PrefixMismatch { expected: String, got: String },

    /// The script matches neither standard template.
    #[error("non-standard script public key: {0}")]
    NonStandardScript(String),

    /// Serialized script public key is truncated or has trailing data.
    #[error("malformed script public key: {0}")]
    MalformedScriptPublicKey(String),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for ScriptError {
    fn from(e: hex::FromHexError) -> Self {
        ScriptError::InvalidHex(e.to_string())
    }
}
