/// Unified error type for all primitives operations.
///
/// Covers errors from bech32 decoding, bit regrouping, key handling,
/// signatures, and binary decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("bech32 string has no ':' separator: {0}")]
    MissingSeparator(String),

    #[error("bech32 string has an empty prefix")]
    EmptyPrefix,

    #[error("invalid bech32 character {0:?}")]
    InvalidCharacter(char),

    #[error("bech32 string mixes upper and lower case")]
    MixedCase,

    #[error("bech32 checksum mismatch")]
    ChecksumMismatch,

    #[error("bech32 data too short: {0} words")]
    DataTooShort(usize),

    #[error("invalid bit group width: from {from} to {to}")]
    InvalidBitWidth { from: u32, to: u32 },

    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u8, bits: u32 },

    #[error("non-zero padding in trailing bit group")]
    InvalidPadding,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("length prefix {0} exceeds addressable memory")]
    LengthOverflow(u64),

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
