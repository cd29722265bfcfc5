//! BIP-340 Schnorr signature (64 bytes).

use std::fmt;

use crate::PrimitivesError;

/// Length of a serialized Schnorr signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// A 64-byte BIP-340 Schnorr signature: `R.x || s`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Parse a signature from its 64-byte encoding.
    ///
    /// The bytes are validated as a well-formed Schnorr signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; SIGNATURE_LEN];
        arr.copy_from_slice(bytes);
        let sig = Signature(arr);
        sig.to_k256()?;
        Ok(sig)
    }

    /// Return the 64 signature bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0
    }

    /// Borrow the 64 signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub(crate) fn from_k256(sig: &k256::schnorr::Signature) -> Self {
        Signature(sig.to_bytes())
    }

    pub(crate) fn to_k256(&self) -> Result<k256::schnorr::Signature, PrimitivesError> {
        k256::schnorr::Signature::try_from(&self.0[..])
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}
