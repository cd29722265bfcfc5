//! x-only secp256k1 public key for BIP-340 Schnorr verification.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::schnorr::VerifyingKey;
use std::fmt;

use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of an x-only public key in bytes.
pub const XONLY_LEN: usize = 32;

/// A 32-byte x-only public key, as embedded in Kaspa P2PK scripts and addresses.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from its 32-byte x-only encoding.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes are not the
    /// x coordinate of a curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != XONLY_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: XONLY_LEN,
                got: bytes.len(),
            });
        }
        let inner = VerifyingKey::from_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner })
    }

    /// Create a PublicKey from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the key as its 32-byte x coordinate.
    pub fn to_bytes(&self) -> [u8; XONLY_LEN] {
        let mut out = [0u8; XONLY_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the key as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Verify a Schnorr signature over a 32-byte digest.
    ///
    /// # Returns
    /// `true` if the signature is valid for this key and digest.
    pub fn verify(&self, digest: &[u8], sig: &Signature) -> bool {
        match sig.to_k256() {
            Ok(k256_sig) => self.inner.verify_prehash(digest, &k256_sig).is_ok(),
            Err(_) => false,
        }
    }

    pub(crate) fn from_k256_verifying_key(inner: VerifyingKey) -> Self {
        PublicKey { inner }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::PrivateKey;

    #[test]
    fn test_bytes_roundtrip() {
        let key = PrivateKey::random().public_key();
        let parsed = PublicKey::from_bytes(&key.to_bytes()).unwrap();
        assert_eq!(parsed, key);
        assert_eq!(PublicKey::from_hex(&key.to_hex()).unwrap(), key);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            PublicKey::from_bytes(&[2u8; 33]),
            Err(PrimitivesError::InvalidKeyLength { expected: 32, got: 33 })
        ));
    }

    #[test]
    fn test_rejects_non_curve_x() {
        // x = p + 1 is not a field element.
        assert!(PublicKey::from_bytes(&[0xff; 32]).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let digest = [7u8; 32];
        let signer = PrivateKey::random();
        let sig = signer.sign(&digest).unwrap();
        let stranger = PrivateKey::random().public_key();
        assert!(signer.public_key().verify(&digest, &sig));
        assert!(!stranger.verify(&digest, &sig));
    }
}
