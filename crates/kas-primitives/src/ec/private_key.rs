//! secp256k1 private key for BIP-340 Schnorr signing.
//!
//! Wraps the k256 Schnorr signing key and adds hex parsing and x-only
//! public key derivation.

use std::fmt;

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::schnorr::SigningKey;
use rand::rngs::OsRng;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key for Schnorr signing.
///
/// Signing is deterministic: the nonce is derived by k256 from the key and
/// message with zero auxiliary randomness, so no caller-side nonce logic exists.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn random() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid non-zero scalar on
    /// secp256k1, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let inner = SigningKey::from_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// Surrounding whitespace and an optional `0x` prefix are ignored.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let trimmed = hex_str.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(trimmed)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Derive the x-only public key for this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(*self.inner.verifying_key())
    }

    /// Sign a 32-byte message digest with BIP-340 Schnorr.
    ///
    /// # Arguments
    /// * `digest` - The pre-computed 32-byte hash to sign.
    ///
    /// # Returns
    /// A 64-byte `Signature`, or an error if the digest is not 32 bytes.
    pub fn sign(&self, digest: &[u8]) -> Result<Signature, PrimitivesError> {
        if digest.len() != 32 {
            return Err(PrimitivesError::InvalidSignature(format!(
                "schnorr digest must be 32 bytes, got {}",
                digest.len()
            )));
        }
        let sig: k256::schnorr::Signature = self
            .inner
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature::from_k256(&sig))
    }
}

// Never print key material.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}
