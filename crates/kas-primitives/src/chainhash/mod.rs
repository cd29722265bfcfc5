//! Hash type for transaction identification.
//!
//! Provides a `Hash` type, a 32-byte array used for transaction IDs.
//! Kaspa displays transaction IDs as hex in natural byte order, so unlike
//! Bitcoin no byte reversal happens between storage and display.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use crate::hash::HASH_SIZE;
use crate::PrimitivesError;

/// Exact hex string length of a Hash (64 hex characters).
pub const HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash used for transaction IDs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

/// Transaction identifiers are plain 32-byte hashes.
pub type TransactionId = Hash;

impl Hash {
    /// Create a Hash from a raw 32-byte array.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(
                format!("invalid hash length of {}, want {}", bytes.len(), HASH_SIZE)
            ));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Hash(arr))
    }

    /// Create a Hash from a 64-character hex string.
    ///
    /// The hex digits are read in byte order; short or long strings are
    /// rejected rather than padded.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of exactly 64 characters.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "hash hex must be {} characters, got {}",
                HASH_STRING_SIZE,
                hex_str.len()
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        hex::decode_to_slice(hex_str, &mut arr)?;
        Ok(Hash(arr))
    }

    /// Access the internal byte array as a reference.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Return the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Whether every byte of the hash is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

/// Serialize as a hex string in JSON.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Deserialize from a hex string in JSON.
impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX_ID_HEX: &str = "b7b1ab7e9e8e3f3d6fd4d66e9a2e2e0c5fe3f17dbb3b03e66b88f8e4e1e6a6c1";

    #[test]
    fn test_hex_is_natural_byte_order() {
        let hash = Hash::from_hex(TX_ID_HEX).unwrap();
        assert_eq!(hash.as_bytes()[0], 0xb7);
        assert_eq!(hash.as_bytes()[31], 0xc1);
        assert_eq!(hash.to_string(), TX_ID_HEX);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Hash::from_hex("").is_err());
        assert!(Hash::from_hex(&TX_ID_HEX[..62]).is_err());
        assert!(Hash::from_hex(&format!("{}00", TX_ID_HEX)).is_err());
        let bad = format!("zz{}", &TX_ID_HEX[2..]);
        assert!(matches!(Hash::from_hex(&bad), Err(PrimitivesError::InvalidHex(_))));
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(Hash::from_bytes(&[0u8; 31]).is_err());
        assert!(Hash::from_bytes(&[0u8; 33]).is_err());
        assert!(Hash::from_bytes(&[0u8; 32]).unwrap().is_zero());
    }

    #[test]
    fn test_marshalling() {
        #[derive(Serialize, Deserialize)]
        struct TestData {
            hash: Hash,
        }

        let data = TestData { hash: TX_ID_HEX.parse().unwrap() };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, format!(r#"{{"hash":"{}"}}"#, TX_ID_HEX));

        let data2: TestData = serde_json::from_str(&json).unwrap();
        assert_eq!(data2.hash, data.hash);

        let bad: Result<TestData, _> = serde_json::from_str(r#"{"hash":"abcd"}"#);
        assert!(bad.is_err());
    }
}
