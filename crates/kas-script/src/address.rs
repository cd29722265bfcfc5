/// Kaspa address handling.
///
/// An address is a bech32 string `prefix:data` whose data part carries a
/// version byte followed by a 32-byte payload, regrouped into 5-bit words.
/// Version 0 holds a Schnorr x-only public key (pay-to-pubkey) and version 8
/// holds a script hash (pay-to-script-hash).

use std::fmt;
use std::str::FromStr;

use kas_primitives::bech32::{self, convert_bits};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ScriptError;

/// Payload length shared by both supported address versions.
pub const PAYLOAD_LEN: usize = 32;

/// Kaspa network prefix, the human-readable part of an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `kaspa`
    Mainnet,
    /// `kaspatest`
    Testnet,
    /// `kaspasim`
    Simnet,
    /// `kaspadev`
    Devnet,
}

impl Prefix {
    /// Return the prefix string as it appears before the `:` separator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::Mainnet => "kaspa",
            Prefix::Testnet => "kaspatest",
            Prefix::Simnet => "kaspasim",
            Prefix::Devnet => "kaspadev",
        }
    }

    /// Select mainnet or testnet.
    pub fn from_testnet_flag(is_testnet: bool) -> Self {
        if is_testnet {
            Prefix::Testnet
        } else {
            Prefix::Mainnet
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prefix {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kaspa" | "mainnet" => Ok(Prefix::Mainnet),
            "kaspatest" | "testnet" => Ok(Prefix::Testnet),
            "kaspasim" | "simnet" => Ok(Prefix::Simnet),
            "kaspadev" | "devnet" => Ok(Prefix::Devnet),
            other => Err(ScriptError::UnknownPrefix(other.to_string())),
        }
    }
}

/// Address version, the first payload byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Version {
    /// Pay-to-pubkey with a 32-byte Schnorr x-only key.
    PubKey = 0,
    /// Pay-to-script-hash with a 32-byte BLAKE2b script hash.
    ScriptHash = 8,
}

impl TryFrom<u8> for Version {
    type Error = ScriptError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Version::PubKey),
            8 => Ok(Version::ScriptHash),
            other => Err(ScriptError::UnsupportedAddressVersion(other)),
        }
    }
}

/// A decoded Kaspa address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The network prefix.
    pub prefix: Prefix,
    /// Which template the payload locks to.
    pub version: Version,
    /// The public key or script hash.
    pub payload: [u8; PAYLOAD_LEN],
}

impl Address {
    /// Create an address from its parts.
    pub fn new(prefix: Prefix, version: Version, payload: [u8; PAYLOAD_LEN]) -> Self {
        Address { prefix, version, payload }
    }

    /// Create a pay-to-pubkey address for an x-only public key.
    ///
    /// # Arguments
    /// * `prefix` - The target network.
    /// * `x_only_key` - The 32-byte Schnorr public key.
    pub fn from_public_key(prefix: Prefix, x_only_key: &[u8; PAYLOAD_LEN]) -> Self {
        Address::new(prefix, Version::PubKey, *x_only_key)
    }

    /// Parse an address string.
    ///
    /// Decodes bech32 using the last `:` as separator, regroups the words
    /// into bytes, and checks the version and payload length.
    ///
    /// # Arguments
    /// * `addr` - The address, e.g. `kaspa:qq...`.
    ///
    /// # Returns
    /// An `Address`, or an error for bad encoding, unknown prefixes,
    /// unsupported versions and wrong payload lengths.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bech32::decode(addr)?;
        let prefix = Prefix::from_str(&decoded.prefix)?;
        let bytes = convert_bits(&decoded.words, 5, 8, false)?;

        let (&version_byte, payload) = bytes
            .split_first()
            .ok_or(ScriptError::InvalidPayloadLength { expected: PAYLOAD_LEN, got: 0 })?;
        let version = Version::try_from(version_byte)?;

        if payload.len() != PAYLOAD_LEN {
            return Err(ScriptError::InvalidPayloadLength {
                expected: PAYLOAD_LEN,
                got: payload.len(),
            });
        }
        let mut arr = [0u8; PAYLOAD_LEN];
        arr.copy_from_slice(payload);

        Ok(Address { prefix, version, payload: arr })
    }

    /// Parse an address and require it to belong to `expected`.
    pub fn from_string_for_network(addr: &str, expected: Prefix) -> Result<Self, ScriptError> {
        let parsed = Self::from_string(addr)?;
        if parsed.prefix != expected {
            return Err(ScriptError::PrefixMismatch {
                expected: expected.as_str().to_string(),
                got: parsed.prefix.as_str().to_string(),
            });
        }
        Ok(parsed)
    }

    /// Encode the address as its bech32 string.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(1 + PAYLOAD_LEN);
        bytes.push(self.version as u8);
        bytes.extend_from_slice(&self.payload);
        bech32::encode(self.prefix.as_str(), &to_words(&bytes))
    }
}

/// Regroup bytes into padded 5-bit words. Every byte sequence has exactly one
/// such grouping, so this cannot fail.
fn to_words(bytes: &[u8]) -> Vec<u8> {
    let mut words = Vec::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut acc: u16 = 0;
    let mut bits = 0u32;
    for &b in bytes {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            words.push(((acc >> bits) & 0x1f) as u8);
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        words.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    words
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_string(&s).map_err(serde::de::Error::custom)
    }
}
