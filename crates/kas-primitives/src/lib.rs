/// Kaspa SDK - Cryptographic primitives, hashing, and binary encoding.
///
/// This crate provides the foundational building blocks for the Kaspa SDK:
/// - Little-endian binary writer/reader with 8-byte length-prefixed byte fields
/// - Bech32 encoding with the Kaspa checksum polynomial and bit regrouping
/// - Domain-separated (keyed) BLAKE2b-256 hashing
/// - Hash type for transaction identification
/// - BIP-340 Schnorr keys and signatures on secp256k1

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod bech32;
pub mod ec;

mod error;
pub use error::PrimitivesError;
