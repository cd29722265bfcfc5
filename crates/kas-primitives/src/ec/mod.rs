/// Schnorr cryptography on secp256k1.
///
/// Provides private keys, x-only public keys and BIP-340 Schnorr
/// signatures as used by Kaspa pay-to-pubkey scripts.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
