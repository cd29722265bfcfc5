/// Kaspa SDK - Addresses and locking scripts.
///
/// Translates bech32 Kaspa addresses to the script public keys that lock
/// outputs to them, and back. Only the two standard templates are handled:
/// pay-to-pubkey (Schnorr x-only key) and pay-to-script-hash.

pub mod address;
pub mod opcodes;
pub mod script;

mod error;
pub use address::{Address, Prefix, Version};
pub use error::ScriptError;
pub use script::{address_to_script_public_key, public_key_to_address, ScriptPublicKey};
