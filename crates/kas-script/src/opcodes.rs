//! Opcodes used by the standard Kaspa script templates.

/// Push the next 32 bytes onto the stack.
pub const OP_DATA_32: u8 = 0x20;
/// Push the next 65 bytes onto the stack (Schnorr signature plus sighash type).
pub const OP_DATA_65: u8 = 0x41;
/// Compare the top two stack items for equality.
pub const OP_EQUAL: u8 = 0x87;
/// Replace the top stack item with its BLAKE2b-256 hash.
pub const OP_BLAKE2B: u8 = 0xaa;
/// Verify a Schnorr signature against an x-only public key.
pub const OP_CHECKSIG: u8 = 0xac;

/// Length of a pay-to-pubkey script: push, 32-byte key, checksig.
pub const P2PK_SCRIPT_LEN: usize = 34;
/// Length of a pay-to-script-hash script: blake2b, push, 32-byte hash, equal.
pub const P2SH_SCRIPT_LEN: usize = 35;
