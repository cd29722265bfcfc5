//! Pay-to-pubkey (P2PK) script template.
//!
//! Creates Schnorr pay-to-pubkey locking scripts (`OP_DATA_32 <key>
//! OP_CHECKSIG`) and signature scripts (`OP_DATA_65 <sig> <sighash type>`).

use kas_primitives::ec::Signature;
use kas_script::opcodes::OP_DATA_65;
use kas_script::{Address, ScriptError, ScriptPublicKey, Version};

use crate::sighash::{SighashCache, SIG_HASH_ALL};
use crate::signing::SigningContext;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::utxo::UtxoEntry;
use crate::TransactionError;

/// Length of a P2PK signature script: push byte, 64-byte signature, sighash type.
pub const SIGNATURE_SCRIPT_LEN: usize = 66;

/// Create a P2PK locking script from a pay-to-pubkey address.
///
/// # Returns
/// The 34-byte locking script, or an error if the address is not version 0.
pub fn lock(address: &Address) -> Result<ScriptPublicKey, TransactionError> {
    match address.version {
        Version::PubKey => Ok(ScriptPublicKey::pay_to_pub_key(&address.payload)),
        other => Err(ScriptError::UnsupportedAddressVersion(other as u8).into()),
    }
}

/// Serialize a signature script: `0x41 || signature || 0x01`.
pub fn signature_script(signature: &Signature) -> Vec<u8> {
    let mut script = Vec::with_capacity(SIGNATURE_SCRIPT_LEN);
    script.push(OP_DATA_65);
    script.extend_from_slice(signature.as_bytes());
    script.push(SIG_HASH_ALL);
    script
}

/// Create a P2PK unlocker that signs with `context`.
pub fn unlock(context: &SigningContext) -> P2PK<'_> {
    P2PK { context }
}

/// P2PK signing template borrowing a signing context.
pub struct P2PK<'a> {
    context: &'a SigningContext,
}

impl UnlockingScriptTemplate for P2PK<'_> {
    /// Sign the specified input and produce its signature script.
    fn sign(
        &self,
        tx: &Transaction,
        entries: &[UtxoEntry],
        input_index: usize,
        cache: &SighashCache,
    ) -> Result<Vec<u8>, TransactionError> {
        let digest = self.context.signature_hash(tx, entries, input_index, cache)?;
        let signature = self.context.sign_digest(&digest)?;
        if !self.context.public_key().verify(&digest, &signature) {
            return Err(TransactionError::Signing(format!(
                "signature for input {} failed verification",
                input_index
            )));
        }
        Ok(signature_script(&signature))
    }

    fn estimate_length(&self) -> usize {
        SIGNATURE_SCRIPT_LEN
    }
}
