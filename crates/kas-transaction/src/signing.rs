//! Explicit signing context.
//!
//! A `SigningContext` is built once at start-up from the treasury key and
//! passed to the assembler. It owns the key and the domain hasher, so no
//! global hashing state exists.

use kas_primitives::ec::{PrivateKey, PublicKey, Signature};
use kas_primitives::hash::DomainHasher;
use kas_script::{Address, Prefix};
use tracing::debug;

use crate::sighash::{calc_schnorr_signature_hash, SighashCache};
use crate::template::p2pk;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::utxo::UtxoEntry;
use crate::TransactionError;

/// Key material and hashing configuration used to sign transactions.
#[derive(Clone, Debug)]
pub struct SigningContext {
    private_key: PrivateKey,
    public_key: PublicKey,
    hasher: DomainHasher,
}

impl SigningContext {
    /// Create a context for `private_key` using the `TransactionSigningHash` domain.
    pub fn new(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        SigningContext {
            private_key,
            public_key,
            hasher: DomainHasher::transaction_signing(),
        }
    }

    /// Create a context from a hex-encoded private key.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, TransactionError> {
        Ok(Self::new(PrivateKey::from_hex(private_key_hex)?))
    }

    /// The x-only public key of the signing key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The pay-to-pubkey address of the signing key on `prefix`.
    pub fn address(&self, prefix: Prefix) -> Address {
        Address::from_public_key(prefix, &self.public_key.to_bytes())
    }

    /// The hasher used for sub-hashes and signature hashes.
    pub fn hasher(&self) -> &DomainHasher {
        &self.hasher
    }

    /// Compute the shared sub-hashes of `tx` under this context's domain.
    pub fn sighash_cache(&self, tx: &Transaction) -> SighashCache {
        SighashCache::new(tx, &self.hasher)
    }

    /// Compute the signature hash of one input.
    pub fn signature_hash(
        &self,
        tx: &Transaction,
        entries: &[UtxoEntry],
        input_index: usize,
        cache: &SighashCache,
    ) -> Result<[u8; 32], TransactionError> {
        calc_schnorr_signature_hash(tx, entries, input_index, cache)
    }

    /// Schnorr-sign a 32-byte digest.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, TransactionError> {
        Ok(self.private_key.sign(digest)?)
    }

    /// Sign every input of `tx` in place.
    ///
    /// Each input is signed exactly once over its own signature hash and
    /// receives a `0x41 || sig || 0x01` signature script.
    ///
    /// # Arguments
    /// * `tx` - The unsigned transaction.
    /// * `entries` - The spent UTXO entries, one per input, in input order.
    ///
    /// # Returns
    /// `Ok(())` once all inputs are signed, or an error if an entry is
    /// missing, signing fails, or the signature count does not match.
    pub fn sign_transaction(
        &self,
        tx: &mut Transaction,
        entries: &[UtxoEntry],
    ) -> Result<(), TransactionError> {
        if entries.len() != tx.inputs.len() {
            return Err(TransactionError::UtxoEntryCountMismatch {
                inputs: tx.inputs.len(),
                entries: entries.len(),
            });
        }

        let cache = self.sighash_cache(tx);
        let unlocker = p2pk::unlock(self);
        let mut scripts = Vec::with_capacity(tx.inputs.len());
        for index in 0..tx.inputs.len() {
            scripts.push(unlocker.sign(tx, entries, index, &cache)?);
        }

        for (input, script) in tx.inputs.iter_mut().zip(scripts) {
            input.signature_script = script;
        }

        let signed = tx.inputs.iter().filter(|i| i.is_signed()).count();
        if signed != tx.inputs.len() {
            return Err(TransactionError::SignatureCountMismatch {
                signed,
                inputs: tx.inputs.len(),
            });
        }
        debug!(inputs = signed, "signed transaction inputs");
        Ok(())
    }
}
