//! Signature hash computation for transaction signing.
//!
//! Computes the hash that is signed with Schnorr to authorize spending a
//! transaction input. Every sub-hash and the final hash are BLAKE2b-256
//! keyed with the `TransactionSigningHash` domain. Only `SIGHASH_ALL` is
//! supported: each signature commits to every input and every output.

use kas_primitives::hash::{DomainHasher, HASH_SIZE, ZERO_HASH};
use kas_primitives::util::KasWriter;

use crate::transaction::Transaction;
use crate::utxo::UtxoEntry;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash type
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs.
pub const SIG_HASH_ALL: u8 = 0x01;

// -----------------------------------------------------------------------
// Sub-hashes
// -----------------------------------------------------------------------

/// Hash of every input's outpoint: `txid(32) || u32le(index)` per input.
pub fn hash_previous_outputs(tx: &Transaction, hasher: &DomainHasher) -> [u8; HASH_SIZE] {
    let mut w = KasWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        input.previous_outpoint.write_to(&mut w);
    }
    hasher.hash(w.as_bytes())
}

/// Hash of every input's `u64le(sequence)`.
pub fn hash_sequences(tx: &Transaction, hasher: &DomainHasher) -> [u8; HASH_SIZE] {
    let mut w = KasWriter::with_capacity(tx.inputs.len() * 8);
    for input in &tx.inputs {
        w.write_u64_le(input.sequence);
    }
    hasher.hash(w.as_bytes())
}

/// Hash of every input's `u8(sig_op_count)`.
pub fn hash_sig_op_counts(tx: &Transaction, hasher: &DomainHasher) -> [u8; HASH_SIZE] {
    let mut w = KasWriter::with_capacity(tx.inputs.len());
    for input in &tx.inputs {
        w.write_u8(input.sig_op_count);
    }
    hasher.hash(w.as_bytes())
}

/// Hash of every output: `u64le(value) || u16le(version) || var_bytes(script)`.
pub fn hash_outputs(tx: &Transaction, hasher: &DomainHasher) -> [u8; HASH_SIZE] {
    let mut w = KasWriter::new();
    for output in &tx.outputs {
        output.write_to(&mut w);
    }
    hasher.hash(w.as_bytes())
}

/// Hash of the payload.
///
/// Native-subnetwork transactions carry no payload and use the zero
/// hash constant, not the hash of an empty buffer.
pub fn payload_hash(tx: &Transaction, hasher: &DomainHasher) -> [u8; HASH_SIZE] {
    if tx.is_native() && tx.payload.is_empty() {
        return ZERO_HASH;
    }
    let mut w = KasWriter::with_capacity(8 + tx.payload.len());
    w.write_var_bytes(&tx.payload);
    hasher.hash(w.as_bytes())
}

// -----------------------------------------------------------------------
// Per-transaction cache
// -----------------------------------------------------------------------

/// Sub-hashes shared by every input of one transaction.
///
/// Computed once from the unsigned transaction. Signature scripts are not
/// part of any sub-hash, so the cache stays valid while inputs are signed.
#[derive(Clone, Debug)]
pub struct SighashCache {
    hasher: DomainHasher,
    previous_outputs_hash: [u8; HASH_SIZE],
    sequences_hash: [u8; HASH_SIZE],
    sig_op_counts_hash: [u8; HASH_SIZE],
    outputs_hash: [u8; HASH_SIZE],
    payload_hash: [u8; HASH_SIZE],
}

impl SighashCache {
    /// Compute the shared sub-hashes of `tx` under `hasher`.
    pub fn new(tx: &Transaction, hasher: &DomainHasher) -> Self {
        SighashCache {
            hasher: hasher.clone(),
            previous_outputs_hash: hash_previous_outputs(tx, hasher),
            sequences_hash: hash_sequences(tx, hasher),
            sig_op_counts_hash: hash_sig_op_counts(tx, hasher),
            outputs_hash: hash_outputs(tx, hasher),
            payload_hash: payload_hash(tx, hasher),
        }
    }

    /// Compute the shared sub-hashes under the `TransactionSigningHash` domain.
    pub fn for_signing(tx: &Transaction) -> Self {
        Self::new(tx, &DomainHasher::transaction_signing())
    }

    pub fn previous_outputs_hash(&self) -> &[u8; HASH_SIZE] {
        &self.previous_outputs_hash
    }

    pub fn sequences_hash(&self) -> &[u8; HASH_SIZE] {
        &self.sequences_hash
    }

    pub fn sig_op_counts_hash(&self) -> &[u8; HASH_SIZE] {
        &self.sig_op_counts_hash
    }

    pub fn outputs_hash(&self) -> &[u8; HASH_SIZE] {
        &self.outputs_hash
    }
}

// -----------------------------------------------------------------------
// Schnorr signature hash
// -----------------------------------------------------------------------

/// Compute the SIGHASH_ALL signature hash for one input.
///
/// The preimage is, in order: tx version, the previous-outputs, sequences
/// and sig-op-count sub-hashes, this input's outpoint, the spent output's
/// own script public key and amount, this input's sequence and sig-op
/// count, the outputs sub-hash, lock time, subnetwork id, gas, payload
/// hash and the sighash type byte.
///
/// # Arguments
/// * `tx`          - The transaction being signed.
/// * `entries`     - The spent UTXO entries, one per input, in input order.
/// * `input_index` - Index of the input being signed.
/// * `cache`       - Sub-hashes computed from `tx`.
///
/// # Returns
/// The 32-byte hash to sign, or an error if the index or entries are invalid.
pub fn calc_schnorr_signature_hash(
    tx: &Transaction,
    entries: &[UtxoEntry],
    input_index: usize,
    cache: &SighashCache,
) -> Result<[u8; HASH_SIZE], TransactionError> {
    let input = tx.inputs.get(input_index).ok_or(TransactionError::InputIndexOutOfRange {
        index: input_index,
        count: tx.inputs.len(),
    })?;
    if entries.len() != tx.inputs.len() {
        return Err(TransactionError::UtxoEntryCountMismatch {
            inputs: tx.inputs.len(),
            entries: entries.len(),
        });
    }
    let entry = &entries[input_index];

    let mut w = KasWriter::with_capacity(256);
    w.write_u16_le(tx.version)
        .write_bytes(&cache.previous_outputs_hash)
        .write_bytes(&cache.sequences_hash)
        .write_bytes(&cache.sig_op_counts_hash);
    input.previous_outpoint.write_to(&mut w);
    w.write_script_public_key(
        entry.script_public_key.version(),
        entry.script_public_key.script(),
    )
    .write_u64_le(entry.amount)
    .write_u64_le(input.sequence)
    .write_u8(input.sig_op_count)
    .write_bytes(&cache.outputs_hash)
    .write_u64_le(tx.lock_time)
    .write_bytes(&tx.subnetwork_id)
    .write_u64_le(tx.gas)
    .write_bytes(&cache.payload_hash)
    .write_u8(SIG_HASH_ALL);

    Ok(cache.hasher.hash(w.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{TransactionInput, TransactionOutpoint};
    use crate::output::TransactionOutput;
    use kas_primitives::chainhash::Hash;
    use kas_script::ScriptPublicKey;

    fn sample() -> (Transaction, Vec<UtxoEntry>) {
        let spk = ScriptPublicKey::pay_to_pub_key(&[3u8; 32]);
        let tx = Transaction::with_io(
            vec![TransactionInput::from_outpoint(TransactionOutpoint::new(Hash::new([1u8; 32]), 0))],
            vec![TransactionOutput::new(1_000, spk.clone())],
        );
        let entries = vec![UtxoEntry {
            amount: 5_000,
            script_public_key: spk,
            block_daa_score: 0,
            is_coinbase: false,
        }];
        (tx, entries)
    }

    #[test]
    fn test_payload_hash_is_zero_constant_for_native() {
        let (tx, _) = sample();
        let hasher = DomainHasher::transaction_signing();
        assert_eq!(payload_hash(&tx, &hasher), ZERO_HASH);
        assert_ne!(hasher.hash(&[0u8; 8]), ZERO_HASH);
    }

    #[test]
    fn test_sub_hashes_match_manual_buffers() {
        let (tx, _) = sample();
        let hasher = DomainHasher::transaction_signing();

        let mut prevouts = vec![1u8; 32];
        prevouts.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(hash_previous_outputs(&tx, &hasher), hasher.hash(&prevouts));
        assert_eq!(hash_sequences(&tx, &hasher), hasher.hash(&0u64.to_le_bytes()));
        assert_eq!(hash_sig_op_counts(&tx, &hasher), hasher.hash(&[1u8]));
    }

    #[test]
    fn test_manual_preimage_matches() {
        let (tx, entries) = sample();
        let hasher = DomainHasher::transaction_signing();
        let cache = SighashCache::new(&tx, &hasher);

        let mut pre = Vec::new();
        pre.extend_from_slice(&0u16.to_le_bytes());
        pre.extend_from_slice(cache.previous_outputs_hash());
        pre.extend_from_slice(cache.sequences_hash());
        pre.extend_from_slice(cache.sig_op_counts_hash());
        pre.extend_from_slice(&[1u8; 32]);
        pre.extend_from_slice(&0u32.to_le_bytes());
        pre.extend_from_slice(&entries[0].script_public_key.to_bytes());
        pre.extend_from_slice(&5_000u64.to_le_bytes());
        pre.extend_from_slice(&0u64.to_le_bytes());
        pre.push(1);
        pre.extend_from_slice(cache.outputs_hash());
        pre.extend_from_slice(&0u64.to_le_bytes());
        pre.extend_from_slice(&[0u8; 20]);
        pre.extend_from_slice(&0u64.to_le_bytes());
        pre.extend_from_slice(&ZERO_HASH);
        pre.push(SIG_HASH_ALL);

        let got = calc_schnorr_signature_hash(&tx, &entries, 0, &cache).unwrap();
        assert_eq!(got, hasher.hash(&pre));
    }

    #[test]
    fn test_errors() {
        let (tx, entries) = sample();
        let cache = SighashCache::for_signing(&tx);
        assert!(matches!(
            calc_schnorr_signature_hash(&tx, &entries, 1, &cache),
            Err(TransactionError::InputIndexOutOfRange { index: 1, count: 1 })
        ));
        assert!(matches!(
            calc_schnorr_signature_hash(&tx, &[], 0, &cache),
            Err(TransactionError::UtxoEntryCountMismatch { inputs: 1, entries: 0 })
        ));
    }
}
