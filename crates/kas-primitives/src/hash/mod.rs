//! Domain-separated hashing for the Kaspa protocol.
//!
//! Kaspa computes transaction hashes with BLAKE2b-256 where the BLAKE2b
//! *key* parameter is set to an ASCII domain string such as
//! `TransactionSigningHash`. Every intermediate sub-hash and the final
//! signature hash share the same domain.

use blake2b_simd::{Params, State};

/// Output size of every domain hash, in bytes.
pub const HASH_SIZE: usize = 32;

/// The all-zero hash, used as the payload hash of payload-free transactions.
pub const ZERO_HASH: [u8; HASH_SIZE] = [0u8; HASH_SIZE];

/// Domain key for signature hashes and their sub-hashes.
pub const TRANSACTION_SIGNING_DOMAIN: &[u8] = b"TransactionSigningHash";

/// Domain key for transaction identifiers.
pub const TRANSACTION_ID_DOMAIN: &[u8] = b"TransactionID";

/// A reusable BLAKE2b-256 configuration keyed with a domain string.
///
/// Built once and shared; each call to [`DomainHasher::hash`] or
/// [`DomainHasher::begin`] starts from a fresh state under the same key.
#[derive(Clone, Debug)]
pub struct DomainHasher {
    params: Params,
}

impl DomainHasher {
    /// Create a hasher keyed with the given domain string.
    ///
    /// # Arguments
    /// * `domain` - ASCII domain key, at most 64 bytes.
    pub fn new(domain: &[u8]) -> Self {
        let mut params = Params::new();
        params.hash_length(HASH_SIZE).key(domain);
        DomainHasher { params }
    }

    /// The hasher for `TransactionSigningHash`.
    pub fn transaction_signing() -> Self {
        Self::new(TRANSACTION_SIGNING_DOMAIN)
    }

    /// The hasher for `TransactionID`.
    pub fn transaction_id() -> Self {
        Self::new(TRANSACTION_ID_DOMAIN)
    }

    /// Hash `data` in one shot.
    ///
    /// # Returns
    /// The 32-byte keyed digest.
    pub fn hash(&self, data: &[u8]) -> [u8; HASH_SIZE] {
        let mut state = self.begin();
        state.update(data);
        finalize(&state)
    }

    /// Start an incremental hash under this hasher's domain.
    pub fn begin(&self) -> State {
        self.params.to_state()
    }
}

/// Finish an incremental hash started with [`DomainHasher::begin`].
pub fn finalize(state: &State) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(state.finalize().as_bytes());
    out
}

/// Compute the `TransactionSigningHash` digest of `data`.
pub fn transaction_signing_hash(data: &[u8]) -> [u8; HASH_SIZE] {
    DomainHasher::transaction_signing().hash(data)
}
