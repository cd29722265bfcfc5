//! Script public keys: the versioned locking scripts attached to outputs.
//!
//! Provides the `ScriptPublicKey` type and the translation between
//! addresses and the two standard locking templates.

use std::fmt;

use kas_primitives::util::{encode_script_public_key, KasReader};

use crate::address::{Address, Prefix, Version, PAYLOAD_LEN};
use crate::opcodes::*;
use crate::ScriptError;

/// Script version used by every standard template.
pub const DEFAULT_SCRIPT_VERSION: u16 = 0;

/// A locking script together with its script version.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ScriptPublicKey {
    version: u16,
    script: Vec<u8>,
}

impl ScriptPublicKey {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a script public key from a version and raw script bytes.
    pub fn new(version: u16, script: Vec<u8>) -> Self {
        ScriptPublicKey { version, script }
    }

    /// Create a version-0 script public key from a hex-encoded script.
    ///
    /// # Arguments
    /// * `hex_str` - The script bytes as hex (e.g. `20...ac`).
    ///
    /// # Returns
    /// A `ScriptPublicKey`, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Self::from_hex_with_version(DEFAULT_SCRIPT_VERSION, hex_str)
    }

    /// Create a script public key of the given version from hex.
    pub fn from_hex_with_version(version: u16, hex_str: &str) -> Result<Self, ScriptError> {
        let script = hex::decode(hex_str)?;
        Ok(ScriptPublicKey { version, script })
    }

    /// Decode the `u16le(version) || var_bytes(script)` layout produced by
    /// [`ScriptPublicKey::to_bytes`].
    ///
    /// # Returns
    /// The script public key, or `MalformedScriptPublicKey` if the data is
    /// truncated or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        let malformed = |e: kas_primitives::PrimitivesError| ScriptError::MalformedScriptPublicKey(e.to_string());
        let mut reader = KasReader::new(bytes);
        let version = reader.read_u16_le().map_err(malformed)?;
        let script = reader.read_var_bytes().map_err(malformed)?.to_vec();
        if reader.remaining() != 0 {
            return Err(ScriptError::MalformedScriptPublicKey(format!(
                "{} trailing bytes",
                reader.remaining()
            )));
        }
        Ok(ScriptPublicKey { version, script })
    }

    /// Build the pay-to-pubkey script `OP_DATA_32 <key> OP_CHECKSIG`.
    pub fn pay_to_pub_key(x_only_key: &[u8; PAYLOAD_LEN]) -> Self {
        let mut script = Vec::with_capacity(P2PK_SCRIPT_LEN);
        script.push(OP_DATA_32);
        script.extend_from_slice(x_only_key);
        script.push(OP_CHECKSIG);
        ScriptPublicKey::new(DEFAULT_SCRIPT_VERSION, script)
    }

    /// Build the pay-to-script-hash script `OP_BLAKE2B OP_DATA_32 <hash> OP_EQUAL`.
    pub fn pay_to_script_hash(script_hash: &[u8; PAYLOAD_LEN]) -> Self {
        let mut script = Vec::with_capacity(P2SH_SCRIPT_LEN);
        script.push(OP_BLAKE2B);
        script.push(OP_DATA_32);
        script.extend_from_slice(script_hash);
        script.push(OP_EQUAL);
        ScriptPublicKey::new(DEFAULT_SCRIPT_VERSION, script)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The script version.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// The raw script bytes.
    pub fn script(&self) -> &[u8] {
        &self.script
    }

    /// The script bytes as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.script)
    }

    /// Serialize as `u16le(version) || u64le(len) || script`.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_script_public_key(self.version, &self.script)
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    /// Whether this is a standard pay-to-pubkey script.
    pub fn is_pay_to_pub_key(&self) -> bool {
        let s = &self.script;
        s.len() == P2PK_SCRIPT_LEN && s[0] == OP_DATA_32 && s[P2PK_SCRIPT_LEN - 1] == OP_CHECKSIG
    }

    /// Whether this is a standard pay-to-script-hash script.
    pub fn is_pay_to_script_hash(&self) -> bool {
        let s = &self.script;
        s.len() == P2SH_SCRIPT_LEN
            && s[0] == OP_BLAKE2B
            && s[1] == OP_DATA_32
            && s[P2SH_SCRIPT_LEN - 1] == OP_EQUAL
    }

    /// Extract the address this script pays to.
    ///
    /// # Arguments
    /// * `prefix` - Network prefix for the resulting address.
    ///
    /// # Returns
    /// The owning `Address`, or `NonStandardScript` if the script matches
    /// neither template.
    pub fn to_address(&self, prefix: Prefix) -> Result<Address, ScriptError> {
        let mut payload = [0u8; PAYLOAD_LEN];
        if self.is_pay_to_pub_key() {
            payload.copy_from_slice(&self.script[1..1 + PAYLOAD_LEN]);
            Ok(Address::new(prefix, Version::PubKey, payload))
        } else if self.is_pay_to_script_hash() {
            payload.copy_from_slice(&self.script[2..2 + PAYLOAD_LEN]);
            Ok(Address::new(prefix, Version::ScriptHash, payload))
        } else {
            Err(ScriptError::NonStandardScript(self.to_hex()))
        }
    }
}

impl fmt::Debug for ScriptPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptPublicKey(v{}, {})", self.version, self.to_hex())
    }
}

impl Address {
    /// Recover the address that owns a locking script.
    pub fn from_script_public_key(
        script_public_key: &ScriptPublicKey,
        prefix: Prefix,
    ) -> Result<Self, ScriptError> {
        script_public_key.to_address(prefix)
    }

    /// The locking script for this address.
    pub fn script_public_key(&self) -> ScriptPublicKey {
        match self.version {
            Version::PubKey => ScriptPublicKey::pay_to_pub_key(&self.payload),
            Version::ScriptHash => ScriptPublicKey::pay_to_script_hash(&self.payload),
        }
    }
}

/// Translate an address string into the script public key that locks to it.
///
/// # Arguments
/// * `address` - A bech32 Kaspa address.
///
/// # Returns
/// A version-0 `ScriptPublicKey` (34 bytes for pay-to-pubkey, 35 bytes for
/// pay-to-script-hash), or an error for invalid or unsupported addresses.
pub fn address_to_script_public_key(address: &str) -> Result<ScriptPublicKey, ScriptError> {
    Ok(Address::from_string(address)?.script_public_key())
}

/// Derive the pay-to-pubkey address string for an x-only public key.
///
/// # Arguments
/// * `x_only_key` - The 32-byte Schnorr public key.
/// * `is_testnet` - Selects the `kaspatest` prefix instead of `kaspa`.
pub fn public_key_to_address(x_only_key: &[u8; PAYLOAD_LEN], is_testnet: bool) -> String {
    Address::from_public_key(Prefix::from_testnet_flag(is_testnet), x_only_key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2pk_layout() {
        let key = [0x5au8; 32];
        let spk = ScriptPublicKey::pay_to_pub_key(&key);
        assert_eq!(spk.version(), 0);
        assert_eq!(spk.script().len(), 34);
        assert_eq!(spk.script()[0], 0x20);
        assert_eq!(&spk.script()[1..33], &key);
        assert_eq!(spk.script()[33], 0xac);
        assert!(spk.is_pay_to_pub_key());
        assert!(!spk.is_pay_to_script_hash());
    }

    #[test]
    fn test_p2sh_layout() {
        let hash = [0x33u8; 32];
        let spk = ScriptPublicKey::pay_to_script_hash(&hash);
        assert_eq!(spk.script().len(), 35);
        assert_eq!(&spk.script()[..2], &[0xaa, 0x20]);
        assert_eq!(&spk.script()[2..34], &hash);
        assert_eq!(spk.script()[34], 0x87);
        assert!(spk.is_pay_to_script_hash());
    }

    #[test]
    fn test_address_to_script_public_key() {
        let key = [0x07u8; 32];
        let addr = public_key_to_address(&key, false);
        let spk = address_to_script_public_key(&addr).unwrap();
        assert_eq!(spk, ScriptPublicKey::pay_to_pub_key(&key));

        let p2sh = Address::new(Prefix::Testnet, Version::ScriptHash, key).to_string();
        let spk = address_to_script_public_key(&p2sh).unwrap();
        assert_eq!(spk, ScriptPublicKey::pay_to_script_hash(&key));
    }

    #[test]
    fn test_public_key_to_address_prefix() {
        let key = [0x07u8; 32];
        assert!(public_key_to_address(&key, true).starts_with("kaspatest:"));
        assert!(public_key_to_address(&key, false).starts_with("kaspa:"));
    }

    #[test]
    fn test_script_to_address() {
        let key = [0x44u8; 32];
        let spk = ScriptPublicKey::pay_to_pub_key(&key);
        let addr = Address::from_script_public_key(&spk, Prefix::Mainnet).unwrap();
        assert_eq!(addr.to_string(), public_key_to_address(&key, false));

        let odd = ScriptPublicKey::new(0, vec![0x51]);
        assert!(matches!(odd.to_address(Prefix::Mainnet), Err(ScriptError::NonStandardScript(_))));
    }

    #[test]
    fn test_hex_and_bytes() {
        let key = [0x01u8; 32];
        let spk = ScriptPublicKey::pay_to_pub_key(&key);
        let parsed = ScriptPublicKey::from_hex(&spk.to_hex()).unwrap();
        assert_eq!(parsed, spk);

        let bytes = spk.to_bytes();
        assert_eq!(&bytes[..2], &[0, 0]);
        assert_eq!(&bytes[2..10], &34u64.to_le_bytes());
        assert_eq!(&bytes[10..], spk.script());

        assert!(ScriptPublicKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_from_bytes_inverts_to_bytes() {
        let p2sh = ScriptPublicKey::pay_to_script_hash(&[0x09u8; 32]);
        assert_eq!(ScriptPublicKey::from_bytes(&p2sh.to_bytes()).unwrap(), p2sh);

        let versioned = ScriptPublicKey::new(3, vec![0x51, 0x52]);
        assert_eq!(ScriptPublicKey::from_bytes(&versioned.to_bytes()).unwrap(), versioned);

        let empty = ScriptPublicKey::new(0, Vec::new());
        assert_eq!(ScriptPublicKey::from_bytes(&empty.to_bytes()).unwrap(), empty);
    }

    #[test]
    fn test_from_bytes_rejects_malformed() {
        let bytes = ScriptPublicKey::pay_to_pub_key(&[0x01u8; 32]).to_bytes();
        assert!(matches!(
            ScriptPublicKey::from_bytes(&bytes[..bytes.len() - 1]),
            Err(ScriptError::MalformedScriptPublicKey(_))
        ));

        let mut trailing = bytes.clone();
        trailing.push(0xff);
        assert!(matches!(
            ScriptPublicKey::from_bytes(&trailing),
            Err(ScriptError::MalformedScriptPublicKey(m)) if m.contains("trailing")
        ));

        assert!(ScriptPublicKey::from_bytes(&[0x00]).is_err());
    }
}
