//! Transaction output: an amount locked by a script public key.

use kas_primitives::util::KasWriter;
use kas_script::{Address, ScriptPublicKey};

/// A single output of a Kaspa transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Amount in sompi.
    pub value: u64,
    /// The locking script.
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    /// Create an output from an amount and a locking script.
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        TransactionOutput { value, script_public_key }
    }

    /// Create an output paying `value` sompi to `address`.
    pub fn to_address(value: u64, address: &Address) -> Self {
        Self::new(value, address.script_public_key())
    }

    /// Append `u64le(value) || u16le(version) || var_bytes(script)`.
    pub fn write_to(&self, writer: &mut KasWriter) {
        writer.write_u64_le(self.value).write_script_public_key(
            self.script_public_key.version(),
            self.script_public_key.script(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_layout() {
        let spk = ScriptPublicKey::pay_to_pub_key(&[9u8; 32]);
        let out = TransactionOutput::new(0x0102, spk);
        let mut w = KasWriter::new();
        out.write_to(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 8 + 2 + 8 + 34);
        assert_eq!(&bytes[..8], &0x0102u64.to_le_bytes());
        assert_eq!(&bytes[8..10], &[0, 0]);
        assert_eq!(&bytes[10..18], &34u64.to_le_bytes());
        assert_eq!(bytes[18], 0x20);
    }
}
