//! Utility types for binary serialization.
//!
//! Provides the `KasWriter` and `KasReader` structs for writing/reading the
//! little-endian layout used by Kaspa transaction hashing, plus free-standing
//! helpers for concatenation and length-prefixed byte fields.
//!
//! Unlike Bitcoin's compact VarInt, every variable-length byte field in this
//! layout carries a fixed 8-byte little-endian length prefix.

use crate::PrimitivesError;

/// Width in bytes of the length prefix written before variable-length data.
pub const LENGTH_PREFIX_SIZE: usize = 8;

// ---------------------------------------------------------------------------
// Free helpers
// ---------------------------------------------------------------------------

/// Concatenate byte slices into a new buffer.
///
/// # Arguments
/// * `parts` - The slices to join, in order.
///
/// # Returns
/// A `Vec<u8>` holding every part back to back.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Encode the 8-byte little-endian length prefix for a field of `len` bytes.
///
/// # Arguments
/// * `len` - The byte length of the field that follows.
///
/// # Returns
/// The 8-byte prefix.
pub fn length_prefix(len: u64) -> [u8; LENGTH_PREFIX_SIZE] {
    len.to_le_bytes()
}

/// Encode `data` as a variable-length byte field: `u64le(len) || data`.
///
/// # Arguments
/// * `data` - The raw bytes.
///
/// # Returns
/// A buffer of `8 + data.len()` bytes.
pub fn var_bytes(data: &[u8]) -> Vec<u8> {
    let mut writer = KasWriter::with_capacity(LENGTH_PREFIX_SIZE + data.len());
    writer.write_var_bytes(data);
    writer.into_bytes()
}

/// Encode a script public key: `u16le(version) || var_bytes(script)`.
///
/// This layout is used both for transaction outputs and for the spent
/// output's locking script inside the signature hash.
///
/// # Arguments
/// * `version` - Script version (currently always 0).
/// * `script` - The locking script bytes.
///
/// # Returns
/// The encoded bytes.
pub fn encode_script_public_key(version: u16, script: &[u8]) -> Vec<u8> {
    let mut writer = KasWriter::with_capacity(2 + LENGTH_PREFIX_SIZE + script.len());
    writer.write_script_public_key(version, script);
    writer.into_bytes()
}

// ---------------------------------------------------------------------------
// KasReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for the Kaspa hashing layout.
///
/// Wraps a byte slice and maintains a read position, providing methods
/// to read fixed-size little-endian integers and length-prefixed fields.
pub struct KasReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> KasReader<'a> {
    /// Create a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        KasReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        let end = self.pos.checked_add(n).ok_or(PrimitivesError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a fixed-size array and advance the position.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read an 8-byte length prefix followed by that many bytes.
    ///
    /// # Returns
    /// The field contents, or an error if the prefix runs past the data.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_u64_le()?;
        let len = usize::try_from(len).map_err(|_| PrimitivesError::LengthOverflow(len))?;
        self.read_bytes(len)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// KasWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for the Kaspa hashing layout.
///
/// Wraps a `Vec<u8>` and provides typed methods that append fixed-width
/// little-endian integers and length-prefixed byte fields.
pub struct KasWriter {
    buf: Vec<u8>,
}

impl KasWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        KasWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        KasWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) -> &mut Self {
        self.buf.push(val);
        self
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    pub fn write_u16_le(&mut self, val: u16) -> &mut Self {
        self.write_bytes(&val.to_le_bytes())
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) -> &mut Self {
        self.write_bytes(&val.to_le_bytes())
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) -> &mut Self {
        self.write_bytes(&val.to_le_bytes())
    }

    /// Append an 8-byte little-endian length prefix and then `data`.
    pub fn write_var_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.write_bytes(&length_prefix(data.len() as u64));
        self.write_bytes(data)
    }

    /// Append a script public key as `u16le(version) || var_bytes(script)`.
    pub fn write_script_public_key(&mut self, version: u16, script: &[u8]) -> &mut Self {
        self.write_u16_le(version);
        self.write_var_bytes(script)
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for KasWriter {
    fn default() -> Self {
        Self::new()
    }
}
