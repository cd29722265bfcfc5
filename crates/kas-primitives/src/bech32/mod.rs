//! Bech32 encoding with the Kaspa checksum.
//!
//! Kaspa addresses use the cashaddr flavour of bech32: a `prefix:` followed
//! by 5-bit words drawn from the usual 32-character alphabet, terminated by
//! an 8-word (40-bit) BCH checksum. The generator constants differ from
//! BIP-173, so a standard bech32 library cannot be used.

use crate::PrimitivesError;

/// The bech32 character set, indexed by 5-bit word value.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between the human-readable prefix and the data part.
pub const SEPARATOR: char = ':';

/// Number of 5-bit words in the checksum.
pub const CHECKSUM_LENGTH: usize = 8;

const GENERATORS: [u64; 5] = [
    0x98_f2bc_8e61,
    0x79_b76d_99e2,
    0xf3_3e5f_b3c4,
    0xae_2eab_e2a8,
    0x1e_4f43_e470,
];

/// Reverse lookup from ASCII byte to word value; -1 marks invalid characters.
const CHARSET_REV: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// A decoded bech32 string: its prefix and data words with the checksum removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bech32Data {
    /// Human-readable prefix, lowercased (e.g. `kaspa`).
    pub prefix: String,
    /// Data words (each < 32), excluding the checksum.
    pub words: Vec<u8>,
}

fn polymod(values: impl Iterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = c >> 35;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 == 1 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Compute the 40-bit checksum over `prefix` and `words`.
fn checksum(prefix: &str, words: &[u8]) -> u64 {
    let prefix_words = prefix.bytes().map(|b| b & 0x1f);
    polymod(
        prefix_words
            .chain(std::iter::once(0))
            .chain(words.iter().copied())
            .chain([0u8; CHECKSUM_LENGTH]),
    )
}

/// Encode `words` under `prefix`, appending the checksum.
///
/// # Arguments
/// * `prefix` - Human-readable prefix (e.g. `kaspatest`), expected lowercase.
/// * `words` - 5-bit data words.
///
/// # Returns
/// The string `prefix:` followed by the data and checksum characters.
pub fn encode(prefix: &str, words: &[u8]) -> String {
    debug_assert!(words.iter().all(|w| *w < 32), "bech32 words must be 5-bit");

    let sum = checksum(prefix, words);
    let mut out = String::with_capacity(prefix.len() + 1 + words.len() + CHECKSUM_LENGTH);
    out.push_str(prefix);
    out.push(SEPARATOR);
    for w in words {
        out.push(CHARSET[usize::from(w & 0x1f)] as char);
    }
    for i in 0..CHECKSUM_LENGTH {
        let w = (sum >> (5 * (CHECKSUM_LENGTH - 1 - i))) & 0x1f;
        out.push(CHARSET[w as usize] as char);
    }
    out
}

/// Decode a bech32 string and verify its checksum.
///
/// The prefix is everything before the last `:`. Strings may be all
/// lowercase or all uppercase, never mixed.
///
/// # Arguments
/// * `s` - The encoded string.
///
/// # Returns
/// The prefix and the data words without the trailing checksum words, or
/// an error if the separator is missing, a character is outside the
/// alphabet, or the checksum does not match.
pub fn decode(s: &str) -> Result<Bech32Data, PrimitivesError> {
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(PrimitivesError::MixedCase);
    }
    let lowered = s.to_ascii_lowercase();

    let (prefix, data) = lowered
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| PrimitivesError::MissingSeparator(s.to_string()))?;
    if prefix.is_empty() {
        return Err(PrimitivesError::EmptyPrefix);
    }

    let mut words = Vec::with_capacity(data.len());
    for ch in data.chars() {
        let value = if ch.is_ascii() { CHARSET_REV[ch as usize] } else { -1 };
        if value < 0 {
            return Err(PrimitivesError::InvalidCharacter(ch));
        }
        words.push(value as u8);
    }

    if words.len() < CHECKSUM_LENGTH {
        return Err(PrimitivesError::DataTooShort(words.len()));
    }

    let (payload, checksum_words) = words.split_at(words.len() - CHECKSUM_LENGTH);
    let expected = checksum_words
        .iter()
        .fold(0u64, |acc, w| (acc << 5) | u64::from(*w));
    if checksum(prefix, payload) != expected {
        return Err(PrimitivesError::ChecksumMismatch);
    }

    Ok(Bech32Data {
        prefix: prefix.to_string(),
        words: payload.to_vec(),
    })
}

/// Regroup a sequence of `from`-bit values into `to`-bit values.
///
/// With `pad = true` a trailing partial group is zero-padded and emitted.
/// With `pad = false` the leftover bits must be fewer than `from` and all
/// zero, otherwise the input is rejected.
///
/// # Arguments
/// * `data` - Input values, each less than `2^from`.
/// * `from` - Input group width in bits (1 to 8).
/// * `to` - Output group width in bits (1 to 8).
/// * `pad` - Whether to pad a trailing partial group.
///
/// # Returns
/// The regrouped values, or an error on out-of-range input or bad padding.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, PrimitivesError> {
    if !(1..=8).contains(&from) || !(1..=8).contains(&to) {
        return Err(PrimitivesError::InvalidBitWidth { from, to });
    }

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity((data.len() * from as usize).div_ceil(to as usize));

    for &value in data {
        if u32::from(value) >> from != 0 {
            return Err(PrimitivesError::ValueOutOfRange { value, bits: from });
        }
        acc = ((acc << from) | u32::from(value)) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(PrimitivesError::InvalidPadding);
    }

    Ok(out)
}
