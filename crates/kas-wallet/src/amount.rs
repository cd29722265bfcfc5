//! Conversion between decimal KAS strings and integer sompi.
//!
//! Parsing is pure integer arithmetic; fractional digits past the eighth
//! are floored away.

use crate::WalletError;

/// Sompi in one KAS.
pub const SOMPI_PER_KAS: u64 = 100_000_000;

/// Number of decimal places in one KAS.
pub const DECIMALS: usize = 8;

/// Parse a decimal KAS amount such as `"1.5"` into sompi.
///
/// # Arguments
/// * `s` - Digits with at most one `.`; surrounding whitespace is ignored.
///
/// # Returns
/// The amount in sompi, or `InvalidAmount` for malformed input or overflow.
pub fn parse_kas(s: &str) -> Result<u64, WalletError> {
    let trimmed = s.trim();
    let invalid = || WalletError::InvalidAmount(s.to_string());

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole_sompi = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .ok()
            .and_then(|w| w.checked_mul(SOMPI_PER_KAS))
            .ok_or_else(invalid)?
    };

    let mut frac_digits: String = frac.chars().take(DECIMALS).collect();
    while frac_digits.len() < DECIMALS {
        frac_digits.push('0');
    }
    let frac_sompi = frac_digits.parse::<u64>().map_err(|_| invalid())?;

    whole_sompi.checked_add(frac_sompi).ok_or_else(invalid)
}

/// Format sompi as a decimal KAS string, trimming trailing zeros.
pub fn format_sompi(sompi: u64) -> String {
    let whole = sompi / SOMPI_PER_KAS;
    let frac = sompi % SOMPI_PER_KAS;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
