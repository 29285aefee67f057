//! # Decimal Scalars
//!
//! Signature scalars travel as base-10 strings (`"r": "5462..."`), the
//! textual form of an unsigned 256-bit big-endian integer. Leading zeros are
//! accepted on parse and never produced.

use alloy_primitives::U256;

use crate::error::CryptoError;

/// Render a 256-bit big-endian integer in base 10.
pub fn to_decimal(bytes: &[u8; 32]) -> String {
    U256::from_be_bytes(*bytes).to_string()
}

/// Parse a base-10 string into a 256-bit big-endian integer.
///
/// # Errors
///
/// `InvalidSignature` for empty input, any non-digit character, or a value
/// that does not fit in 256 bits.
pub fn from_decimal(s: &str) -> Result<[u8; 32], CryptoError> {
    if s.is_empty() {
        return Err(CryptoError::InvalidSignature(
            "empty decimal scalar".to_string(),
        ));
    }
    // `from_str_radix` skips `_` separators; the wire form is digits only.
    if let Some((pos, c)) = s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(CryptoError::InvalidSignature(format!(
            "non-digit {c:?} at position {pos} in decimal scalar"
        )));
    }
    let value = U256::from_str_radix(s, 10).map_err(|e| {
        CryptoError::InvalidSignature(format!("decimal scalar exceeds 256 bits: {e}"))
    })?;
    Ok(value.to_be_bytes::<32>())
}
