//! Strict `0x` hex reading and canonical hex writing.
//!
//! Every numeric and binary quantity on the wire is a `0x`-prefixed hex
//! string. Input is accepted in either case; output is always lowercase with
//! minimal digits for quantities.

use crate::errors::HexError;
use primitive_types::{H160, H256, U256};

/// Strip the `0x` / `0X` prefix.
pub fn strip_prefix(s: &str) -> Result<&str, HexError> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or(HexError::MissingPrefix)
}

fn check_digits(digits: &str) -> Result<(), HexError> {
    match digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        Some(c) => Err(HexError::InvalidDigit(c)),
        None => Ok(()),
    }
}

impl From<::hex::FromHexError> for HexError {
    fn from(err: ::hex::FromHexError) -> Self {
        match err {
            ::hex::FromHexError::InvalidHexCharacter { c, .. } => HexError::InvalidDigit(c),
            // Odd lengths are padded before decoding; only bad digits remain.
            _ => HexError::InvalidDigit('?'),
        }
    }
}

/// Decode a byte string. Odd-length input gets a leading zero nibble,
/// so `"0x0"` decodes to `[0x00]` and `"0x"` to an empty vector.
pub fn decode_bytes(s: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_prefix(s)?;
    check_digits(digits)?;
    if digits.len() % 2 == 1 {
        Ok(::hex::decode(format!("0{digits}"))?)
    } else {
        Ok(::hex::decode(digits)?)
    }
}

/// Decode exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_bytes(s)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| HexError::WrongLength {
        expected: N,
        actual: bytes.len(),
    })
}

/// Decode at most `N` bytes, left-padding shorter values with zeros.
pub fn decode_left_padded<const N: usize>(s: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_bytes(s)?;
    if bytes.len() > N {
        return Err(HexError::TooLong {
            max: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Significant digits of a quantity, leading zeros removed.
fn quantity_digits(s: &str) -> Result<&str, HexError> {
    let digits = strip_prefix(s)?;
    if digits.is_empty() {
        return Err(HexError::Empty);
    }
    check_digits(digits)?;
    Ok(digits.trim_start_matches('0'))
}

/// Parse a 256-bit quantity.
pub fn parse_quantity(s: &str) -> Result<U256, HexError> {
    let digits = quantity_digits(s)?;
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    if digits.len() > 64 {
        return Err(HexError::TooLong {
            max: 32,
            actual: digits.len().div_ceil(2),
        });
    }
    U256::from_str_radix(digits, 16).map_err(|_| HexError::InvalidDigit('?'))
}

/// Parse a quantity that must fit in 64 bits.
pub fn parse_u64(s: &str) -> Result<u64, HexError> {
    let digits = quantity_digits(s)?;
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 16 {
        return Err(HexError::TooLong {
            max: 8,
            actual: digits.len().div_ceil(2),
        });
    }
    u64::from_str_radix(digits, 16).map_err(|_| HexError::InvalidDigit('?'))
}

/// Parse a 20-byte address.
pub fn parse_address(s: &str) -> Result<H160, HexError> {
    decode_fixed::<20>(s).map(H160::from)
}

/// Parse a 32-byte hash.
pub fn parse_hash(s: &str) -> Result<H256, HexError> {
    decode_fixed::<32>(s).map(H256::from)
}

/// `0x` + lowercase hex.
pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", ::hex::encode(bytes))
}

/// Minimal lowercase quantity, `0x0` for zero.
pub fn encode_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Minimal lowercase quantity for 64-bit values.
pub fn encode_u64(value: u64) -> String {
    format!("0x{:x}", value)
}

/// Full-width lowercase address.
pub fn encode_address(address: &H160) -> String {
    encode_bytes(address.as_bytes())
}

/// Full-width lowercase hash.
pub fn encode_hash(hash: &H256) -> String {
    encode_bytes(hash.as_bytes())
}
