//! # Error Types
//!
//! Errors raised while reading `0x`-prefixed hex strings off the wire.

use thiserror::Error;

/// Reasons a hex string cannot be read as the requested primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexError {
    /// String does not start with `0x` / `0X`.
    #[error("missing 0x prefix")]
    MissingPrefix,

    /// Nothing after the prefix where a value is required.
    #[error("empty hex string")]
    Empty,

    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),

    /// Value needs more bytes than the target type holds.
    #[error("value too large: {actual} bytes > {max} bytes")]
    TooLong { max: usize, actual: usize },

    /// Fixed-width value with the wrong byte length.
    #[error("wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}
