//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies this subsystem needs but does not implement.

use crate::domain::account_key::AccountKey;
use crate::domain::errors::{DecodeError, DecodeResult};

/// Decoder for RLP-encoded account keys.
///
/// An account-update transaction may carry its new key as an RLP hex string
/// instead of a `{keyType, key}` object. The constant encodings of Nil,
/// Legacy and Fail keys are recognised in-crate; every other string is handed
/// to this collaborator.
pub trait RlpKeyDecoder: Send + Sync {
    /// Decode a `0x`-prefixed RLP account key.
    ///
    /// # Errors
    /// * `DecodeError::UnsupportedKeyEncoding` - the encoding is not understood
    /// * Any account key invariant error raised by the decoded key
    fn decode_rlp_key(&self, encoded: &str) -> DecodeResult<AccountKey>;
}

/// Default collaborator that understands no RLP encodings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRlpKeyDecoder;

impl RlpKeyDecoder for NoRlpKeyDecoder {
    fn decode_rlp_key(&self, encoded: &str) -> DecodeResult<AccountKey> {
        Err(DecodeError::UnsupportedKeyEncoding(encoded.to_string()))
    }
}

impl<T: RlpKeyDecoder + ?Sized> RlpKeyDecoder for std::sync::Arc<T> {
    fn decode_rlp_key(&self, encoded: &str) -> DecodeResult<AccountKey> {
        (**self).decode_rlp_key(encoded)
    }
}
