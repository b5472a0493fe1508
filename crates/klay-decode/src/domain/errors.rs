//! # Decode Errors
//!
//! Every decoder in this crate returns `DecodeError`. Errors raised while
//! decoding a nested value (a signature inside a transaction, a role key
//! inside a role-based key) propagate to the caller unchanged.

use crate::domain::governance::VoteValueType;
use shared_types::HexError;
use thiserror::Error;

/// Errors that can occur while decoding a JSON-RPC payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A hex-encoded field is not valid `0x` hex, or is not a string.
    #[error("malformed hex in `{field}`: {reason}")]
    MalformedHex { field: String, reason: String },

    /// A component of a nested value (`V`, `x`, `weight`, ...) is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field the record's variant requires is absent or null.
    #[error("missing required field `{0}`")]
    MissingRequiredField(String),

    /// A field is present but has the wrong shape.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    /// Account key tag outside 0x00..=0x05.
    #[error("unknown account key type: {0:#04x}")]
    UnknownAccountKeyType(u64),

    /// Account type code other than EOA or smart contract (strict mode only).
    #[error("unknown account type: {0}")]
    UnknownAccountType(u64),

    /// Transaction tag or type code not in the closed table.
    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(String),

    /// `type` and `typeInt` name different transaction types.
    #[error("transaction type conflict: type {tag} does not match typeInt {code}")]
    TransactionTypeConflict { tag: String, code: String },

    /// Governance key not in the vote item table.
    #[error("unknown vote key: {0}")]
    UnknownVoteKey(String),

    /// Requested or runtime vote value type differs from the table.
    #[error("type mismatch for `{key}`: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: VoteValueType,
        actual: String,
    },

    /// A key list that must not be empty is empty.
    #[error("key list is empty")]
    ZeroLength,

    /// A key list exceeds its maximum length.
    #[error("key list too long: {len} > {max}")]
    TooLongLength { len: usize, max: usize },

    /// A weighted key has weight zero.
    #[error("weighted key at index {index} has zero weight")]
    KeyWeightZero { index: usize },

    /// A public key appears twice in one multisig key.
    #[error("duplicated public key at index {index}")]
    KeyDuplicated { index: usize },

    /// The sum of weights does not fit in 64 bits.
    #[error("sum of key weights overflows")]
    WeightedSumOverflow,

    /// The threshold is zero, or the sum of weights cannot reach it.
    #[error("threshold {threshold} unsatisfiable with total weight {total}")]
    UnsatisfiableThreshold { threshold: u64, total: u64 },

    /// A role-based key holds another role-based key.
    #[error("role {role} holds a nested role-based key")]
    NestedRoleBasedKey { role: usize },

    /// Coordinates are not a point on secp256k1.
    #[error("public key is not on the secp256k1 curve")]
    PublicKeyNotOnCurve,

    /// Fee ratio outside 1..=99.
    #[error("invalid fee ratio: {0}")]
    InvalidFeeRatio(u64),

    /// Encoded account key the configured decoder cannot read.
    #[error("unsupported account key encoding: {0}")]
    UnsupportedKeyEncoding(String),
}

impl DecodeError {
    /// Build `MalformedHex` from a low-level hex error.
    pub fn malformed(field: &str, err: HexError) -> Self {
        DecodeError::MalformedHex {
            field: field.to_string(),
            reason: err.to_string(),
        }
    }

    /// Build `InvalidField` with a short reason.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DecodeError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// The field, tag or key the error is about, where there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedHex { field, .. } | DecodeError::InvalidField { field, .. } => {
                Some(field)
            }
            DecodeError::MissingField(field) | DecodeError::MissingRequiredField(field) => {
                Some(field)
            }
            DecodeError::UnknownTransactionType(tag) => Some(tag),
            DecodeError::TransactionTypeConflict { tag, .. } => Some(tag),
            DecodeError::UnknownVoteKey(key) | DecodeError::TypeMismatch { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Stable snake_case name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::MalformedHex { .. } => "malformed_hex",
            DecodeError::MissingField(_) => "missing_field",
            DecodeError::MissingRequiredField(_) => "missing_required_field",
            DecodeError::InvalidField { .. } => "invalid_field",
            DecodeError::UnknownAccountKeyType(_) => "unknown_account_key_type",
            DecodeError::UnknownAccountType(_) => "unknown_account_type",
            DecodeError::UnknownTransactionType(_) => "unknown_transaction_type",
            DecodeError::TransactionTypeConflict { .. } => "transaction_type_conflict",
            DecodeError::UnknownVoteKey(_) => "unknown_vote_key",
            DecodeError::TypeMismatch { .. } => "type_mismatch",
            DecodeError::ZeroLength => "zero_length",
            DecodeError::TooLongLength { .. } => "too_long_length",
            DecodeError::KeyWeightZero { .. } => "key_weight_zero",
            DecodeError::KeyDuplicated { .. } => "key_duplicated",
            DecodeError::WeightedSumOverflow => "weighted_sum_overflow",
            DecodeError::UnsatisfiableThreshold { .. } => "unsatisfiable_threshold",
            DecodeError::NestedRoleBasedKey { .. } => "nested_role_based_key",
            DecodeError::PublicKeyNotOnCurve => "public_key_not_on_curve",
            DecodeError::InvalidFeeRatio(_) => "invalid_fee_ratio",
            DecodeError::UnsupportedKeyEncoding(_) => "unsupported_key_encoding",
        }
    }
}

/// Result alias used throughout the crate.
pub type DecodeResult<T> = Result<T, DecodeError>;
