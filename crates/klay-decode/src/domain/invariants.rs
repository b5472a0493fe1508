//! # Account Key Invariants
//!
//! Construction-time rules for composite account keys. The checks run in a
//! fixed order and the first violation is returned:
//!
//! Weighted multisig:
//! 1. key list not empty
//! 2. key list no longer than the configured limit
//! 3. no public key appears twice
//! 4. no weight is zero
//! 5. the weight sum fits in 64 bits
//! 6. the threshold is non-zero and the weight sum reaches it
//!
//! Role-based:
//! 1. between one and three roles
//! 2. no role is itself role-based

use crate::domain::account_key::{AccountKeyType, WeightedPublicKey, MAX_ROLES};
use crate::domain::errors::{DecodeError, DecodeResult};
use std::collections::HashSet;

// =============================================================================
// WEIGHTED MULTISIG
// =============================================================================

/// Length rules shared by the raw-array precheck and the full check.
pub fn check_weighted_key_count(len: usize, max_keys: usize) -> DecodeResult<()> {
    if len == 0 {
        return Err(DecodeError::ZeroLength);
    }
    if len > max_keys {
        return Err(DecodeError::TooLongLength { len, max: max_keys });
    }
    Ok(())
}

/// Every weighted multisig rule, in order. Returns the weight sum.
pub fn check_weighted_multisig(
    threshold: u64,
    keys: &[WeightedPublicKey],
    max_keys: usize,
) -> DecodeResult<u64> {
    check_weighted_key_count(keys.len(), max_keys)?;

    let mut seen = HashSet::with_capacity(keys.len());
    for (index, entry) in keys.iter().enumerate() {
        if !seen.insert(&entry.key) {
            return Err(DecodeError::KeyDuplicated { index });
        }
    }

    if let Some(index) = keys.iter().position(|entry| entry.weight == 0) {
        return Err(DecodeError::KeyWeightZero { index });
    }

    let total = keys
        .iter()
        .try_fold(0u64, |sum, entry| sum.checked_add(entry.weight))
        .ok_or(DecodeError::WeightedSumOverflow)?;

    if threshold == 0 || total < threshold {
        return Err(DecodeError::UnsatisfiableThreshold { threshold, total });
    }

    Ok(total)
}

// =============================================================================
// ROLE-BASED
// =============================================================================

pub fn check_role_count(len: usize) -> DecodeResult<()> {
    if len == 0 {
        return Err(DecodeError::ZeroLength);
    }
    if len > MAX_ROLES {
        return Err(DecodeError::TooLongLength {
            len,
            max: MAX_ROLES,
        });
    }
    Ok(())
}

/// A role slot may hold any key type except another role-based key.
pub fn check_role_not_nested(role: usize, key_type: AccountKeyType) -> DecodeResult<()> {
    if key_type == AccountKeyType::RoleBased {
        return Err(DecodeError::NestedRoleBasedKey { role });
    }
    Ok(())
}
