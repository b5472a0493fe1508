//! # Account Keys
//!
//! An account key describes what must sign to authorize actions on an
//! account. It is a recursive tagged union:
//!
//! | Tag  | Variant            | Payload                                   |
//! |------|--------------------|-------------------------------------------|
//! | 0x00 | `Nil`              | none                                      |
//! | 0x01 | `Legacy`           | none                                      |
//! | 0x02 | `Public`           | `{x, y}`                                  |
//! | 0x03 | `Fail`             | none                                      |
//! | 0x04 | `WeightedMultiSig` | `{threshold, keys: [{weight, key}]}`      |
//! | 0x05 | `RoleBased`        | `[{keyType, key}]`, one entry per role    |
//!
//! Composite keys are only constructed through validating constructors, so
//! an `AccountKey` value always satisfies the rules in [`invariants`].
//!
//! [`invariants`]: crate::domain::invariants

use crate::domain::context::DecodeContext;
use crate::domain::errors::{DecodeError, DecodeResult};
use crate::domain::fields::{array_value, hex_str, u64_value, FieldReader};
use crate::domain::invariants;
use crate::config::MAX_WEIGHTED_KEYS;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, FieldBytes};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use shared_types::hex;

/// Maximum number of roles in a role-based key.
pub const MAX_ROLES: usize = 3;

// =============================================================================
// TAGS
// =============================================================================

/// Wire tag of an account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccountKeyType {
    Nil = 0x00,
    Legacy = 0x01,
    Public = 0x02,
    Fail = 0x03,
    WeightedMultiSig = 0x04,
    RoleBased = 0x05,
}

impl AccountKeyType {
    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            0x00 => Some(Self::Nil),
            0x01 => Some(Self::Legacy),
            0x02 => Some(Self::Public),
            0x03 => Some(Self::Fail),
            0x04 => Some(Self::WeightedMultiSig),
            0x05 => Some(Self::RoleBased),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether the variant carries a `key` payload.
    pub fn has_payload(self) -> bool {
        matches!(
            self,
            Self::Public | Self::WeightedMultiSig | Self::RoleBased
        )
    }
}

/// Role slot inside a role-based key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleGroup {
    Transaction = 0,
    AccountUpdate = 1,
    FeePayer = 2,
}

impl RoleGroup {
    pub const ALL: [RoleGroup; MAX_ROLES] = [
        RoleGroup::Transaction,
        RoleGroup::AccountUpdate,
        RoleGroup::FeePayer,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// PUBLIC KEY
// =============================================================================

/// Affine secp256k1 point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    x: [u8; 32],
    y: [u8; 32],
}

impl PublicKey {
    /// Build from affine coordinates, rejecting points off the curve.
    pub fn from_coordinates(x: [u8; 32], y: [u8; 32]) -> DecodeResult<Self> {
        let point = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&x),
            FieldBytes::from_slice(&y),
            false,
        );
        if bool::from(AffinePoint::from_encoded_point(&point).is_some()) {
            Ok(Self { x, y })
        } else {
            Err(DecodeError::PublicKeyNotOnCurve)
        }
    }

    /// Build from a SEC1 encoding, compressed or uncompressed.
    pub fn from_sec1(bytes: &[u8]) -> DecodeResult<Self> {
        let key = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| DecodeError::PublicKeyNotOnCurve)?;
        let point = key.to_encoded_point(false);
        match (point.x(), point.y()) {
            (Some(px), Some(py)) => {
                let mut x = [0u8; 32];
                let mut y = [0u8; 32];
                x.copy_from_slice(px);
                y.copy_from_slice(py);
                Ok(Self { x, y })
            }
            _ => Err(DecodeError::PublicKeyNotOnCurve),
        }
    }

    pub fn x(&self) -> &[u8; 32] {
        &self.x
    }

    pub fn y(&self) -> &[u8; 32] {
        &self.y
    }

    /// Wire form `{"x": "0x..", "y": "0x.."}`.
    pub fn to_json(&self) -> Value {
        json!({
            "x": hex::encode_bytes(&self.x),
            "y": hex::encode_bytes(&self.y),
        })
    }
}

fn coordinate(reader: &FieldReader<'_>, name: &str) -> DecodeResult<[u8; 32]> {
    let s = hex_str(name, reader.require(name)?)?;
    hex::decode_left_padded::<32>(s).map_err(|e| DecodeError::malformed(name, e))
}

fn decode_public_key(payload: &Value) -> DecodeResult<PublicKey> {
    let reader = FieldReader::component(payload, "key")?;
    let x = coordinate(&reader, "x")?;
    let y = coordinate(&reader, "y")?;
    PublicKey::from_coordinates(x, y)
}

// =============================================================================
// COMPOSITE KEYS
// =============================================================================

/// One member of a weighted multisig key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightedPublicKey {
    pub weight: u64,
    pub key: PublicKey,
}

/// Threshold multisig over up to ten weighted public keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeightedMultiSig {
    threshold: u64,
    keys: Vec<WeightedPublicKey>,
}

impl WeightedMultiSig {
    pub fn new(threshold: u64, keys: Vec<WeightedPublicKey>) -> DecodeResult<Self> {
        Self::with_max_keys(threshold, keys, MAX_WEIGHTED_KEYS)
    }

    /// Same as [`WeightedMultiSig::new`] with a tighter key limit.
    pub fn with_max_keys(
        threshold: u64,
        keys: Vec<WeightedPublicKey>,
        max_keys: usize,
    ) -> DecodeResult<Self> {
        invariants::check_weighted_multisig(threshold, &keys, max_keys)?;
        Ok(Self { threshold, keys })
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn keys(&self) -> &[WeightedPublicKey] {
        &self.keys
    }

    /// Sum of weights. Cannot overflow for a constructed key.
    pub fn total_weight(&self) -> u64 {
        self.keys.iter().map(|k| k.weight).sum()
    }

    fn to_json(&self) -> Value {
        let keys: Vec<Value> = self
            .keys
            .iter()
            .map(|k| json!({"weight": k.weight, "key": k.key.to_json()}))
            .collect();
        json!({"threshold": self.threshold, "keys": keys})
    }
}

/// Per-role keys, indexed by [`RoleGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleBasedKey {
    roles: Vec<AccountKey>,
}

impl RoleBasedKey {
    pub fn new(roles: Vec<AccountKey>) -> DecodeResult<Self> {
        invariants::check_role_count(roles.len())?;
        for (role, key) in roles.iter().enumerate() {
            invariants::check_role_not_nested(role, key.key_type())?;
        }
        Ok(Self { roles })
    }

    /// Key for `group`, if the role list is long enough to include it.
    pub fn role(&self, group: RoleGroup) -> Option<&AccountKey> {
        self.roles.get(group.index())
    }

    pub fn roles(&self) -> &[AccountKey] {
        &self.roles
    }
}

// =============================================================================
// ACCOUNT KEY
// =============================================================================

/// Decoded account key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountKey {
    Nil,
    Legacy,
    Public(PublicKey),
    Fail,
    WeightedMultiSig(WeightedMultiSig),
    RoleBased(RoleBasedKey),
}

impl AccountKey {
    pub fn key_type(&self) -> AccountKeyType {
        match self {
            AccountKey::Nil => AccountKeyType::Nil,
            AccountKey::Legacy => AccountKeyType::Legacy,
            AccountKey::Public(_) => AccountKeyType::Public,
            AccountKey::Fail => AccountKeyType::Fail,
            AccountKey::WeightedMultiSig(_) => AccountKeyType::WeightedMultiSig,
            AccountKey::RoleBased(_) => AccountKeyType::RoleBased,
        }
    }

    /// Keys with a fixed RLP encoding: `0x80` Nil, `0x01c0` Legacy, `0x03c0` Fail.
    pub fn from_rlp_constant(encoded: &str) -> Option<Self> {
        match encoded.to_ascii_lowercase().as_str() {
            "0x80" => Some(AccountKey::Nil),
            "0x01c0" => Some(AccountKey::Legacy),
            "0x03c0" => Some(AccountKey::Fail),
            _ => None,
        }
    }

    /// Wire form `{"keyType": <int>, "key": <payload>}`.
    pub fn to_json(&self) -> Value {
        let key = match self {
            AccountKey::Nil | AccountKey::Legacy | AccountKey::Fail => json!({}),
            AccountKey::Public(public) => public.to_json(),
            AccountKey::WeightedMultiSig(multisig) => multisig.to_json(),
            AccountKey::RoleBased(roles) => {
                Value::Array(roles.roles.iter().map(AccountKey::to_json).collect())
            }
        };
        json!({"keyType": self.key_type().tag(), "key": key})
    }
}

impl Serialize for AccountKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

// =============================================================================
// DECODING
// =============================================================================

impl DecodeContext<'_> {
    /// Decode the payload of an account key with a known tag.
    pub fn account_key(&self, tag: u64, payload: &Value) -> DecodeResult<AccountKey> {
        let key_type =
            AccountKeyType::from_tag(tag).ok_or(DecodeError::UnknownAccountKeyType(tag))?;
        match key_type {
            AccountKeyType::Nil => Ok(AccountKey::Nil),
            AccountKeyType::Legacy => Ok(AccountKey::Legacy),
            AccountKeyType::Fail => Ok(AccountKey::Fail),
            AccountKeyType::Public => decode_public_key(payload).map(AccountKey::Public),
            AccountKeyType::WeightedMultiSig => self
                .weighted_multisig(payload)
                .map(AccountKey::WeightedMultiSig),
            AccountKeyType::RoleBased => self.role_based(payload).map(AccountKey::RoleBased),
        }
    }

    /// Decode a `{keyType, key}` record.
    pub fn account_key_record(&self, record: &Value) -> DecodeResult<AccountKey> {
        let reader = FieldReader::component(record, "key")?;
        let tag = reader.u64("keyType")?;
        match AccountKeyType::from_tag(tag) {
            Some(key_type) if key_type.has_payload() => {
                self.account_key(tag, reader.require("key")?)
            }
            _ => self.account_key(tag, reader.get("key").unwrap_or(&Value::Null)),
        }
    }

    fn weighted_multisig(&self, payload: &Value) -> DecodeResult<WeightedMultiSig> {
        let reader = FieldReader::component(payload, "key")?;
        let threshold = reader.u64("threshold")?;
        let entries = reader.array("keys")?;
        let max_keys = self.config.max_weighted_keys;
        invariants::check_weighted_key_count(entries.len(), max_keys)?;

        let keys = entries
            .iter()
            .map(|entry| {
                let entry = FieldReader::component(entry, "keys")?;
                Ok(WeightedPublicKey {
                    weight: entry.u64("weight")?,
                    key: decode_public_key(entry.require("key")?)?,
                })
            })
            .collect::<DecodeResult<Vec<_>>>()?;

        WeightedMultiSig::with_max_keys(threshold, keys, max_keys)
    }

    fn role_based(&self, payload: &Value) -> DecodeResult<RoleBasedKey> {
        let entries = array_value("key", payload)?;
        invariants::check_role_count(entries.len())?;

        let mut roles = Vec::with_capacity(entries.len());
        for (role, entry) in entries.iter().enumerate() {
            let tag = u64_value("keyType", FieldReader::component(entry, "key")?.require("keyType")?)?;
            // Reject on the tag alone so a nested payload is never walked.
            if let Some(key_type) = AccountKeyType::from_tag(tag) {
                invariants::check_role_not_nested(role, key_type)?;
            }
            roles.push(self.account_key_record(entry)?);
        }

        RoleBasedKey::new(roles)
    }
}

/// Decode an account key payload for `type_tag` with default settings.
pub fn decode_account_key(type_tag: u8, payload: &Value) -> DecodeResult<AccountKey> {
    DecodeContext::standard().account_key(u64::from(type_tag), payload)
}

/// Decode a `{keyType, key}` record with default settings.
pub fn decode_account_key_record(record: &Value) -> DecodeResult<AccountKey> {
    DecodeContext::standard().account_key_record(record)
}
