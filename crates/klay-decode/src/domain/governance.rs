//! # Governance Vote Items
//!
//! Governance RPCs return loosely-typed `{key: value}` maps and vote lists.
//! Each key has one expected value type, fixed by the table below. A value
//! is only handed out after both the requested type and the runtime JSON
//! value agree with that table.
//!
//! The table, the `VoteItem` enum and the typed accessors are all generated
//! from one macro invocation, so they cannot drift apart.

use crate::domain::errors::{DecodeError, DecodeResult};
use crate::domain::fields::{json_kind, FieldReader};
use serde_json::{Map, Value};
use shared_types::U256;
use std::fmt;

/// Expected value type of a vote item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteValueType {
    String,
    BigInteger,
    Boolean,
    Integer,
}

impl VoteValueType {
    pub fn name(self) -> &'static str {
        match self {
            VoteValueType::String => "String",
            VoteValueType::BigInteger => "BigInteger",
            VoteValueType::Boolean => "Boolean",
            VoteValueType::Integer => "Integer",
        }
    }
}

impl fmt::Display for VoteValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust type a vote value projects into.
pub trait VoteValue: Sized {
    const TYPE: VoteValueType;

    /// Read the JSON value, or `None` if it cannot be read as `Self`.
    fn coerce(value: &Value) -> Option<Self>;
}

impl VoteValue for String {
    const TYPE: VoteValueType = VoteValueType::String;

    fn coerce(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Accepts JSON integers of any width and decimal strings such as
/// `"25000000000"`. Numbers wider than 64 bits are read from their exact
/// source text.
impl VoteValue for U256 {
    const TYPE: VoteValueType = VoteValueType::BigInteger;

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(U256::from)
                .or_else(|| U256::from_dec_str(&n.to_string()).ok()),
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                U256::from_dec_str(s).ok()
            }
            _ => None,
        }
    }
}

impl VoteValue for bool {
    const TYPE: VoteValueType = VoteValueType::Boolean;

    fn coerce(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl VoteValue for i32 {
    const TYPE: VoteValueType = VoteValueType::Integer;

    fn coerce(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|n| i32::try_from(n).ok())
    }
}

/// Expected type of `key`, if it is a known vote item.
pub fn lookup(key: &str) -> Option<VoteValueType> {
    VoteItem::from_key(key).map(VoteItem::value_type)
}

/// Project a raw vote value for `key` into `T`.
///
/// # Errors
/// * `UnknownVoteKey` - `key` is not in the table
/// * `TypeMismatch` - `T` is not the table type, or the value cannot be read as it
pub fn project<T: VoteValue>(key: &str, value: &Value) -> DecodeResult<T> {
    let expected = lookup(key).ok_or_else(|| DecodeError::UnknownVoteKey(key.to_string()))?;
    if T::TYPE != expected {
        return Err(DecodeError::TypeMismatch {
            key: key.to_string(),
            expected,
            actual: T::TYPE.name().to_string(),
        });
    }
    T::coerce(value).ok_or_else(|| DecodeError::TypeMismatch {
        key: key.to_string(),
        expected,
        actual: json_kind(value).to_string(),
    })
}

macro_rules! vote_items {
    ($( $variant:ident => $key:literal, $accessor:ident: $rust:ty; )*) => {
        /// Known governance vote item.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum VoteItem {
            $( $variant, )*
        }

        impl VoteItem {
            pub const ALL: &'static [VoteItem] = &[ $( VoteItem::$variant, )* ];

            pub fn key(self) -> &'static str {
                match self {
                    $( VoteItem::$variant => $key, )*
                }
            }

            pub fn value_type(self) -> VoteValueType {
                match self {
                    $( VoteItem::$variant => <$rust as VoteValue>::TYPE, )*
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $( $key => Some(VoteItem::$variant), )*
                    _ => None,
                }
            }
        }

        impl GovernanceItems {
            $(
                pub fn $accessor(&self) -> DecodeResult<Option<$rust>> {
                    self.get::<$rust>(VoteItem::$variant)
                }
            )*
        }

        impl Votes {
            $(
                pub fn $accessor(&self) -> DecodeResult<Option<$rust>> {
                    self.get::<$rust>(VoteItem::$variant)
                }
            )*
        }

        #[cfg(test)]
        fn sample_value(item: VoteItem) -> Value {
            match item {
                $( VoteItem::$variant => sample_for(<$rust as VoteValue>::TYPE), )*
            }
        }

        #[cfg(test)]
        fn read_with_accessor(item: VoteItem, items: &GovernanceItems) -> DecodeResult<bool> {
            match item {
                $( VoteItem::$variant => items.$accessor().map(|v| v.is_some()), )*
            }
        }
    };
}

vote_items! {
    GovernanceMode => "governance.governancemode", governance_mode: String;
    GoverningNode => "governance.governingnode", governing_node: String;
    UnitPrice => "governance.unitprice", unit_price: U256;
    AddValidator => "governance.addvalidator", add_validator: String;
    RemoveValidator => "governance.removevalidator", remove_validator: String;
    Epoch => "istanbul.epoch", epoch: U256;
    CommitteeSize => "istanbul.committeesize", committee_size: U256;
    Policy => "istanbul.policy", policy: U256;
    MintingAmount => "reward.mintingamount", minting_amount: String;
    Ratio => "reward.ratio", ratio: String;
    UseGiniCoeff => "reward.useginicoeff", use_gini_coeff: bool;
    DeferredTxFee => "reward.deferredtxfee", deferred_tx_fee: bool;
    MinimumStake => "reward.minimumstake", minimum_stake: String;
    ProposerUpdateInterval => "reward.proposerupdateinterval", proposer_update_interval: U256;
    StakingUpdateInterval => "reward.stakingupdateinterval", staking_update_interval: U256;
    Kip71LowerBoundBaseFee => "kip71.lowerboundbasefee", lower_bound_base_fee: U256;
    Kip71UpperBoundBaseFee => "kip71.upperboundbasefee", upper_bound_base_fee: U256;
    Kip71GasTarget => "kip71.gastarget", gas_target: U256;
    Kip71MaxBlockGasUsedForBaseFee => "kip71.maxblockgasusedforbasefee", max_block_gas_used_for_base_fee: U256;
    Kip71BaseFeeDenominator => "kip71.basefeedenominator", base_fee_denominator: i32;
}

// =============================================================================
// ITEM MAP
// =============================================================================

/// `{key: value}` map as returned by `governance_itemsAt` and friends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GovernanceItems {
    items: Map<String, Value>,
}

impl GovernanceItems {
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let items = value.as_object().cloned().ok_or_else(|| {
            DecodeError::invalid("result", format!("expected an object, got {}", json_kind(value)))
        })?;
        Ok(Self { items })
    }

    /// Typed value of `item`; `None` when the map does not carry it.
    pub fn get<T: VoteValue>(&self, item: VoteItem) -> DecodeResult<Option<T>> {
        match self.items.get(item.key()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => project(item.key(), value).map(Some),
        }
    }

    /// Keys in the map that are not vote items.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.items
            .keys()
            .map(String::as_str)
            .filter(|key| VoteItem::from_key(key).is_none())
    }
}

// =============================================================================
// VOTE LIST
// =============================================================================

/// One cast vote. Node votes also name the validator that cast them.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub key: String,
    pub value: Value,
    pub validator: Option<String>,
}

impl Vote {
    /// Reads `key`/`value`, also accepting the capitalised `Key`/`Value` form.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let reader = FieldReader::component(value, "vote")?;
        let key = match reader.get_any(&["key", "Key"]) {
            Some((name, key)) => key
                .as_str()
                .ok_or_else(|| DecodeError::invalid(name, "expected a string"))?
                .to_string(),
            None => return Err(DecodeError::MissingField("key".to_string())),
        };
        let value = reader
            .get_any(&["value", "Value"])
            .map(|(_, v)| v.clone())
            .ok_or_else(|| DecodeError::MissingField("value".to_string()))?;
        let validator = reader
            .get("validator")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self {
            key,
            value,
            validator,
        })
    }

    /// Typed value of this vote.
    pub fn project<T: VoteValue>(&self) -> DecodeResult<T> {
        project(&self.key, &self.value)
    }
}

/// Ordered vote list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Votes {
    votes: Vec<Vote>,
}

impl Votes {
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let entries = crate::domain::fields::array_value("result", value)?;
        let votes = entries
            .iter()
            .map(Vote::from_json)
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(Self { votes })
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Typed value of the first vote for `item`.
    pub fn get<T: VoteValue>(&self, item: VoteItem) -> DecodeResult<Option<T>> {
        self.votes
            .iter()
            .find(|vote| vote.key == item.key())
            .map(|vote| vote.project::<T>())
            .transpose()
    }
}

#[cfg(test)]
fn sample_for(value_type: VoteValueType) -> Value {
    match value_type {
        VoteValueType::String => Value::from("single"),
        VoteValueType::BigInteger => Value::from("25000000000"),
        VoteValueType::Boolean => Value::from(true),
        VoteValueType::Integer => Value::from(20),
    }
}
