//! Typed field access over a JSON object.
//!
//! A `FieldReader` wraps one JSON object and reads hex quantities, addresses
//! and byte strings out of it. JSON `null` is treated as absent. A reader opened
//! on a wire record reports absent fields as `MissingRequiredField`; one opened
//! on a nested component (signature, public key, weighted key) reports
//! `MissingField`.

use crate::domain::errors::{DecodeError, DecodeResult};
use serde_json::{Map, Value};
use shared_types::{hex, Address, Bytes, Hash, U256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Record,
    Component,
}

/// Read-only view of a JSON object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    presence: Presence,
}

impl<'a> FieldReader<'a> {
    /// Open a top-level wire record.
    pub fn record(value: &'a Value, context: &str) -> DecodeResult<Self> {
        Self::open(value, context, Presence::Record)
    }

    /// Open a nested component.
    pub fn component(value: &'a Value, context: &str) -> DecodeResult<Self> {
        Self::open(value, context, Presence::Component)
    }

    fn open(value: &'a Value, context: &str, presence: Presence) -> DecodeResult<Self> {
        value
            .as_object()
            .map(|map| Self { map, presence })
            .ok_or_else(|| {
                DecodeError::invalid(context, format!("expected an object, got {}", json_kind(value)))
            })
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// First present field among `names`, for wire aliases such as `chainId` / `chainID`.
    pub fn get_any(&self, names: &[&'static str]) -> Option<(&'static str, &'a Value)> {
        names
            .iter()
            .find_map(|name| self.get(name).map(|value| (*name, value)))
    }

    pub fn require(&self, name: &str) -> DecodeResult<&'a Value> {
        self.get(name).ok_or_else(|| self.missing(name))
    }

    /// Fail on the first member not named in `known`.
    pub fn deny_unknown(&self, context: &str, known: &[&str]) -> DecodeResult<()> {
        match self.map.keys().find(|key| !known.contains(&key.as_str())) {
            Some(key) => Err(DecodeError::invalid(context, format!("unexpected member {key:?}"))),
            None => Ok(()),
        }
    }

    fn missing(&self, name: &str) -> DecodeError {
        match self.presence {
            Presence::Record => DecodeError::MissingRequiredField(name.to_string()),
            Presence::Component => DecodeError::MissingField(name.to_string()),
        }
    }

    pub fn address(&self, name: &str) -> DecodeResult<Address> {
        address_value(name, self.require(name)?)
    }

    /// Optional address. Absent, `null` and the empty string `"0x"` all read as `None`.
    pub fn opt_address(&self, name: &str) -> DecodeResult<Option<Address>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("0x") => Ok(None),
            Some(value) => address_value(name, value).map(Some),
        }
    }

    pub fn quantity(&self, name: &str) -> DecodeResult<U256> {
        quantity_value(name, self.require(name)?)
    }

    pub fn opt_quantity(&self, name: &str) -> DecodeResult<Option<U256>> {
        self.get(name).map(|v| quantity_value(name, v)).transpose()
    }

    pub fn u64(&self, name: &str) -> DecodeResult<u64> {
        u64_value(name, self.require(name)?)
    }

    pub fn opt_u64(&self, name: &str) -> DecodeResult<Option<u64>> {
        self.get(name).map(|v| u64_value(name, v)).transpose()
    }

    pub fn bytes(&self, name: &str) -> DecodeResult<Bytes> {
        let s = hex_str(name, self.require(name)?)?;
        hex::decode_bytes(s)
            .map(Bytes)
            .map_err(|e| DecodeError::malformed(name, e))
    }

    pub fn hash(&self, name: &str) -> DecodeResult<Hash> {
        hash_value(name, self.require(name)?)
    }

    pub fn opt_hash(&self, name: &str) -> DecodeResult<Option<Hash>> {
        self.get(name).map(|v| hash_value(name, v)).transpose()
    }

    /// Boolean with a default for absent fields.
    pub fn bool_or(&self, name: &str, default: bool) -> DecodeResult<bool> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(DecodeError::invalid(
                name,
                format!("expected a boolean, got {}", json_kind(other)),
            )),
        }
    }

    pub fn string(&self, name: &str) -> DecodeResult<&'a str> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| {
            DecodeError::invalid(name, format!("expected a string, got {}", json_kind(value)))
        })
    }

    pub fn array(&self, name: &str) -> DecodeResult<&'a [Value]> {
        array_value(name, self.require(name)?)
    }
}

/// Name of a JSON value's kind, used in error reasons.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn hex_str<'v>(field: &str, value: &'v Value) -> DecodeResult<&'v str> {
    value.as_str().ok_or_else(|| DecodeError::MalformedHex {
        field: field.to_string(),
        reason: format!("expected a hex string, got {}", json_kind(value)),
    })
}

pub(crate) fn array_value<'v>(field: &str, value: &'v Value) -> DecodeResult<&'v [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        DecodeError::invalid(field, format!("expected an array, got {}", json_kind(value)))
    })
}

/// A quantity given as `0x` hex or as a non-negative JSON integer.
pub(crate) fn quantity_value(field: &str, value: &Value) -> DecodeResult<U256> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| DecodeError::invalid(field, format!("{n} is not a non-negative integer"))),
        _ => hex::parse_quantity(hex_str(field, value)?).map_err(|e| DecodeError::malformed(field, e)),
    }
}

/// Same as [`quantity_value`], bounded to 64 bits.
pub(crate) fn u64_value(field: &str, value: &Value) -> DecodeResult<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| DecodeError::invalid(field, format!("{n} is not a non-negative integer"))),
        _ => hex::parse_u64(hex_str(field, value)?).map_err(|e| DecodeError::malformed(field, e)),
    }
}

pub(crate) fn address_value(field: &str, value: &Value) -> DecodeResult<Address> {
    hex::parse_address(hex_str(field, value)?).map_err(|e| DecodeError::malformed(field, e))
}

pub(crate) fn hash_value(field: &str, value: &Value) -> DecodeResult<Hash> {
    hex::parse_hash(hex_str(field, value)?).map_err(|e| DecodeError::malformed(field, e))
}
