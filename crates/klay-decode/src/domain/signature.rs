//! # Signature Codec
//!
//! Sender and fee-payer signatures arrive as arrays of `{"V","R","S"}`
//! objects. Component names are case-sensitive and no other members are
//! allowed. Order is preserved and duplicates are kept; a single bad element
//! fails the whole array.

use crate::domain::errors::{DecodeError, DecodeResult};
use crate::domain::fields::{array_value, FieldReader};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{hex, Bytes};

/// One `(V, R, S)` signature triple.
///
/// Components are kept as byte strings because Klaytn signatures carry the
/// chain-id-dependent `V` as a variable-width quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureData {
    #[serde(rename = "V")]
    pub v: Bytes,
    #[serde(rename = "R")]
    pub r: Bytes,
    #[serde(rename = "S")]
    pub s: Bytes,
}

impl SignatureData {
    pub fn new(v: impl Into<Bytes>, r: impl Into<Bytes>, s: impl Into<Bytes>) -> Self {
        Self {
            v: v.into(),
            r: r.into(),
            s: s.into(),
        }
    }

    /// Build from hex components. Odd-length hex is left-padded with a zero nibble.
    pub fn from_hex(v: &str, r: &str, s: &str) -> DecodeResult<Self> {
        let read = |field: &str, s: &str| {
            hex::decode_bytes(s)
                .map(Bytes)
                .map_err(|e| DecodeError::malformed(field, e))
        };
        Ok(Self {
            v: read("V", v)?,
            r: read("R", r)?,
            s: read("S", s)?,
        })
    }

    /// Wire form `{"V","R","S"}`.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "V": self.v.to_hex(),
            "R": self.r.to_hex(),
            "S": self.s.to_hex(),
        })
    }
}

/// Decode one `{"V","R","S"}` object.
pub fn decode_signature(value: &Value) -> DecodeResult<SignatureData> {
    let reader = FieldReader::component(value, "signature")?;
    let signature = SignatureData {
        v: reader.bytes("V")?,
        r: reader.bytes("R")?,
        s: reader.bytes("S")?,
    };
    reader.deny_unknown("signature", &["V", "R", "S"])?;
    Ok(signature)
}

/// Decode a signature array in order.
pub fn decode_signatures(value: &Value) -> DecodeResult<Vec<SignatureData>> {
    decode_signature_list("signatures", value)
}

/// Decode a signature array found under `field`.
pub(crate) fn decode_signature_list(field: &str, value: &Value) -> DecodeResult<Vec<SignatureData>> {
    array_value(field, value)?
        .iter()
        .map(decode_signature)
        .collect()
}

/// Wire form of a signature list.
pub fn signatures_to_json(signatures: &[SignatureData]) -> Value {
    Value::Array(signatures.iter().map(SignatureData::to_json).collect())
}
