//! Transaction decoding entry points.

use super::{read_body, required_fields, Transaction, TxType};
use crate::domain::context::DecodeContext;
use crate::domain::errors::{DecodeError, DecodeResult};
use crate::domain::fields::FieldReader;
use serde::{Serialize, Serializer};
use serde_json::Value;
use shared_types::{hex, Hash};

/// A transaction as returned by `klay_getTransactionByHash`: the decoded
/// variant plus block placement metadata. Metadata is absent for pending
/// transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcTransaction {
    pub transaction: Transaction,
    pub block_hash: Option<Hash>,
    pub block_number: Option<u64>,
    pub hash: Option<Hash>,
    pub sender_tx_hash: Option<Hash>,
    pub transaction_index: Option<u64>,
}

impl RpcTransaction {
    /// Flat record with metadata fields merged in.
    pub fn to_json(&self) -> Value {
        let mut fields = self.transaction.to_fields();
        if let Value::Object(map) = &mut fields {
            let hashes = [
                ("blockHash", &self.block_hash),
                ("hash", &self.hash),
                ("senderTxHash", &self.sender_tx_hash),
            ];
            for (name, hash) in hashes {
                if let Some(hash) = hash {
                    map.insert(name.to_string(), Value::from(hex::encode_hash(hash)));
                }
            }
            let numbers = [
                ("blockNumber", self.block_number),
                ("transactionIndex", self.transaction_index),
            ];
            for (name, number) in numbers {
                if let Some(number) = number {
                    map.insert(name.to_string(), Value::from(hex::encode_u64(number)));
                }
            }
        }
        fields
    }
}

impl Serialize for RpcTransaction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Resolve the variant from `type` and/or `typeInt`.
fn resolve_type(reader: &FieldReader<'_>) -> DecodeResult<TxType> {
    let by_tag = match reader.get("type") {
        None => None,
        Some(value) => {
            let tag = value
                .as_str()
                .ok_or_else(|| DecodeError::invalid("type", "expected a string tag"))?;
            Some(
                TxType::from_tag(tag)
                    .ok_or_else(|| DecodeError::UnknownTransactionType(tag.to_string()))?,
            )
        }
    };
    let by_code = reader.opt_u64("typeInt")?;

    match (by_tag, by_code) {
        (Some(tx_type), Some(code)) if u64::from(tx_type.code()) != code => {
            Err(DecodeError::TransactionTypeConflict {
                tag: tx_type.tag().to_string(),
                code: hex::encode_u64(code),
            })
        }
        (Some(tx_type), _) => Ok(tx_type),
        (None, Some(code)) => TxType::from_code(code)
            .ok_or_else(|| DecodeError::UnknownTransactionType(hex::encode_u64(code))),
        (None, None) => Err(DecodeError::MissingRequiredField("type".to_string())),
    }
}

impl DecodeContext<'_> {
    /// Decode `fields` as the variant named by `type_tag`.
    pub fn transaction(&self, type_tag: &str, fields: &Value) -> DecodeResult<Transaction> {
        let tx_type = TxType::from_tag(type_tag)
            .ok_or_else(|| DecodeError::UnknownTransactionType(type_tag.to_string()))?;
        self.typed_transaction(tx_type, fields)
    }

    /// Decode `fields` as a known variant.
    pub fn typed_transaction(&self, tx_type: TxType, fields: &Value) -> DecodeResult<Transaction> {
        let reader = FieldReader::record(fields, "transaction")?;
        for name in required_fields(tx_type) {
            reader.require(name)?;
        }
        read_body(tx_type, &reader, self)
    }

    /// Decode a record that names its own type.
    pub fn transaction_record(&self, record: &Value) -> DecodeResult<Transaction> {
        let reader = FieldReader::record(record, "transaction")?;
        let tx_type = resolve_type(&reader)?;
        self.typed_transaction(tx_type, record)
    }

    /// Decode a full RPC transaction object.
    pub fn rpc_transaction(&self, record: &Value) -> DecodeResult<RpcTransaction> {
        let transaction = self.transaction_record(record)?;
        let reader = FieldReader::record(record, "transaction")?;
        Ok(RpcTransaction {
            transaction,
            block_hash: reader.opt_hash("blockHash")?,
            block_number: reader.opt_u64("blockNumber")?,
            hash: reader.opt_hash("hash")?,
            sender_tx_hash: reader.opt_hash("senderTxHash")?,
            transaction_index: reader.opt_u64("transactionIndex")?,
        })
    }
}

/// Decode `fields` as the variant named by `type_tag`, with default settings.
pub fn decode_transaction(type_tag: &str, fields: &Value) -> DecodeResult<Transaction> {
    DecodeContext::standard().transaction(type_tag, fields)
}

/// Decode a self-describing record with default settings.
pub fn decode_transaction_record(record: &Value) -> DecodeResult<Transaction> {
    DecodeContext::standard().transaction_record(record)
}

/// Decode a full RPC transaction object with default settings.
pub fn decode_rpc_transaction(record: &Value) -> DecodeResult<RpcTransaction> {
    DecodeContext::standard().rpc_transaction(record)
}
