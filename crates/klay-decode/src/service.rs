//! # Decode Service
//!
//! Application service layer that implements the `DecodeApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`DecodeApi`)
//! - Hands RLP-encoded account keys to the outbound port (`RlpKeyDecoder`)
//! - Delegates decoding to the domain layer and logs every outcome

use crate::config::{ConfigError, DecoderConfig};
use crate::domain::account::Account;
use crate::domain::account_key::AccountKey;
use crate::domain::context::DecodeContext;
use crate::domain::errors::DecodeResult;
use crate::domain::governance::{GovernanceItems, Votes};
use crate::domain::signature::{decode_signatures, SignatureData};
use crate::domain::transaction::{RpcTransaction, Transaction};
use crate::ports::inbound::DecodeApi;
use crate::ports::outbound::{NoRlpKeyDecoder, RlpKeyDecoder};
use klay_telemetry::log_decode_event;
use serde_json::Value;

/// Decode service.
///
/// Holds a validated [`DecoderConfig`] and the RLP key collaborator. Cheap to
/// share across threads; every call builds a borrowed [`DecodeContext`].
#[derive(Debug)]
pub struct DecodeService<R: RlpKeyDecoder = NoRlpKeyDecoder> {
    config: DecoderConfig,
    rlp_keys: R,
}

impl DecodeService<NoRlpKeyDecoder> {
    /// Create a service without an RLP key collaborator.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        Self::with_rlp_decoder(config, NoRlpKeyDecoder)
    }
}

impl Default for DecodeService<NoRlpKeyDecoder> {
    fn default() -> Self {
        Self {
            config: DecoderConfig::default(),
            rlp_keys: NoRlpKeyDecoder,
        }
    }
}

impl<R: RlpKeyDecoder> DecodeService<R> {
    /// Create a service that forwards encoded account keys to `rlp_keys`.
    ///
    /// # Errors
    /// * `ConfigError` - the configuration fails validation
    pub fn with_rlp_decoder(config: DecoderConfig, rlp_keys: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rlp_keys })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    fn context(&self) -> DecodeContext<'_> {
        DecodeContext::new(&self.config, &self.rlp_keys)
    }

    fn observe<T>(&self, operation: &'static str, tag: &str, result: DecodeResult<T>) -> DecodeResult<T> {
        match &result {
            Ok(_) => log_decode_event!(debug, operation, "decoded", tag = tag),
            Err(err) => log_decode_event!(
                warn,
                operation,
                "rejected",
                tag = tag,
                error_kind = err.kind(),
                field = err.field().unwrap_or_default(),
                error = %err
            ),
        }
        result
    }
}

impl<R: RlpKeyDecoder> DecodeApi for DecodeService<R> {
    fn decode_signatures(&self, value: &Value) -> DecodeResult<Vec<SignatureData>> {
        self.observe("decode_signatures", "", decode_signatures(value))
    }

    fn decode_account_key(&self, type_tag: u8, payload: &Value) -> DecodeResult<AccountKey> {
        let tag = format!("{type_tag:#04x}");
        let result = self.context().account_key(u64::from(type_tag), payload);
        self.observe("decode_account_key", &tag, result)
    }

    fn decode_account_key_record(&self, record: &Value) -> DecodeResult<AccountKey> {
        let result = self.context().account_key_record(record);
        self.observe("decode_account_key_record", "", result)
    }

    fn decode_account(&self, acc_type: u64, payload: &Value) -> DecodeResult<Account> {
        let result = self.context().account(acc_type, payload);
        self.observe("decode_account", &acc_type.to_string(), result)
    }

    fn decode_account_response(&self, response: &Value) -> DecodeResult<Account> {
        let result = self.context().account_response(response);
        self.observe("decode_account_response", "", result)
    }

    fn decode_transaction(&self, type_tag: &str, fields: &Value) -> DecodeResult<Transaction> {
        let result = self.context().transaction(type_tag, fields);
        self.observe("decode_transaction", type_tag, result)
    }

    fn decode_transaction_record(&self, record: &Value) -> DecodeResult<Transaction> {
        let result = self.context().transaction_record(record);
        let tag = record_tag(record);
        self.observe("decode_transaction_record", tag, result)
    }

    fn decode_rpc_transaction(&self, record: &Value) -> DecodeResult<RpcTransaction> {
        let result = self.context().rpc_transaction(record);
        self.observe("decode_rpc_transaction", record_tag(record), result)
    }

    fn decode_transactions(&self, records: &[Value]) -> Vec<DecodeResult<RpcTransaction>> {
        let ctx = self.context();
        let results: Vec<_> = records
            .iter()
            .enumerate()
            .map(|(record_index, record)| {
                let result = ctx.rpc_transaction(record);
                if let Err(err) = &result {
                    log_decode_event!(
                        warn,
                        "decode_transactions",
                        "record rejected",
                        record_index = record_index,
                        tag = record_tag(record),
                        error_kind = err.kind(),
                        error = %err
                    );
                }
                result
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        log_decode_event!(
            debug,
            "decode_transactions",
            "batch decoded",
            total = results.len(),
            failed = failed
        );
        results
    }

    fn decode_governance_items(&self, value: &Value) -> DecodeResult<GovernanceItems> {
        self.observe("decode_governance_items", "", GovernanceItems::from_json(value))
    }

    fn decode_votes(&self, value: &Value) -> DecodeResult<Votes> {
        self.observe("decode_votes", "", Votes::from_json(value))
    }
}

/// `type` tag of a raw record, for log context only.
fn record_tag(record: &Value) -> &str {
    record.get("type").and_then(Value::as_str).unwrap_or_default()
}
