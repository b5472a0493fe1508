//! # Inbound Ports (Driving Ports / API)
//!
//! Public decode API of this subsystem.

use crate::domain::account::Account;
use crate::domain::account_key::AccountKey;
use crate::domain::errors::DecodeResult;
use crate::domain::governance::{GovernanceItems, Votes};
use crate::domain::signature::SignatureData;
use crate::domain::transaction::{RpcTransaction, Transaction};
use serde_json::Value;

/// Primary decode API.
///
/// Implementations must be thread-safe (`Send + Sync`). Every method is a
/// pure function of its input and the implementation's configuration.
pub trait DecodeApi: Send + Sync {
    // =========================================================================
    // Signatures and keys
    // =========================================================================

    /// Decode a `[{"V","R","S"}]` array, preserving order.
    fn decode_signatures(&self, value: &Value) -> DecodeResult<Vec<SignatureData>>;

    /// Decode an account key payload for a known tag.
    fn decode_account_key(&self, type_tag: u8, payload: &Value) -> DecodeResult<AccountKey>;

    /// Decode a `{keyType, key}` record.
    fn decode_account_key_record(&self, record: &Value) -> DecodeResult<AccountKey>;

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Decode an account body for the given `accType` code.
    fn decode_account(&self, acc_type: u64, payload: &Value) -> DecodeResult<Account>;

    /// Decode a `klay_getAccount` result.
    fn decode_account_response(&self, response: &Value) -> DecodeResult<Account>;

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Decode `fields` as the variant named by `type_tag`.
    fn decode_transaction(&self, type_tag: &str, fields: &Value) -> DecodeResult<Transaction>;

    /// Decode a record carrying its own `type` / `typeInt`.
    fn decode_transaction_record(&self, record: &Value) -> DecodeResult<Transaction>;

    /// Decode a full RPC transaction object with block metadata.
    fn decode_rpc_transaction(&self, record: &Value) -> DecodeResult<RpcTransaction>;

    /// Decode many records. One bad record does not affect the others.
    fn decode_transactions(&self, records: &[Value]) -> Vec<DecodeResult<RpcTransaction>>;

    // =========================================================================
    // Governance
    // =========================================================================

    /// Read a `{key: value}` governance item map.
    fn decode_governance_items(&self, value: &Value) -> DecodeResult<GovernanceItems>;

    /// Read a governance vote list.
    fn decode_votes(&self, value: &Value) -> DecodeResult<Votes>;
}
