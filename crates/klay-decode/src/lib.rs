//! # Klay Decode
//!
//! Polymorphic decoding of Klaytn JSON-RPC payloads into typed values.
//!
//! ## Purpose
//!
//! Klaytn nodes answer with flat JSON records whose shape is chosen by a tag:
//! `keyType` for account keys, `accType` for accounts, `type` / `typeInt` for
//! the 24 transaction variants, and a string key for governance items. This
//! crate turns those records into closed Rust enums, enforces the key
//! invariants the network enforces, and projects transactions back into the
//! canonical record.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   DecodeApi    ┌───────────────┐   RlpKeyDecoder   ┌─────────────┐
//! │ RPC consumer │ ─────────────→ │ DecodeService │ ────────────────→ │ RLP codec   │
//! └──────────────┘                └───────────────┘   (encoded keys)  └─────────────┘
//!                                         │
//!                                         ↓
//!                                  domain decoders
//! ```
//!
//! ## Invariants
//!
//! - Weighted multisig keys: 1..=10 keys, distinct, non-zero weights, and the
//!   total weight reaches the threshold
//! - Role-based keys: at most three roles, none of them role-based
//! - Fee ratios lie in 1..=99
//! - A record's `type` and `typeInt` never disagree
//!
//! ## Usage
//!
//! ```rust,ignore
//! use klay_decode::{DecodeApi, DecodeService, DecoderConfig};
//!
//! let service = DecodeService::new(DecoderConfig::from_env()?)?;
//! let tx = service.decode_rpc_transaction(&record)?;
//! println!("{} from {:?}", tx.transaction.tx_type(), tx.transaction.common().from);
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use config::{ConfigError, DecoderConfig, MAX_WEIGHTED_KEYS};
pub use domain::account::{
    decode_account, decode_account_response, AccType, Account, CodeFormat, Eoa, SmartContract,
};
pub use domain::account_key::{
    decode_account_key, decode_account_key_record, AccountKey, AccountKeyType, PublicKey,
    RoleBasedKey, RoleGroup, WeightedMultiSig, WeightedPublicKey, MAX_ROLES,
};
pub use domain::context::DecodeContext;
pub use domain::errors::{DecodeError, DecodeResult};
pub use domain::governance::{
    lookup, project, GovernanceItems, Vote, VoteItem, VoteValue, VoteValueType, Votes,
};
pub use domain::signature::{
    decode_signature, decode_signatures, signatures_to_json, SignatureData,
};
pub use domain::transaction::{
    decode_rpc_transaction, decode_transaction, decode_transaction_record, RpcTransaction,
    Transaction, TxCommon, TxType,
};
pub use ports::inbound::DecodeApi;
pub use ports::outbound::{NoRlpKeyDecoder, RlpKeyDecoder};
pub use service::DecodeService;
