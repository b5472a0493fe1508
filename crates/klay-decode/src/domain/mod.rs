//! # Domain Layer
//!
//! Pure decoders from `serde_json::Value` to typed values. No I/O.

pub mod account;
pub mod account_key;
pub mod context;
pub mod errors;
pub(crate) mod fields;
pub mod governance;
pub mod invariants;
pub mod signature;
pub mod transaction;
