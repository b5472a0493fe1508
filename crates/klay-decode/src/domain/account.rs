//! # Accounts
//!
//! `klay_getAccount` answers with `{"accType": 1|2, "account": {...}}`.
//! Type 1 is an externally owned account; type 2 a smart contract account.
//! Any other code decodes as a smart contract unless the decoder is
//! configured with `strict_account_type`.

use crate::domain::account_key::AccountKey;
use crate::domain::context::DecodeContext;
use crate::domain::errors::{DecodeError, DecodeResult};
use crate::domain::fields::FieldReader;
use serde_json::{json, Value};
use shared_types::{hex, Hash, U256};

/// Account type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccType {
    Eoa = 1,
    SmartContract = 2,
}

impl AccType {
    /// Lenient mapping: every code other than 1 is a smart contract.
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => AccType::Eoa,
            _ => AccType::SmartContract,
        }
    }

    /// Strict mapping: only 1 and 2 are accepted.
    pub fn from_code_strict(code: u64) -> DecodeResult<Self> {
        match code {
            1 => Ok(AccType::Eoa),
            2 => Ok(AccType::SmartContract),
            other => Err(DecodeError::UnknownAccountType(other)),
        }
    }

    pub fn code(self) -> u64 {
        self as u64
    }
}

/// Bytecode format of a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeFormat {
    #[default]
    Evm = 0,
}

impl CodeFormat {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(CodeFormat::Evm),
            _ => None,
        }
    }

    pub fn code(self) -> u64 {
        self as u64
    }

    /// Read an optional `codeFormat` field, defaulting to EVM.
    pub(crate) fn read(reader: &FieldReader<'_>) -> DecodeResult<Self> {
        match reader.opt_u64("codeFormat")? {
            None => Ok(CodeFormat::default()),
            Some(code) => Self::from_code(code)
                .ok_or_else(|| DecodeError::invalid("codeFormat", format!("unknown code format {code}"))),
        }
    }
}

/// Externally owned account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eoa {
    pub balance: U256,
    pub nonce: u64,
    pub human_readable: bool,
    pub key: AccountKey,
}

/// Smart contract account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartContract {
    pub balance: U256,
    pub nonce: u64,
    pub human_readable: bool,
    pub code_format: CodeFormat,
    /// Kept as the node returns it (base64 on current nodes).
    pub code_hash: String,
    pub storage_root: Hash,
    pub key: AccountKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Eoa(Eoa),
    SmartContract(SmartContract),
}

impl Account {
    pub fn acc_type(&self) -> AccType {
        match self {
            Account::Eoa(_) => AccType::Eoa,
            Account::SmartContract(_) => AccType::SmartContract,
        }
    }

    pub fn balance(&self) -> U256 {
        match self {
            Account::Eoa(a) => a.balance,
            Account::SmartContract(a) => a.balance,
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            Account::Eoa(a) => a.nonce,
            Account::SmartContract(a) => a.nonce,
        }
    }

    pub fn key(&self) -> &AccountKey {
        match self {
            Account::Eoa(a) => &a.key,
            Account::SmartContract(a) => &a.key,
        }
    }

    /// Response envelope `{"accType", "account"}`.
    pub fn to_json(&self) -> Value {
        let account = match self {
            Account::Eoa(a) => json!({
                "balance": hex::encode_quantity(a.balance),
                "nonce": a.nonce,
                "humanReadable": a.human_readable,
                "key": a.key.to_json(),
            }),
            Account::SmartContract(a) => json!({
                "balance": hex::encode_quantity(a.balance),
                "nonce": a.nonce,
                "humanReadable": a.human_readable,
                "codeFormat": hex::encode_u64(a.code_format.code()),
                "codeHash": a.code_hash,
                "storageRoot": hex::encode_hash(&a.storage_root),
                "key": a.key.to_json(),
            }),
        };
        json!({"accType": self.acc_type().code(), "account": account})
    }
}

impl DecodeContext<'_> {
    /// Decode an account body for the given type code.
    pub fn account(&self, acc_type: u64, payload: &Value) -> DecodeResult<Account> {
        let acc_type = if self.config.strict_account_type {
            AccType::from_code_strict(acc_type)?
        } else {
            AccType::from_code(acc_type)
        };

        let reader = FieldReader::record(payload, "account")?;
        let balance = reader.quantity("balance")?;
        let nonce = reader.u64("nonce")?;
        let human_readable = reader.bool_or("humanReadable", false)?;

        match acc_type {
            AccType::Eoa => {
                let key = self.account_key_record(reader.require("key")?)?;
                Ok(Account::Eoa(Eoa {
                    balance,
                    nonce,
                    human_readable,
                    key,
                }))
            }
            AccType::SmartContract => {
                let code_format = CodeFormat::read(&reader)?;
                let code_hash = reader.string("codeHash")?.to_string();
                let storage_root = reader.hash("storageRoot")?;
                let key = self.account_key_record(reader.require("key")?)?;
                Ok(Account::SmartContract(SmartContract {
                    balance,
                    nonce,
                    human_readable,
                    code_format,
                    code_hash,
                    storage_root,
                    key,
                }))
            }
        }
    }

    /// Decode a `klay_getAccount` result envelope.
    pub fn account_response(&self, response: &Value) -> DecodeResult<Account> {
        let reader = FieldReader::record(response, "result")?;
        let acc_type = reader.u64("accType")?;
        self.account(acc_type, reader.require("account")?)
    }
}

/// Decode an account body with default settings.
pub fn decode_account(acc_type: u64, payload: &Value) -> DecodeResult<Account> {
    DecodeContext::standard().account(acc_type, payload)
}

/// Decode a `{accType, account}` envelope with default settings.
pub fn decode_account_response(response: &Value) -> DecodeResult<Account> {
    DecodeContext::standard().account_response(response)
}
