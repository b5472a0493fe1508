//! # Transactions
//!
//! A Klaytn RPC transaction is one flat JSON record. Its `type` tag selects
//! which of 24 variants it is and therefore which fields are meaningful.
//! Decoding picks the variant from the closed [`TxType`] table, checks that
//! every field the variant requires is present, then parses those fields.
//!
//! [`Transaction::to_fields`] projects a value back into the canonical flat
//! record, and decoding that record yields the same value.

mod body;
mod decode;
mod tx_type;

pub use body::{
    AccessList, AccessListItem, AccountUpdate, Cancel, ChainDataAnchoring, EthereumAccessList,
    EthereumDynamicFee, FeeDelegated, FeeDelegatedWithRatio, FeeRatio, LegacyTransaction,
    SmartContractDeploy, SmartContractExecution, TxCommon, ValueTransfer, ValueTransferMemo,
};
pub use decode::{
    decode_rpc_transaction, decode_transaction, decode_transaction_record, RpcTransaction,
};
pub use tx_type::TxType;

use crate::domain::context::DecodeContext;
use crate::domain::errors::DecodeResult;
use crate::domain::fields::FieldReader;
use body::TxBody;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use shared_types::Address;

macro_rules! transactions {
    ($( $variant:ident($body:ty), )*) => {
        /// Decoded transaction. Variant names match [`TxType`] one to one.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Transaction {
            $( $variant($body), )*
        }

        impl Transaction {
            pub fn tx_type(&self) -> TxType {
                match self {
                    $( Transaction::$variant(_) => TxType::$variant, )*
                }
            }

            /// Fields shared by every variant.
            pub fn common(&self) -> &TxCommon {
                match self {
                    $( Transaction::$variant(body) => body.common(), )*
                }
            }

            /// Fee payer of a fee-delegated variant.
            pub fn fee_payer(&self) -> Option<&Address> {
                match self {
                    $( Transaction::$variant(body) => body.fee_payer(), )*
                }
            }

            /// Fee ratio of a ratio variant.
            pub fn fee_ratio(&self) -> Option<FeeRatio> {
                match self {
                    $( Transaction::$variant(body) => body.fee_ratio(), )*
                }
            }

            fn write_body(&self, map: &mut Map<String, Value>) {
                match self {
                    $( Transaction::$variant(body) => body.write_fields(map), )*
                }
            }
        }

        /// Field names `tx_type` requires, common fields first.
        pub(crate) fn required_fields(tx_type: TxType) -> Vec<&'static str> {
            let mut out = TxCommon::REQUIRED.to_vec();
            match tx_type {
                $( TxType::$variant => <$body as TxBody>::required_fields(&mut out), )*
            }
            out
        }

        fn read_body(
            tx_type: TxType,
            reader: &FieldReader<'_>,
            ctx: &DecodeContext<'_>,
        ) -> DecodeResult<Transaction> {
            match tx_type {
                $( TxType::$variant => <$body as TxBody>::read(reader, ctx).map(Transaction::$variant), )*
            }
        }
    };
}

transactions! {
    LegacyTransaction(LegacyTransaction),
    ValueTransfer(ValueTransfer),
    FeeDelegatedValueTransfer(FeeDelegated<ValueTransfer>),
    FeeDelegatedValueTransferWithRatio(FeeDelegatedWithRatio<ValueTransfer>),
    ValueTransferMemo(ValueTransferMemo),
    FeeDelegatedValueTransferMemo(FeeDelegated<ValueTransferMemo>),
    FeeDelegatedValueTransferMemoWithRatio(FeeDelegatedWithRatio<ValueTransferMemo>),
    AccountUpdate(AccountUpdate),
    FeeDelegatedAccountUpdate(FeeDelegated<AccountUpdate>),
    FeeDelegatedAccountUpdateWithRatio(FeeDelegatedWithRatio<AccountUpdate>),
    SmartContractDeploy(SmartContractDeploy),
    FeeDelegatedSmartContractDeploy(FeeDelegated<SmartContractDeploy>),
    FeeDelegatedSmartContractDeployWithRatio(FeeDelegatedWithRatio<SmartContractDeploy>),
    SmartContractExecution(SmartContractExecution),
    FeeDelegatedSmartContractExecution(FeeDelegated<SmartContractExecution>),
    FeeDelegatedSmartContractExecutionWithRatio(FeeDelegatedWithRatio<SmartContractExecution>),
    Cancel(Cancel),
    FeeDelegatedCancel(FeeDelegated<Cancel>),
    FeeDelegatedCancelWithRatio(FeeDelegatedWithRatio<Cancel>),
    ChainDataAnchoring(ChainDataAnchoring),
    FeeDelegatedChainDataAnchoring(FeeDelegated<ChainDataAnchoring>),
    FeeDelegatedChainDataAnchoringWithRatio(FeeDelegatedWithRatio<ChainDataAnchoring>),
    EthereumAccessList(EthereumAccessList),
    EthereumDynamicFee(EthereumDynamicFee),
}

impl Transaction {
    /// Canonical flat record: `type`, `typeInt`, then the variant's fields
    /// with lowercase minimal hex quantities.
    pub fn to_fields(&self) -> Value {
        let tx_type = self.tx_type();
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(tx_type.tag()));
        map.insert("typeInt".to_string(), Value::from(tx_type.code()));
        self.write_body(&mut map);
        Value::Object(map)
    }
}

impl Serialize for Transaction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_fields().serialize(serializer)
    }
}
