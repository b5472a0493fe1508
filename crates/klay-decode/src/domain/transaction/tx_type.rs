//! Closed table of transaction types.
//!
//! Each type has a string tag (the `type` field of an RPC transaction) and an
//! integer code (`typeInt`). Lookups in both directions are plain `match`
//! expressions generated from the single table below.

use std::fmt;

macro_rules! tx_types {
    ($( $variant:ident => $tag:literal, $code:literal; )*) => {
        /// Transaction type discriminator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TxType {
            $( $variant, )*
        }

        impl TxType {
            /// Every known type, in code order.
            pub const ALL: &'static [TxType] = &[ $( TxType::$variant, )* ];

            /// Wire tag, e.g. `TxTypeValueTransfer`.
            pub fn tag(self) -> &'static str {
                match self {
                    $( TxType::$variant => $tag, )*
                }
            }

            /// Integer code, e.g. `0x08`.
            pub fn code(self) -> u16 {
                match self {
                    $( TxType::$variant => $code, )*
                }
            }

            /// Case-sensitive tag lookup.
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $( $tag => Some(TxType::$variant), )*
                    _ => None,
                }
            }

            pub fn from_code(code: u64) -> Option<Self> {
                match code {
                    $( $code => Some(TxType::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

tx_types! {
    LegacyTransaction => "TxTypeLegacyTransaction", 0x00;
    ValueTransfer => "TxTypeValueTransfer", 0x08;
    FeeDelegatedValueTransfer => "TxTypeFeeDelegatedValueTransfer", 0x09;
    FeeDelegatedValueTransferWithRatio => "TxTypeFeeDelegatedValueTransferWithRatio", 0x0a;
    ValueTransferMemo => "TxTypeValueTransferMemo", 0x10;
    FeeDelegatedValueTransferMemo => "TxTypeFeeDelegatedValueTransferMemo", 0x11;
    FeeDelegatedValueTransferMemoWithRatio => "TxTypeFeeDelegatedValueTransferMemoWithRatio", 0x12;
    AccountUpdate => "TxTypeAccountUpdate", 0x20;
    FeeDelegatedAccountUpdate => "TxTypeFeeDelegatedAccountUpdate", 0x21;
    FeeDelegatedAccountUpdateWithRatio => "TxTypeFeeDelegatedAccountUpdateWithRatio", 0x22;
    SmartContractDeploy => "TxTypeSmartContractDeploy", 0x28;
    FeeDelegatedSmartContractDeploy => "TxTypeFeeDelegatedSmartContractDeploy", 0x29;
    FeeDelegatedSmartContractDeployWithRatio => "TxTypeFeeDelegatedSmartContractDeployWithRatio", 0x2a;
    SmartContractExecution => "TxTypeSmartContractExecution", 0x30;
    FeeDelegatedSmartContractExecution => "TxTypeFeeDelegatedSmartContractExecution", 0x31;
    FeeDelegatedSmartContractExecutionWithRatio => "TxTypeFeeDelegatedSmartContractExecutionWithRatio", 0x32;
    Cancel => "TxTypeCancel", 0x38;
    FeeDelegatedCancel => "TxTypeFeeDelegatedCancel", 0x39;
    FeeDelegatedCancelWithRatio => "TxTypeFeeDelegatedCancelWithRatio", 0x3a;
    ChainDataAnchoring => "TxTypeChainDataAnchoring", 0x48;
    FeeDelegatedChainDataAnchoring => "TxTypeFeeDelegatedChainDataAnchoring", 0x49;
    FeeDelegatedChainDataAnchoringWithRatio => "TxTypeFeeDelegatedChainDataAnchoringWithRatio", 0x4a;
    EthereumAccessList => "TxTypeEthereumAccessList", 0x7801;
    EthereumDynamicFee => "TxTypeEthereumDynamicFee", 0x7802;
}

impl TxType {
    /// Carries a fee payer and fee payer signatures.
    pub fn is_fee_delegated(self) -> bool {
        self.tag().starts_with("TxTypeFeeDelegated")
    }

    /// Carries a fee ratio on top of fee delegation.
    pub fn has_fee_ratio(self) -> bool {
        self.is_fee_delegated() && self.tag().ends_with("WithRatio")
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
