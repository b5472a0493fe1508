//! Transaction bodies.
//!
//! Every body embeds a [`TxCommon`] and adds the fields its type requires.
//! Fee-delegated variants wrap a body in [`FeeDelegated`] or
//! [`FeeDelegatedWithRatio`] instead of repeating it.

use crate::domain::account::CodeFormat;
use crate::domain::account_key::AccountKey;
use crate::domain::context::DecodeContext;
use crate::domain::errors::{DecodeError, DecodeResult};
use crate::domain::fields::{hash_value, quantity_value, FieldReader};
use crate::domain::signature::{decode_signature_list, signatures_to_json, SignatureData};
use serde_json::{json, Map, Value};
use shared_types::{hex, Address, Bytes, Hash, U256};

/// Reading, writing and field requirements of one body shape.
pub(crate) trait TxBody: Sized {
    /// Names that must be present (and non-null) before any field is parsed.
    fn required_fields(out: &mut Vec<&'static str>);

    fn read(reader: &FieldReader<'_>, ctx: &DecodeContext<'_>) -> DecodeResult<Self>;

    fn write_fields(&self, map: &mut Map<String, Value>);

    fn common(&self) -> &TxCommon;

    fn fee_payer(&self) -> Option<&Address> {
        None
    }

    fn fee_ratio(&self) -> Option<FeeRatio> {
        None
    }
}

fn put(map: &mut Map<String, Value>, name: &str, value: impl Into<Value>) {
    map.insert(name.to_string(), value.into());
}

fn put_quantity(map: &mut Map<String, Value>, name: &str, value: U256) {
    put(map, name, hex::encode_quantity(value));
}

fn put_address(map: &mut Map<String, Value>, name: &str, address: &Address) {
    put(map, name, hex::encode_address(address));
}

fn put_bytes(map: &mut Map<String, Value>, name: &str, bytes: &Bytes) {
    put(map, name, bytes.to_hex());
}

// =============================================================================
// COMMON FIELDS
// =============================================================================

/// Fields shared by every transaction type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxCommon {
    pub from: Address,
    pub nonce: u64,
    pub gas: u64,
    pub chain_id: Option<U256>,
    pub signatures: Vec<SignatureData>,
}

impl TxCommon {
    pub(crate) const REQUIRED: [&'static str; 4] = ["from", "nonce", "gas", "signatures"];

    fn read(reader: &FieldReader<'_>) -> DecodeResult<Self> {
        let chain_id = reader
            .get_any(&["chainId", "chainID"])
            .map(|(name, value)| quantity_value(name, value))
            .transpose()?;
        Ok(Self {
            from: reader.address("from")?,
            nonce: reader.u64("nonce")?,
            gas: reader.u64("gas")?,
            chain_id,
            signatures: decode_signature_list("signatures", reader.require("signatures")?)?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        put_address(map, "from", &self.from);
        put(map, "nonce", hex::encode_u64(self.nonce));
        put(map, "gas", hex::encode_u64(self.gas));
        if let Some(chain_id) = self.chain_id {
            put_quantity(map, "chainId", chain_id);
        }
        put(map, "signatures", signatures_to_json(&self.signatures));
    }
}

// =============================================================================
// ACCESS LIST
// =============================================================================

/// One pre-declared `(address, storage keys)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<Hash>,
}

pub type AccessList = Vec<AccessListItem>;

fn read_access_list(reader: &FieldReader<'_>) -> DecodeResult<AccessList> {
    reader
        .array("accessList")?
        .iter()
        .map(|entry| {
            let entry = FieldReader::component(entry, "accessList")?;
            let storage_keys = entry
                .array("storageKeys")?
                .iter()
                .map(|key| hash_value("storageKeys", key))
                .collect::<DecodeResult<Vec<_>>>()?;
            Ok(AccessListItem {
                address: entry.address("address")?,
                storage_keys,
            })
        })
        .collect()
}

fn access_list_to_json(list: &[AccessListItem]) -> Value {
    Value::Array(
        list.iter()
            .map(|item| {
                let keys: Vec<String> = item.storage_keys.iter().map(hex::encode_hash).collect();
                json!({"address": hex::encode_address(&item.address), "storageKeys": keys})
            })
            .collect(),
    )
}

// =============================================================================
// BODIES
// =============================================================================

/// `TxTypeLegacyTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub common: TxCommon,
    pub gas_price: U256,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
}

impl TxBody for LegacyTransaction {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "value", "input"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            to: reader.opt_address("to")?,
            value: reader.quantity("value")?,
            input: reader.bytes("input")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        if let Some(to) = &self.to {
            put_address(map, "to", to);
        }
        put_quantity(map, "value", self.value);
        put_bytes(map, "input", &self.input);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeValueTransfer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTransfer {
    pub common: TxCommon,
    pub gas_price: U256,
    pub to: Address,
    pub value: U256,
}

impl TxBody for ValueTransfer {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "to", "value"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            to: reader.address("to")?,
            value: reader.quantity("value")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        put_address(map, "to", &self.to);
        put_quantity(map, "value", self.value);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeValueTransferMemo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTransferMemo {
    pub common: TxCommon,
    pub gas_price: U256,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

impl TxBody for ValueTransferMemo {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "to", "value", "input"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            to: reader.address("to")?,
            value: reader.quantity("value")?,
            input: reader.bytes("input")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        put_address(map, "to", &self.to);
        put_quantity(map, "value", self.value);
        put_bytes(map, "input", &self.input);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeAccountUpdate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdate {
    pub common: TxCommon,
    pub gas_price: U256,
    pub key: AccountKey,
}

/// The new key arrives either as a `{keyType, key}` object or as an RLP
/// hex string.
fn read_update_key(reader: &FieldReader<'_>, ctx: &DecodeContext<'_>) -> DecodeResult<AccountKey> {
    match reader.require("key")? {
        Value::String(encoded) => {
            if let Some(key) = AccountKey::from_rlp_constant(encoded) {
                return Ok(key);
            }
            hex::decode_bytes(encoded).map_err(|e| DecodeError::malformed("key", e))?;
            ctx.rlp_keys.decode_rlp_key(encoded)
        }
        record => ctx.account_key_record(record),
    }
}

impl TxBody for AccountUpdate {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "key"]);
    }

    fn read(reader: &FieldReader<'_>, ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        let common = TxCommon::read(reader)?;
        let gas_price = reader.quantity("gasPrice")?;
        let key = read_update_key(reader, ctx)?;
        Ok(Self {
            common,
            gas_price,
            key,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        put(map, "key", self.key.to_json());
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeSmartContractDeploy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartContractDeploy {
    pub common: TxCommon,
    pub gas_price: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub human_readable: bool,
    pub code_format: CodeFormat,
}

impl TxBody for SmartContractDeploy {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "value", "input"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            to: reader.opt_address("to")?,
            value: reader.quantity("value")?,
            input: reader.bytes("input")?,
            human_readable: reader.bool_or("humanReadable", false)?,
            code_format: CodeFormat::read(reader)?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        if let Some(to) = &self.to {
            put_address(map, "to", to);
        }
        put_quantity(map, "value", self.value);
        put_bytes(map, "input", &self.input);
        put(map, "humanReadable", self.human_readable);
        put(map, "codeFormat", hex::encode_u64(self.code_format.code()));
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeSmartContractExecution`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartContractExecution {
    pub common: TxCommon,
    pub gas_price: U256,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

impl TxBody for SmartContractExecution {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "to", "value", "input"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            to: reader.address("to")?,
            value: reader.quantity("value")?,
            input: reader.bytes("input")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        put_address(map, "to", &self.to);
        put_quantity(map, "value", self.value);
        put_bytes(map, "input", &self.input);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeCancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancel {
    pub common: TxCommon,
    pub gas_price: U256,
}

impl TxBody for Cancel {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.push("gasPrice");
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeChainDataAnchoring`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDataAnchoring {
    pub common: TxCommon,
    pub gas_price: U256,
    /// Anchored service-chain data.
    pub input: Bytes,
}

impl TxBody for ChainDataAnchoring {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "input"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            input: reader.bytes("input")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        put_bytes(map, "input", &self.input);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeEthereumAccessList` (EIP-2930).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthereumAccessList {
    pub common: TxCommon,
    pub gas_price: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
}

impl TxBody for EthereumAccessList {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend(["gasPrice", "value", "input", "accessList"]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.quantity("gasPrice")?,
            to: reader.opt_address("to")?,
            value: reader.quantity("value")?,
            input: reader.bytes("input")?,
            access_list: read_access_list(reader)?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        put_quantity(map, "gasPrice", self.gas_price);
        if let Some(to) = &self.to {
            put_address(map, "to", to);
        }
        put_quantity(map, "value", self.value);
        put_bytes(map, "input", &self.input);
        put(map, "accessList", access_list_to_json(&self.access_list));
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

/// `TxTypeEthereumDynamicFee` (EIP-1559).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthereumDynamicFee {
    pub common: TxCommon,
    /// Effective gas price, reported only for mined transactions.
    pub gas_price: Option<U256>,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
}

impl TxBody for EthereumDynamicFee {
    fn required_fields(out: &mut Vec<&'static str>) {
        out.extend([
            "value",
            "input",
            "accessList",
            "maxPriorityFeePerGas",
            "maxFeePerGas",
        ]);
    }

    fn read(reader: &FieldReader<'_>, _ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        Ok(Self {
            common: TxCommon::read(reader)?,
            gas_price: reader.opt_quantity("gasPrice")?,
            to: reader.opt_address("to")?,
            value: reader.quantity("value")?,
            input: reader.bytes("input")?,
            access_list: read_access_list(reader)?,
            max_priority_fee_per_gas: reader.quantity("maxPriorityFeePerGas")?,
            max_fee_per_gas: reader.quantity("maxFeePerGas")?,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.common.write_fields(map);
        if let Some(gas_price) = self.gas_price {
            put_quantity(map, "gasPrice", gas_price);
        }
        if let Some(to) = &self.to {
            put_address(map, "to", to);
        }
        put_quantity(map, "value", self.value);
        put_bytes(map, "input", &self.input);
        put(map, "accessList", access_list_to_json(&self.access_list));
        put_quantity(map, "maxPriorityFeePerGas", self.max_priority_fee_per_gas);
        put_quantity(map, "maxFeePerGas", self.max_fee_per_gas);
    }

    fn common(&self) -> &TxCommon {
        &self.common
    }
}

// =============================================================================
// FEE DELEGATION
// =============================================================================

/// Share of the fee paid by the fee payer, in percent (1..=99).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeeRatio(u8);

impl FeeRatio {
    pub fn new(ratio: u64) -> DecodeResult<Self> {
        match u8::try_from(ratio) {
            Ok(r @ 1..=99) => Ok(Self(r)),
            _ => Err(DecodeError::InvalidFeeRatio(ratio)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// A body whose fee is paid by a second party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeDelegated<T> {
    pub tx: T,
    pub fee_payer: Address,
    pub fee_payer_signatures: Vec<SignatureData>,
}

/// A body whose fee is split with a second party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeDelegatedWithRatio<T> {
    pub tx: T,
    pub fee_payer: Address,
    pub fee_payer_signatures: Vec<SignatureData>,
    pub fee_ratio: FeeRatio,
}

fn read_fee_payer(reader: &FieldReader<'_>) -> DecodeResult<(Address, Vec<SignatureData>)> {
    let fee_payer = reader.address("feePayer")?;
    let signatures =
        decode_signature_list("feePayerSignatures", reader.require("feePayerSignatures")?)?;
    Ok((fee_payer, signatures))
}

fn write_fee_payer(map: &mut Map<String, Value>, fee_payer: &Address, signatures: &[SignatureData]) {
    put_address(map, "feePayer", fee_payer);
    put(map, "feePayerSignatures", signatures_to_json(signatures));
}

impl<T: TxBody> TxBody for FeeDelegated<T> {
    fn required_fields(out: &mut Vec<&'static str>) {
        T::required_fields(out);
        out.extend(["feePayer", "feePayerSignatures"]);
    }

    fn read(reader: &FieldReader<'_>, ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        let tx = T::read(reader, ctx)?;
        let (fee_payer, fee_payer_signatures) = read_fee_payer(reader)?;
        Ok(Self {
            tx,
            fee_payer,
            fee_payer_signatures,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.tx.write_fields(map);
        write_fee_payer(map, &self.fee_payer, &self.fee_payer_signatures);
    }

    fn common(&self) -> &TxCommon {
        self.tx.common()
    }

    fn fee_payer(&self) -> Option<&Address> {
        Some(&self.fee_payer)
    }
}

impl<T: TxBody> TxBody for FeeDelegatedWithRatio<T> {
    fn required_fields(out: &mut Vec<&'static str>) {
        T::required_fields(out);
        out.extend(["feePayer", "feePayerSignatures", "feeRatio"]);
    }

    fn read(reader: &FieldReader<'_>, ctx: &DecodeContext<'_>) -> DecodeResult<Self> {
        let tx = T::read(reader, ctx)?;
        let (fee_payer, fee_payer_signatures) = read_fee_payer(reader)?;
        let fee_ratio = FeeRatio::new(reader.u64("feeRatio")?)?;
        Ok(Self {
            tx,
            fee_payer,
            fee_payer_signatures,
            fee_ratio,
        })
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        self.tx.write_fields(map);
        write_fee_payer(map, &self.fee_payer, &self.fee_payer_signatures);
        put(map, "feeRatio", hex::encode_u64(u64::from(self.fee_ratio.get())));
    }

    fn common(&self) -> &TxCommon {
        self.tx.common()
    }

    fn fee_payer(&self) -> Option<&Address> {
        Some(&self.fee_payer)
    }

    fn fee_ratio(&self) -> Option<FeeRatio> {
        Some(self.fee_ratio)
    }
}
