//! # Transaction Decoding Flows
//!
//! Full RPC records for every transaction type, canonical re-projection,
//! and rejection of malformed or contradictory records.

#[cfg(test)]
mod tests {
    use crate::fixtures::{minimal_fields, rpc_record, seeded_public_key, BLOCK_HASH, FEE_PAYER};
    use klay_decode::{
        decode_rpc_transaction, decode_transaction, decode_transaction_record, AccountKey,
        DecodeError, Transaction, TxType,
    };
    use serde_json::json;
    use shared_types::{hex, U256};

    // =========================================================================
    // EXHAUSTIVENESS
    // =========================================================================

    #[test]
    fn test_all_types_decode_from_rpc_records() {
        assert_eq!(TxType::ALL.len(), 24);
        for (nonce, &tx_type) in TxType::ALL.iter().enumerate() {
            let rpc = decode_rpc_transaction(&rpc_record(tx_type, nonce as u64))
                .unwrap_or_else(|e| panic!("{tx_type}: {e}"));
            assert_eq!(rpc.transaction.tx_type(), tx_type);
            assert_eq!(rpc.transaction.common().nonce, nonce as u64);
            assert_eq!(rpc.block_hash, Some(hex::parse_hash(BLOCK_HASH).unwrap()));
            assert_eq!(rpc.block_number, Some(0x1b4));
            assert_eq!(rpc.transaction_index, Some(0));
        }
    }

    #[test]
    fn test_tags_and_codes_are_unique() {
        for (i, a) in TxType::ALL.iter().enumerate() {
            for b in &TxType::ALL[i + 1..] {
                assert_ne!(a.tag(), b.tag());
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let fields = minimal_fields(TxType::ValueTransfer);
        assert_eq!(
            decode_transaction("txtypevaluetransfer", &fields),
            Err(DecodeError::UnknownTransactionType("txtypevaluetransfer".into()))
        );
    }

    // =========================================================================
    // ROUND TRIP
    // =========================================================================

    #[test]
    fn test_rpc_round_trip_for_every_type() {
        for &tx_type in TxType::ALL {
            let rpc = decode_rpc_transaction(&rpc_record(tx_type, 9)).unwrap();
            assert_eq!(decode_rpc_transaction(&rpc.to_json()), Ok(rpc.clone()));
        }
    }

    #[test]
    fn test_projection_keeps_hex_values() {
        let tx = decode_transaction(
            "TxTypeFeeDelegatedValueTransferWithRatio",
            &minimal_fields(TxType::FeeDelegatedValueTransferWithRatio),
        )
        .unwrap();
        let fields = tx.to_fields();
        assert_eq!(fields["type"], "TxTypeFeeDelegatedValueTransferWithRatio");
        assert_eq!(fields["typeInt"], 0x0a);
        assert_eq!(fields["value"], "0xde0b6b3a7640000");
        assert_eq!(fields["feePayer"], FEE_PAYER);
        assert_eq!(fields["feeRatio"], "0x1e");
        assert_eq!(fields["signatures"][0]["V"], "0x0fe9");
        assert_eq!(fields["feePayerSignatures"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let mut fields = minimal_fields(TxType::ValueTransfer);
        fields["to"] = json!("0x7B65B75D204ABED71587C9E519A89277766EE1D0");
        fields["value"] = json!("0xDE0B6B3A7640000");
        let Transaction::ValueTransfer(body) =
            decode_transaction("TxTypeValueTransfer", &fields).unwrap()
        else {
            panic!("expected ValueTransfer");
        };
        assert_eq!(body.value, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(
            hex::encode_address(&body.to),
            "0x7b65b75d204abed71587c9e519a89277766ee1d0"
        );
    }

    // =========================================================================
    // TYPE RESOLUTION
    // =========================================================================

    #[test]
    fn test_type_int_alone_selects_variant() {
        let mut record = minimal_fields(TxType::Cancel);
        record["typeInt"] = json!(0x38);
        let tx = decode_transaction_record(&record).unwrap();
        assert_eq!(tx.tx_type(), TxType::Cancel);
    }

    #[test]
    fn test_type_and_type_int_conflict() {
        let mut record = rpc_record(TxType::ValueTransfer, 0);
        record["typeInt"] = json!(0x38);
        assert!(matches!(
            decode_rpc_transaction(&record),
            Err(DecodeError::TransactionTypeConflict { .. })
        ));
    }

    #[test]
    fn test_record_without_type() {
        assert_eq!(
            decode_transaction_record(&minimal_fields(TxType::Cancel)),
            Err(DecodeError::MissingRequiredField("type".into()))
        );
    }

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    #[test]
    fn test_fee_ratio_out_of_range() {
        let mut record = rpc_record(TxType::FeeDelegatedCancelWithRatio, 0);
        record["feeRatio"] = json!("0x64");
        assert_eq!(
            decode_rpc_transaction(&record),
            Err(DecodeError::InvalidFeeRatio(100))
        );
    }

    #[test]
    fn test_missing_fee_payer() {
        let mut record = rpc_record(TxType::FeeDelegatedSmartContractExecution, 0);
        record.as_object_mut().unwrap().remove("feePayer");
        assert_eq!(
            decode_rpc_transaction(&record),
            Err(DecodeError::MissingRequiredField("feePayer".into()))
        );
    }

    #[test]
    fn test_malformed_nonce_names_field() {
        let mut record = rpc_record(TxType::ValueTransfer, 0);
        record["nonce"] = json!("0xzz");
        let err = decode_rpc_transaction(&record).unwrap_err();
        assert_eq!(err.kind(), "malformed_hex");
        assert_eq!(err.field(), Some("nonce"));
    }

    #[test]
    fn test_account_update_key_invariants_propagate() {
        let key = seeded_public_key(3).to_json();
        let mut record = rpc_record(TxType::FeeDelegatedAccountUpdate, 0);
        record["key"] = json!({
            "keyType": 4,
            "key": {"threshold": 3, "keys": [{"weight": 1, "key": key}]}
        });
        assert_eq!(
            decode_rpc_transaction(&record),
            Err(DecodeError::UnsatisfiableThreshold {
                threshold: 3,
                total: 1
            })
        );
    }

    #[test]
    fn test_account_update_with_constant_rlp_key() {
        let mut record = rpc_record(TxType::AccountUpdate, 0);
        record["key"] = json!("0x01c0");
        let Transaction::AccountUpdate(body) = decode_rpc_transaction(&record).unwrap().transaction
        else {
            panic!("expected AccountUpdate");
        };
        assert_eq!(body.key, AccountKey::Legacy);
    }
}
