//! # Decoder Properties
//!
//! proptest properties over the decoders:
//!
//! - Weighted multisig: duplicates are found before zero weights, zero weights
//!   before an unreachable threshold
//! - Role-based keys never nest, at any role position
//! - Signature arrays keep their order
//! - Every transaction re-projects into its input field values, and the
//!   projection decodes to itself
//! - Tags outside the table are always rejected

#[cfg(test)]
mod tests {
    use crate::fixtures::{minimal_fields, multisig_payload, seeded_public_key, R, S};
    use klay_decode::{
        decode_account_key, decode_signatures, decode_transaction, decode_transaction_record,
        DecodeError, SignatureData, TxType,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn keys_for(weights: &[u64]) -> Vec<(u64, klay_decode::PublicKey)> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (w, seeded_public_key(i as u64)))
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        // =====================================================================
        // WEIGHTED MULTISIG
        // =====================================================================

        #[test]
        fn prop_multisig_outcome(
            weights in prop::collection::vec(0u64..8, 1..=10),
            threshold in 0u64..40,
        ) {
            let payload = multisig_payload(threshold, &keys_for(&weights));
            let result = decode_account_key(0x04, &payload);
            let total: u64 = weights.iter().sum();

            if let Some(index) = weights.iter().position(|&w| w == 0) {
                prop_assert_eq!(result, Err(DecodeError::KeyWeightZero { index }));
            } else if threshold == 0 || total < threshold {
                prop_assert_eq!(result, Err(DecodeError::UnsatisfiableThreshold { threshold, total }));
            } else {
                prop_assert!(result.is_ok());
            }
        }

        #[test]
        fn prop_duplicate_checked_first(
            weights in prop::collection::vec(0u64..8, 2..=10),
            threshold in 0u64..1000,
            pick in any::<prop::sample::Index>(),
        ) {
            let mut keys = keys_for(&weights);
            let dup = 1 + pick.index(keys.len() - 1);
            keys[dup].1 = keys[0].1.clone();

            let result = decode_account_key(0x04, &multisig_payload(threshold, &keys));
            prop_assert_eq!(result, Err(DecodeError::KeyDuplicated { index: dup }));
        }

        #[test]
        fn prop_too_many_keys(extra in 1usize..5) {
            let weights = vec![1u64; 10 + extra];
            let result = decode_account_key(0x04, &multisig_payload(1, &keys_for(&weights)));
            prop_assert_eq!(result, Err(DecodeError::TooLongLength { len: 10 + extra, max: 10 }));
        }

        // =====================================================================
        // ROLE-BASED
        // =====================================================================

        #[test]
        fn prop_role_based_never_nests(
            roles in 1usize..=3,
            pick in any::<prop::sample::Index>(),
            depth in 1usize..6,
        ) {
            let nested_at = pick.index(roles);
            let mut nested = json!({"keyType": 1, "key": {}});
            for _ in 0..depth {
                nested = json!({"keyType": 5, "key": [nested]});
            }
            let entries: Vec<Value> = (0..roles)
                .map(|i| if i == nested_at { nested.clone() } else { json!({"keyType": 1, "key": {}}) })
                .collect();

            let result = decode_account_key(0x05, &Value::Array(entries));
            prop_assert_eq!(result, Err(DecodeError::NestedRoleBasedKey { role: nested_at }));
        }

        // =====================================================================
        // SIGNATURES
        // =====================================================================

        #[test]
        fn prop_signature_order_preserved(vs in prop::collection::vec(any::<u16>(), 0..8)) {
            let input: Vec<Value> = vs
                .iter()
                .map(|v| json!({"V": format!("0x{v:04x}"), "R": R, "S": S}))
                .collect();
            let decoded = decode_signatures(&Value::Array(input)).unwrap();
            let expected: Vec<SignatureData> = vs
                .iter()
                .map(|v| SignatureData::new(v.to_be_bytes().to_vec(), decoded_r(), decoded_s()))
                .collect();
            prop_assert_eq!(decoded, expected);
        }

        // =====================================================================
        // TRANSACTIONS
        // =====================================================================

        #[test]
        fn prop_transaction_round_trip(
            pick in any::<prop::sample::Index>(),
            nonce in any::<u64>(),
            gas in any::<u64>(),
            value in any::<u128>(),
            ratio in 1u64..=99,
        ) {
            let tx_type = TxType::ALL[pick.index(TxType::ALL.len())];
            let mut fields = minimal_fields(tx_type);
            fields["nonce"] = json!(format!("0x{nonce:x}"));
            fields["gas"] = json!(format!("0x{gas:x}"));
            fields["value"] = json!(format!("0x{value:x}"));
            if tx_type.has_fee_ratio() {
                fields["feeRatio"] = json!(format!("0x{ratio:x}"));
            }

            let tx = decode_transaction(tx_type.tag(), &fields).unwrap();
            let projected = tx.to_fields();
            for (key, written) in projected.as_object().unwrap() {
                if key == "type" || key == "typeInt" {
                    continue;
                }
                prop_assert_eq!(Some(written), fields.get(key), "field {}", key);
            }
            prop_assert_eq!(decode_transaction_record(&projected), Ok(tx.clone()));
            prop_assert_eq!(decode_transaction_record(&projected).unwrap().to_fields(), projected);
        }

        #[test]
        fn prop_unknown_tags_rejected(tag in "[A-Za-z]{1,24}") {
            prop_assume!(TxType::from_tag(&tag).is_none());
            let result = decode_transaction(&tag, &minimal_fields(TxType::ValueTransfer));
            prop_assert_eq!(result, Err(DecodeError::UnknownTransactionType(tag.clone())));
        }
    }

    fn decoded_r() -> Vec<u8> {
        shared_types::hex::decode_bytes(R).unwrap()
    }

    fn decoded_s() -> Vec<u8> {
        shared_types::hex::decode_bytes(S).unwrap()
    }
}
