//! # Reference Scenarios
//!
//! One test per documented decode scenario, with the exact inputs and
//! outputs callers rely on.

#[cfg(test)]
mod tests {
    use crate::fixtures::{seeded_public_key, ACCESS_ADDRESS, FROM, R, S, STORAGE_KEY, TO};
    use klay_decode::{
        decode_account_key, decode_transaction, project, AccountKey, DecodeError, SignatureData,
        Transaction, VoteValueType,
    };
    use serde_json::json;
    use shared_types::{hex, U256};

    /// Scenario 1: a legacy key consults none of its payload.
    #[test]
    fn test_legacy_key_ignores_payload() {
        assert_eq!(decode_account_key(0x01, &json!({})), Ok(AccountKey::Legacy));
        assert_eq!(
            decode_account_key(0x01, &json!({"garbage": [1, 2, 3]})),
            Ok(AccountKey::Legacy)
        );
    }

    /// Scenario 2: the same public key twice is a duplicate.
    #[test]
    fn test_duplicate_multisig_key() {
        let pub_a = seeded_public_key(1).to_json();
        let payload = json!({
            "threshold": 2,
            "keys": [{"weight": 1, "key": pub_a}, {"weight": 1, "key": pub_a}]
        });
        assert_eq!(
            decode_account_key(0x04, &payload),
            Err(DecodeError::KeyDuplicated { index: 1 })
        );
    }

    /// Scenario 3: an Ethereum access list transaction.
    #[test]
    fn test_ethereum_access_list_transaction() {
        let fields = json!({
            "from": FROM,
            "nonce": "0x0",
            "gas": "0x9c40",
            "gasPrice": "0x5d21dba00",
            "to": TO,
            "value": "0x0",
            "input": "0x",
            "signatures": [{"V": "0x0", "R": R, "S": S}],
            "accessList": [{"address": ACCESS_ADDRESS, "storageKeys": [STORAGE_KEY]}]
        });
        let tx = decode_transaction("TxTypeEthereumAccessList", &fields).unwrap();
        let Transaction::EthereumAccessList(body) = tx else {
            panic!("expected EthereumAccessList, got {tx:?}");
        };

        assert_eq!(
            body.common.signatures[0],
            SignatureData::from_hex("0x00", R, S).unwrap()
        );
        assert_eq!(body.access_list.len(), 1);
        assert_eq!(
            body.access_list[0].address,
            hex::parse_address(ACCESS_ADDRESS).unwrap()
        );
        assert_eq!(
            body.access_list[0].storage_keys,
            vec![hex::parse_hash(STORAGE_KEY).unwrap()]
        );
    }

    /// Scenario 4: an unknown tag never falls back to a default variant.
    #[test]
    fn test_unknown_transaction_type() {
        assert_eq!(
            decode_transaction("TxTypeUnknown", &json!({"from": FROM})),
            Err(DecodeError::UnknownTransactionType("TxTypeUnknown".into()))
        );
    }

    /// Scenario 5: unit price projects as a big integer only.
    #[test]
    fn test_unit_price_projection() {
        assert_eq!(
            project::<U256>("governance.unitprice", &json!("25000000000")),
            Ok(U256::from(25_000_000_000u64))
        );
        assert!(matches!(
            project::<U256>("governance.unitprice", &json!(true)),
            Err(DecodeError::TypeMismatch {
                expected: VoteValueType::BigInteger,
                ..
            })
        ));
    }
}
