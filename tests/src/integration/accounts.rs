//! # Account Decoding Flows
//!
//! `klay_getAccount` results carrying every kind of account key.

#[cfg(test)]
mod tests {
    use crate::fixtures::{eoa_response, multisig_payload, random_public_key, sca_response};
    use klay_decode::{
        decode_account_response, AccType, Account, AccountKey, AccountKeyType, DecodeApi,
        DecodeError, DecodeService, DecoderConfig, RoleGroup,
    };
    use serde_json::json;

    #[test]
    fn test_eoa_with_weighted_multisig_key() {
        let keys: Vec<_> = (1..=3).map(|w| (w, random_public_key())).collect();
        let key = json!({"keyType": 4, "key": multisig_payload(4, &keys)});
        let account = decode_account_response(&eoa_response(key)).unwrap();

        assert_eq!(account.acc_type(), AccType::Eoa);
        let AccountKey::WeightedMultiSig(multisig) = account.key() else {
            panic!("expected weighted multisig, got {:?}", account.key());
        };
        assert_eq!(multisig.threshold(), 4);
        assert_eq!(multisig.total_weight(), 6);
        let decoded: Vec<_> = multisig.keys().iter().map(|k| k.key.clone()).collect();
        let expected: Vec<_> = keys.into_iter().map(|(_, k)| k).collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_eoa_with_role_based_key() {
        let update_key = random_public_key();
        let key = json!({
            "keyType": 5,
            "key": [
                {"keyType": 1, "key": {}},
                {"keyType": 2, "key": update_key.to_json()},
                {"keyType": 3, "key": {}}
            ]
        });
        let account = decode_account_response(&eoa_response(key)).unwrap();
        let AccountKey::RoleBased(roles) = account.key() else {
            panic!("expected role-based key");
        };
        assert_eq!(roles.role(RoleGroup::Transaction), Some(&AccountKey::Legacy));
        assert_eq!(
            roles.role(RoleGroup::AccountUpdate),
            Some(&AccountKey::Public(update_key))
        );
        assert_eq!(roles.role(RoleGroup::FeePayer), Some(&AccountKey::Fail));
    }

    #[test]
    fn test_zero_threshold_multisig_rejected() {
        let keys = vec![(1, random_public_key())];
        let key = json!({"keyType": 4, "key": multisig_payload(0, &keys)});
        assert_eq!(
            decode_account_response(&eoa_response(key)),
            Err(DecodeError::UnsatisfiableThreshold {
                threshold: 0,
                total: 1
            })
        );
    }

    #[test]
    fn test_role_based_with_fewer_roles() {
        let key = json!({"keyType": 5, "key": [{"keyType": 1, "key": {}}]});
        let account = decode_account_response(&eoa_response(key)).unwrap();
        let AccountKey::RoleBased(roles) = account.key() else {
            panic!("expected role-based key");
        };
        assert_eq!(roles.role(RoleGroup::Transaction), Some(&AccountKey::Legacy));
        assert_eq!(roles.role(RoleGroup::FeePayer), None);
    }

    #[test]
    fn test_nested_role_based_rejected_in_account() {
        let key = json!({
            "keyType": 5,
            "key": [
                {"keyType": 1, "key": {}},
                {"keyType": 5, "key": [{"keyType": 1, "key": {}}]}
            ]
        });
        assert_eq!(
            decode_account_response(&eoa_response(key)),
            Err(DecodeError::NestedRoleBasedKey { role: 1 })
        );
    }

    #[test]
    fn test_off_curve_key_rejected() {
        let key = json!({
            "keyType": 2,
            "key": {"x": "0x1", "y": "0x1"}
        });
        assert_eq!(
            decode_account_response(&eoa_response(key)),
            Err(DecodeError::PublicKeyNotOnCurve)
        );
    }

    #[test]
    fn test_smart_contract_round_trip() {
        let account = decode_account_response(&sca_response(2)).unwrap();
        assert_eq!(account.key().key_type(), AccountKeyType::Fail);
        assert!(matches!(account, Account::SmartContract(_)));
        assert_eq!(decode_account_response(&account.to_json()), Ok(account));
    }

    /// Lenient by default: unknown account types read as smart contracts.
    #[test]
    fn test_unknown_account_type_lenient_and_strict() {
        let lenient = decode_account_response(&sca_response(9)).unwrap();
        assert_eq!(lenient.acc_type(), AccType::SmartContract);

        let strict = DecodeService::new(DecoderConfig {
            strict_account_type: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            strict.decode_account_response(&sca_response(9)),
            Err(DecodeError::UnknownAccountType(9))
        );
    }

    #[test]
    fn test_lower_key_limit_from_config() {
        let service = DecodeService::new(DecoderConfig {
            max_weighted_keys: 2,
            ..Default::default()
        })
        .unwrap();
        let keys: Vec<_> = (0..3).map(|_| (1, random_public_key())).collect();
        let key = json!({"keyType": 4, "key": multisig_payload(1, &keys)});
        assert_eq!(
            service.decode_account_response(&eoa_response(key)),
            Err(DecodeError::TooLongLength { len: 3, max: 2 })
        );
    }
}
