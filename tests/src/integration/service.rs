//! # Service Flows
//!
//! The service as a caller uses it: batches of records, an RLP key
//! collaborator, configuration from the environment, and logging.

#[cfg(test)]
mod tests {
    use crate::fixtures::{rpc_record, seeded_public_key};
    use klay_decode::{
        AccountKey, DecodeApi, DecodeError, DecodeResult, DecodeService, DecoderConfig,
        RlpKeyDecoder, Transaction, TxType,
    };
    use klay_telemetry::{init_logging, TelemetryConfig};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers one known encoding with a fixed public key; counts calls.
    struct FixedRlpDecoder {
        calls: AtomicUsize,
    }

    const ENCODED_PUBLIC_KEY: &str = "0x02a102dbac81e8486d68eac4e6ef9db617f7fbd79a04a3b323c982a09cdfc61f0ae0e8";

    impl RlpKeyDecoder for FixedRlpDecoder {
        fn decode_rlp_key(&self, encoded: &str) -> DecodeResult<AccountKey> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if encoded == ENCODED_PUBLIC_KEY {
                Ok(AccountKey::Public(seeded_public_key(11)))
            } else {
                Err(DecodeError::UnsupportedKeyEncoding(encoded.to_string()))
            }
        }
    }

    #[test]
    fn test_batch_keeps_good_records() {
        let service = DecodeService::default();
        let mut bad_ratio = rpc_record(TxType::FeeDelegatedValueTransferWithRatio, 1);
        bad_ratio["feeRatio"] = json!("0x0");
        let records = vec![
            rpc_record(TxType::ValueTransfer, 0),
            bad_ratio,
            json!("not a record"),
            rpc_record(TxType::EthereumDynamicFee, 3),
        ];

        let results = service.decode_transactions(&records);
        assert_eq!(results.len(), records.len());
        assert_eq!(
            results[0].as_ref().map(|r| r.transaction.tx_type()),
            Ok(TxType::ValueTransfer)
        );
        assert_eq!(results[1], Err(DecodeError::InvalidFeeRatio(0)));
        assert!(results[2].is_err());
        assert_eq!(
            results[3].as_ref().map(|r| r.transaction.common().nonce),
            Ok(3)
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(DecodeService::default().decode_transactions(&[]).is_empty());
    }

    #[test]
    fn test_rlp_key_goes_to_collaborator() {
        let rlp = Arc::new(FixedRlpDecoder {
            calls: AtomicUsize::new(0),
        });
        let service =
            DecodeService::with_rlp_decoder(DecoderConfig::default(), Arc::clone(&rlp)).unwrap();

        let mut record = rpc_record(TxType::AccountUpdate, 0);
        record["key"] = json!(ENCODED_PUBLIC_KEY);
        let Transaction::AccountUpdate(body) =
            service.decode_rpc_transaction(&record).unwrap().transaction
        else {
            panic!("expected AccountUpdate");
        };
        assert_eq!(body.key, AccountKey::Public(seeded_public_key(11)));

        // Constant encodings never reach the collaborator.
        record["key"] = json!("0x80");
        service.decode_rpc_transaction(&record).unwrap();
        assert_eq!(rlp.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rlp_key_without_collaborator() {
        let mut record = rpc_record(TxType::AccountUpdate, 0);
        record["key"] = json!(ENCODED_PUBLIC_KEY);
        assert_eq!(
            DecodeService::default().decode_rpc_transaction(&record),
            Err(DecodeError::UnsupportedKeyEncoding(
                ENCODED_PUBLIC_KEY.to_string()
            ))
        );
    }

    #[test]
    fn test_decoding_with_logging_installed() {
        let config = TelemetryConfig {
            log_level: "klay_decode=debug".to_string(),
            console_output: false,
            ..Default::default()
        };
        let _ = init_logging(&config);

        let service = DecodeService::default();
        assert!(service
            .decode_rpc_transaction(&rpc_record(TxType::Cancel, 0))
            .is_ok());
        assert!(service.decode_transaction("TxTypeNope", &json!({})).is_err());
    }

    #[test]
    fn test_service_shared_across_threads() {
        let service = Arc::new(DecodeService::default());
        let handles: Vec<_> = TxType::ALL
            .iter()
            .map(|&tx_type| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    service
                        .decode_rpc_transaction(&rpc_record(tx_type, 5))
                        .map(|r| r.transaction.tx_type())
                })
            })
            .collect();
        for (handle, &tx_type) in handles.into_iter().zip(TxType::ALL) {
            assert_eq!(handle.join().unwrap(), Ok(tx_type));
        }
    }
}
