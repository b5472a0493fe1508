//! # Klay Decode Benchmarks
//!
//! | Group | What is measured |
//! |-------|------------------|
//! | account-key | Multisig and role-based key decoding, including curve checks |
//! | transaction | Single RPC records per type, and batch throughput |
//! | governance | Item map reads through the typed accessors |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use klay_decode::{
    decode_account_key, decode_rpc_transaction, DecodeApi, DecodeService, GovernanceItems, TxType,
};
use klay_tests::fixtures::{multisig_payload, random_public_key, rpc_record};
use serde_json::json;
use std::time::Duration;

// ============================================================================
// Account keys
// Each weighted key costs one on-curve check.
// ============================================================================

fn bench_account_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("account-key");
    group.measurement_time(Duration::from_secs(5));

    for size in [1usize, 5, 10] {
        let keys: Vec<_> = (0..size).map(|_| (1, random_public_key())).collect();
        let payload = multisig_payload(size as u64, &keys);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("weighted_multisig", size), &payload, |b, p| {
            b.iter(|| black_box(decode_account_key(0x04, p).is_ok()))
        });
    }

    let role_based = json!([
        {"keyType": 2, "key": random_public_key().to_json()},
        {"keyType": 4, "key": multisig_payload(2, &[(1, random_public_key()), (1, random_public_key())])},
        {"keyType": 3, "key": {}}
    ]);
    group.bench_function("role_based", |b| {
        b.iter(|| black_box(decode_account_key(0x05, &role_based).is_ok()))
    });

    group.finish();
}

// ============================================================================
// Transactions
// ============================================================================

fn bench_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("transaction");

    for tx_type in [
        TxType::ValueTransfer,
        TxType::FeeDelegatedSmartContractExecutionWithRatio,
        TxType::AccountUpdate,
        TxType::EthereumDynamicFee,
    ] {
        let record = rpc_record(tx_type, 1);
        group.bench_with_input(BenchmarkId::new("decode", tx_type.tag()), &record, |b, r| {
            b.iter(|| black_box(decode_rpc_transaction(r).is_ok()))
        });
    }

    let service = DecodeService::default();
    for size in [10usize, 100, 1000] {
        let records: Vec<_> = (0..size)
            .map(|i| rpc_record(TxType::ALL[i % TxType::ALL.len()], i as u64))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &records, |b, r| {
            b.iter(|| black_box(service.decode_transactions(r).len()))
        });
    }

    let record = rpc_record(TxType::FeeDelegatedValueTransferMemoWithRatio, 7);
    let rpc = decode_rpc_transaction(&record).unwrap();
    group.bench_function("to_json", |b| b.iter(|| black_box(rpc.to_json())));

    group.finish();
}

// ============================================================================
// Governance
// ============================================================================

fn bench_governance(c: &mut Criterion) {
    let mut group = c.benchmark_group("governance");

    let response = json!({
        "governance.unitprice": 25000000000u64,
        "istanbul.epoch": 604800,
        "reward.useginicoeff": true,
        "reward.ratio": "50/40/10",
        "kip71.basefeedenominator": 20
    });
    group.bench_function("items_read", |b| {
        b.iter(|| {
            let items = GovernanceItems::from_json(&response).unwrap();
            black_box((
                items.unit_price().is_ok(),
                items.epoch().is_ok(),
                items.use_gini_coeff().is_ok(),
                items.ratio().is_ok(),
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_account_keys,
    bench_transactions,
    bench_governance
);
criterion_main!(benches);
