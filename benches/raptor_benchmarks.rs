//! Raptor RPC Benchmarks
//!
//! This module contains benchmarks for the JSON-RPC engine. The benchmarks
//! are implemented using the Criterion framework, which provides statistical
//! analysis and performance regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput,
};
use serde_json::json;
use std::time::Duration;

use raptor_rpc::protocol::jsonrpc::{validate_request, Remote, RequestProcessor};
use raptor_rpc::create_processor;

fn batch_payload(size: usize) -> Vec<u8> {
    let batch: Vec<_> = (0..size)
        .map(|i| json!({"jsonrpc": "2.0", "method": "echo", "params": {"n": i}, "id": i}))
        .collect();
    serde_json::to_vec(&batch).unwrap()
}

/// Benchmark validation of decoded payloads
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    group.measurement_time(Duration::from_secs(2));

    let single = json!({"jsonrpc": "2.0", "method": "ping", "params": [1, 2, 3], "id": 1});
    group.bench_function("single", |b| {
        b.iter(|| black_box(validate_request(single.clone())))
    });

    let batch: serde_json::Value = serde_json::from_slice(&batch_payload(100)).unwrap();
    group.throughput(Throughput::Elements(100));
    group.bench_function("batch_100", |b| {
        b.iter(|| black_box(validate_request(batch.clone())))
    });

    group.finish();
}

/// Benchmark the full bytes-in, bytes-out path
fn bench_processor(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let processor: RequestProcessor = create_processor();

    let mut group = c.benchmark_group("processor");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(3));
    group.warm_up_time(Duration::from_secs(1));

    let ping = br#"{"jsonrpc":"2.0","method":"ping","id":1}"#;
    group.bench_function("ping", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(processor.handle_bytes(ping, Remote::unknown()).await.unwrap())
        })
    });

    for size in [1usize, 10, 100] {
        let payload = batch_payload(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("echo_batch", size), &payload, |b, payload| {
            b.to_async(&runtime).iter(|| async {
                black_box(processor.handle_bytes(payload, Remote::unknown()).await.unwrap())
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_validation, bench_processor
}
criterion_main!(benches);
