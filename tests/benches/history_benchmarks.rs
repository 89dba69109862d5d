//! # History Query Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | hq-01 Shard Catalog | Parse a 1000-index listing | < 1ms |
//! | hq-02 Trace Reconstruction | Flatten + normalise a wide trace | < 1ms |
//! | hq-03 Action Paging | Plan a window over 100 shards | < 10µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hq_01_shard_catalog::parse_index_listing;
use hq_02_trace_reconstruction::{flatten, normalize_subtree};
use hq_03_action_paging::{plan_fetches, PageRequest};
use serde_json::json;
use shared_types::ActionTraceNode;

// ============================================================================
// HQ-01: Shard Catalog
// ============================================================================

fn bench_index_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hq-01-shard-catalog");
    let prefixes = ["accounts", "transactions", "transaction_traces", "action_traces"];

    for shards in [10usize, 100, 250] {
        let listing: String = (0..shards)
            .flat_map(|i| prefixes.iter().map(move |p| format!("green open {}-{} 5 1\n", p, i)))
            .collect();
        group.throughput(Throughput::Elements((shards * prefixes.len()) as u64));
        group.bench_with_input(BenchmarkId::new("parse_listing", shards), &listing, |b, l| {
            b.iter(|| black_box(parse_index_listing(l)))
        });
    }
    group.finish();
}

// ============================================================================
// HQ-02: Trace Reconstruction
// ============================================================================

fn wide_trace(width: usize, depth: usize) -> ActionTraceNode {
    let mut seq = 0u64;
    fn build(seq: &mut u64, width: usize, depth: usize) -> ActionTraceNode {
        *seq += 1;
        let node = json!({
            "receipt": { "global_sequence": *seq },
            "act": {
                "account": "eosio",
                "name": "setabi",
                "data": { "abi": {} },
                "hex_data": "00000000000000000000deadbeef"
            }
        });
        let mut node: ActionTraceNode = serde_json::from_value(node).unwrap();
        if depth > 0 {
            node.inline_traces = (0..width).map(|_| build(seq, width, depth - 1)).collect();
        }
        node
    }
    build(&mut seq, width, depth)
}

fn bench_trace_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("hq-02-trace-reconstruction");

    for width in [2usize, 4, 8] {
        let root = wide_trace(width, 3);
        group.bench_with_input(BenchmarkId::new("normalize_subtree", width), &root, |b, r| {
            b.iter(|| {
                let mut node = r.clone();
                black_box(normalize_subtree(&mut node))
            })
        });
        let roots = vec![root];
        group.bench_with_input(BenchmarkId::new("flatten", width), &roots, |b, r| {
            b.iter(|| black_box(flatten(r)))
        });
    }
    group.finish();
}

// ============================================================================
// HQ-03: Action Paging
// ============================================================================

fn bench_fetch_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("hq-03-action-paging");
    let counts: Vec<(String, u64)> = (0..100)
        .map(|i| (format!("action_traces-{}", i), 1_000 + i as u64))
        .collect();

    for (name, pos, offset) in [("newest", -1i64, -100i64), ("middle", 50_000, 99), ("oldest", 0, 99)] {
        let Some(window) = PageRequest::new(pos, offset).normalize() else {
            continue;
        };
        group.bench_function(BenchmarkId::new("plan_fetches", name), |b| {
            b.iter(|| black_box(plan_fetches(&window, &counts)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_index_listing,
    bench_trace_reconstruction,
    bench_fetch_planning
);
criterion_main!(benches);
