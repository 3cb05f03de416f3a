//! Merge Operation Benchmarks
//!
//! Benchmarks for range-tree merging and process-level grouping.
//!
//! Run with: `cargo bench --bench merge_ops`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fusionar::{merge_functions, merge_processes, FunctionCov, ProcessCov, RangeCov, ScriptCov};

/// Build a function whose inner ranges tile `[0, span)` with a stride
/// derived from `seed`, so different seeds disagree on boundaries and force
/// splits during the merge.
fn synthetic_function(span: u32, ranges: u32, seed: u32) -> FunctionCov {
    let stride = span / ranges;
    let offset = (seed * 7) % stride.max(1);
    let mut out = vec![RangeCov {
        start_offset: 0,
        end_offset: span,
        count: 1,
    }];
    for index in 0..ranges {
        let start = index * stride + offset;
        let end = (start + stride / 2).min(span);
        if start < end && end <= span {
            out.push(RangeCov {
                start_offset: start,
                end_offset: end,
                count: (index * 11 + seed) % 17,
            });
        }
    }
    FunctionCov {
        function_name: format!("synthetic_{seed}"),
        ranges: out,
        is_block_coverage: true,
    }
}

fn synthetic_process(scripts: u32, seed: u32) -> ProcessCov {
    let result = (0..scripts)
        .map(|script_index| ScriptCov {
            script_id: script_index.to_string(),
            url: format!("file:///module_{script_index}.js"),
            functions: vec![
                synthetic_function(10_000, 64, seed),
                synthetic_function(10_000, 32, seed + 1),
            ],
        })
        .collect();
    ProcessCov { result }
}

fn bench_merge_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_functions");

    let range_counts = vec![16, 64, 256, 1024];

    for count in range_counts {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}_ranges")),
            &count,
            |bench, &n| {
                bench.iter(|| {
                    let a = synthetic_function(100_000, n, 1);
                    let b = synthetic_function(100_000, n, 2);
                    let merged = merge_functions(black_box(vec![a, b]));
                    black_box(merged);
                });
            },
        );
    }

    group.finish();
}

fn bench_merge_many_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_many_inputs");

    let input_counts = vec![2, 4, 8, 16];

    for count in input_counts {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}_inputs")),
            &count,
            |bench, &n| {
                bench.iter(|| {
                    let inputs: Vec<FunctionCov> =
                        (0..n).map(|seed| synthetic_function(50_000, 128, seed)).collect();
                    black_box(merge_functions(black_box(inputs)));
                });
            },
        );
    }

    group.finish();
}

fn bench_merge_processes(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_processes");

    let script_counts = vec![1, 8, 32];

    for count in script_counts {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}_scripts")),
            &count,
            |bench, &n| {
                bench.iter(|| {
                    let runs = vec![synthetic_process(n, 1), synthetic_process(n, 2)];
                    black_box(merge_processes(black_box(runs)));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_merge_functions,
    bench_merge_many_inputs,
    bench_merge_processes
);
criterion_main!(benches);
