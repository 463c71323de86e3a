//! Benchmark for Tukey-fence outlier detection across column counts and sizes
//!
//! Run with: cargo bench --bench outlier_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use gaiaclean::pipeline::{outlier_indices, remove_outliers, DEFAULT_FENCE_MULTIPLIER};

/// Measurement-like values: mostly narrow spread with a few wild readings
fn generate_values(n: usize, rng: &mut StdRng) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let base = rng.gen::<f64>() * 40.0 - 20.0;
            if rng.gen::<f64>() < 0.01 {
                base * 50.0
            } else {
                base
            }
        })
        .collect()
}

fn generate_test_dataframe(n_rows: usize, n_columns: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns: Vec<Column> = (0..n_columns)
        .map(|i| Column::new(format!("m_{}", i).into(), generate_values(n_rows, &mut rng)))
        .collect();

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Single column fence computation for growing sample sizes
fn benchmark_outlier_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("outlier_indices");

    for n in [1_000, 10_000, 100_000] {
        let mut rng = StdRng::seed_from_u64(7);
        let values = generate_values(n, &mut rng);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| outlier_indices(black_box(values), black_box(DEFAULT_FENCE_MULTIPLIER)));
        });
    }

    group.finish();
}

/// Whole-table removal, where columns are screened in parallel
fn benchmark_remove_outliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_outliers");
    group.sample_size(20);

    for (n_rows, n_columns) in [(5_000, 4), (20_000, 12), (50_000, 24)] {
        let df = generate_test_dataframe(n_rows, n_columns, 42);
        let names: Vec<String> = (0..n_columns).map(|i| format!("m_{}", i)).collect();
        group.throughput(Throughput::Elements(n_columns as u64));

        group.bench_with_input(
            BenchmarkId::new("columns", format!("{}x{}", n_rows, n_columns)),
            &df,
            |b, df| {
                b.iter(|| {
                    let _ = remove_outliers(
                        black_box(df),
                        black_box(&names),
                        black_box(DEFAULT_FENCE_MULTIPLIER),
                    );
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_outlier_indices, benchmark_remove_outliers);
criterion_main!(benches);
