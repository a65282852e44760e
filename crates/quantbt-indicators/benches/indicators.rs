//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quantbt_core::traits::Indicator;
use quantbt_indicators::{rsi_column, Rsi};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("calculate", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("column", size), &data, |b, data| {
            b.iter(|| rsi_column(black_box(data), black_box(14)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rsi);
criterion_main!(benches);
