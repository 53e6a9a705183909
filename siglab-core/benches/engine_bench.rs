//! Criterion benchmarks for the simulation hot paths.
//!
//! Benchmarks:
//! 1. Full backtest loop over synthetic hourly series of varying length
//! 2. Exit resolution in isolation (the per-trade inner scan)
//! 3. Summary aggregation over a populated ledger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use siglab_core::config::StrategyConfig;
use siglab_core::data::generate_synthetic_bars;
use siglab_core::engine::exit;
use siglab_core::{simulate, Summary};

fn loose_config() -> StrategyConfig {
    // Admit enough entries for the loop body to dominate.
    StrategyConfig {
        min_prob: 0.5,
        min_volatility: 0.001,
        ..Default::default()
    }
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let config = loose_config();

    for &bar_count in &[1_000, 10_000, 50_000] {
        let bars = generate_synthetic_bars("bench", bar_count);
        group.bench_with_input(BenchmarkId::new("hourly", bar_count), &bar_count, |b, _| {
            b.iter(|| simulate(black_box(&bars), black_box(&config)));
        });
    }

    group.finish();
}

fn bench_exit_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("exit_resolution");
    let bars = generate_synthetic_bars("bench", 10_000);

    for &hold in &[6, 24, 72] {
        let config = StrategyConfig {
            hold,
            ..loose_config()
        };
        group.bench_with_input(BenchmarkId::new("hold", hold), &hold, |b, _| {
            b.iter(|| {
                // Resolve from a spread of entry points, well clear of the
                // series end.
                for entry_index in (0..bars.len() - hold - 1).step_by(97) {
                    black_box(exit::resolve(&bars, entry_index, &config));
                }
            });
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");
    let bars = generate_synthetic_bars("bench", 50_000);
    let config = loose_config();
    let result = simulate(&bars, &config).expect("benchmark simulation");

    group.bench_function("from_ledger", |b| {
        b.iter(|| Summary::from_ledger(black_box(&result.ledger), config.starting_balance));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_simulate,
    bench_exit_resolution,
    bench_summary
);
criterion_main!(benches);
