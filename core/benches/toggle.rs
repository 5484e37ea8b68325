use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lights_out_core::*;

const SIZES: [Coord2; 3] = [(5, 5), (20, 20), (100, 100)];

fn board(size: Coord2) -> Grid {
    RandomGridGenerator::new(0x5eed, StartPolicy::Random).generate(BoardConfig::new(size, 0.4))
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_around");
    for size in SIZES {
        let grid = board(size);
        let center = (size.0 / 2, size.1 / 2);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{size:?}")), &grid, |b, grid| {
            b.iter(|| grid.toggled_around(black_box(center)))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for size in SIZES {
        let grid = board(size);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{size:?}")), &grid, |b, grid| {
            b.iter(|| analyze(black_box(grid)))
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let config = BoardConfig::default();
    c.bench_function("generate_solvable_5x5", |b| {
        b.iter(|| RandomGridGenerator::new(black_box(7), StartPolicy::Solvable).generate(config))
    });
}

criterion_group!(benches, bench_toggle, bench_analyze, bench_generate);
criterion_main!(benches);
