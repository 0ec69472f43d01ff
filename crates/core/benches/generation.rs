//! Criterion benchmarks for maze generation and navigation.
//!
//! Run with:
//!   cargo bench -p rubbermaze
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rubbermaze::prelude::*;

fn generated(rows: usize, cols: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(rows, cols);
    Generator::new(GeneratorConfig::default(), Prng::new(seed))
        .generate(&mut grid, NullSink)
        .unwrap()
        .finish();
    grid
}

/// Benchmark full generation with varying grid sizes.
fn bench_generate_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_size");

    for side in [16usize, 32, 64, 128].iter() {
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("unwind", side), side, |b, &side| {
            let mut gen = Generator::new(GeneratorConfig::default(), Prng::new(42));
            let mut grid = Grid::new(side, side);
            b.iter(|| {
                grid.reset();
                black_box(gen.generate(&mut grid, NullSink).unwrap().finish())
            });
        });

        group.bench_with_input(BenchmarkId::new("no_unwind", side), side, |b, &side| {
            let cfg = GeneratorConfig {
                unwind_backtrack: false,
                ..GeneratorConfig::default()
            };
            let mut gen = Generator::new(cfg, Prng::new(42));
            let mut grid = Grid::new(side, side);
            b.iter(|| {
                grid.reset();
                black_box(gen.generate(&mut grid, NullSink).unwrap().finish())
            });
        });
    }

    group.finish();
}

/// Benchmark move_agent() under different recovery windows.
fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_window");

    for (name, window) in [("w1", Some(-1)), ("w16", Some(-16)), ("unbounded", None)] {
        let window = RecoveryWindow::from_option(window).unwrap();
        group.bench_function(name, |b| {
            let mut grid = generated(64, 64, 7);
            let mut nav = Navigator::new(window, 7);
            let mut dirs = Prng::new(99);
            b.iter(|| {
                let dir = Direction::ALL[dirs.choose_index(4)];
                let out = nav.move_agent(&mut grid, dir, NullSink).unwrap();
                if out == MoveOutcome::Finished {
                    nav.reset_soft(&mut grid);
                }
                black_box(out)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_sizes, bench_moves);
criterion_main!(benches);
