use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hexbreach_core::{BoardConfig, BoardGenerator, Coord2, RandomBoardGenerator, WAYPOINT_DEPTH};

const TIERS: [(&str, Coord2); 3] = [("small", (7, 7)), ("medium", (12, 12)), ("large", (24, 24))];

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &size, |b, &size| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let config = BoardConfig::new(size, Some(seed));
                black_box(RandomBoardGenerator::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let board = RandomBoardGenerator::new(42)
        .generate(BoardConfig::new((24, 24), None))
        .expect("24x24 boards always generate");
    let grid = board.grid();

    c.bench_function("shortest_path/start_to_core", |b| {
        b.iter(|| black_box(grid.shortest_path(board.start(), board.core())))
    });
    c.bench_function("frontier_at_depth/5", |b| {
        b.iter(|| black_box(grid.frontier_at_depth(board.start(), WAYPOINT_DEPTH)))
    });
}

criterion_group!(benches, bench_generation, bench_traversal);
criterion_main!(benches);
