use criterion::{criterion_group, criterion_main, Criterion};
use grid_stepsearch::{CellState, Grid, Heuristic, Manhattan, SearchEngine, UniformCost};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const GRID_SIZES: [usize; 3] = [32, 64, 128];

/// Random grid with 25% obstacles and open corners, adjacency already built.
fn random_grid(n: usize, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::build(n);
    for row in 0..n {
        for col in 0..n {
            if rng.gen_bool(0.25) {
                grid.mark(row, col, CellState::Obstacle);
            }
        }
    }
    grid.mark(0, 0, CellState::Start);
    grid.mark(n - 1, n - 1, CellState::End);
    grid.rebuild_adjacency();
    grid
}

fn bench_engine<H: Heuristic>(c: &mut Criterion, name: &str, engine: SearchEngine<H>) {
    for n in GRID_SIZES {
        let mut grid = random_grid(n, 0);
        let start = Point::new(0, 0);
        let end = Point::new(n as i32 - 1, n as i32 - 1);
        c.bench_function(format!("{name}, {n}x{n}").as_str(), |b| {
            b.iter(|| {
                let mut changes = 0usize;
                let result = engine.run(&mut grid, start, end, |_, _| changes += 1);
                black_box((result, changes))
            })
        });
    }
}

fn bench_uniform(c: &mut Criterion) {
    bench_engine(c, "Uniform cost", SearchEngine::with_heuristic(UniformCost));
}

fn bench_manhattan(c: &mut Criterion) {
    bench_engine(c, "Manhattan", SearchEngine::with_heuristic(Manhattan::new()));
}

fn bench_rebuild(c: &mut Criterion) {
    let mut grid = random_grid(128, 1);
    c.bench_function("rebuild_adjacency, 128x128", |b| {
        b.iter(|| black_box(&mut grid).rebuild_adjacency())
    });
}

criterion_group!(benches, bench_uniform, bench_manhattan, bench_rebuild);
criterion_main!(benches);
