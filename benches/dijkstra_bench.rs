use criterion::{criterion_group, criterion_main, Criterion};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use terrain_pathfinding::{find_path, TerrainGrid};

fn random_terrain(n: usize, rng: &mut StdRng) -> TerrainGrid {
    let mut grid = TerrainGrid::new(n, n, b'.');
    grid.set_weight(b'~', 6.0);
    grid.set_weight(b'^', 3.0);
    for x in 0..n {
        for y in 0..n {
            if rng.gen_bool(0.2) {
                grid.set_blocked(x, y, true);
            } else if rng.gen_bool(0.3) {
                grid.set_symbol(x, y, b'~');
            } else if rng.gen_bool(0.1) {
                grid.set_symbol(x, y, b'^');
            }
        }
    }
    grid.set_blocked(0, 0, false);
    grid.set_blocked(n - 1, n - 1, false);
    grid.set_start(Point::new(0, 0));
    grid.set_end(Point::new(n as i32 - 1, n as i32 - 1));
    grid.generate_components();
    grid
}

fn dijkstra_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [16, 32, 64] {
        let grid = random_terrain(n, &mut rng);
        c.bench_function(format!("{n}x{n} random terrain").as_str(), |b| {
            b.iter(|| black_box(find_path(&grid)))
        });
    }
}

criterion_group!(benches, dijkstra_bench);
criterion_main!(benches);
