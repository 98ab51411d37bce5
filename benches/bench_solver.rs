use criterion::{criterion_group, criterion_main, Criterion};

use lbl_cube::facelet::CubeState;
use lbl_cube::moves::MoveTables;
use lbl_cube::scramble::scramble_from_str;
use lbl_cube::solver::{solve, Solver};

const SCRAMBLE: &str = "B' F' R B L' D' U' L R B R' F U R F' R F' D' F U L' D'";

fn bench_moves(c: &mut Criterion) {
    let seq = scramble_from_str("R U R' U'").unwrap();
    let mut group = c.benchmark_group("CubeState Moves");
    for dimension in [3, 7] {
        let tables = MoveTables::new(dimension).unwrap();
        group.bench_function(format!("tables {dimension}x{dimension}"), |b| {
            b.iter(|| {
                let mut cc = CubeState::solved(dimension).unwrap();
                tables.apply_sequence(&mut cc, &seq).unwrap();
            })
        });
        group.bench_function(format!("direct {dimension}x{dimension}"), |b| {
            b.iter(|| {
                let mut cc = CubeState::solved(dimension).unwrap();
                cc.apply_moves(&seq).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let mut cc = CubeState::solved(3).unwrap();
    cc.apply_moves(&scramble_from_str(SCRAMBLE).unwrap()).unwrap();
    c.bench_function("Solver", |b| b.iter(|| solve(&cc).unwrap()));
    c.bench_function("Solver build", |b| b.iter(|| Solver::new().unwrap()));
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
