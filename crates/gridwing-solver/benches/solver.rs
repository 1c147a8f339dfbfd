//! Benchmarks for solving and uniqueness classification.
//!
//! Run with `cargo bench --bench solver`.

use std::hint;

use criterion::{Criterion, criterion_group, criterion_main};
use gridwing_core::{GameType, codec};
use gridwing_solver::BacktrackSolver;

const PUZZLE_6X6: &str = "500600000020053001100350040000001005";
const PUZZLE_9X9: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

fn bench_solve(c: &mut Criterion) {
    let solver = BacktrackSolver::new();
    let six = codec::parse_board_with_separator(PUZZLE_6X6, GameType::CLASSIC_6X6, '0')
        .unwrap()
        .values();
    let nine = codec::parse_board_with_separator(PUZZLE_9X9, GameType::CLASSIC_9X9, '0')
        .unwrap()
        .values();

    c.bench_function("solve_6x6", |b| {
        b.iter(|| solver.solve(hint::black_box(&six), GameType::CLASSIC_6X6));
    });
    c.bench_function("solve_9x9", |b| {
        b.iter(|| solver.solve(hint::black_box(&nine), GameType::CLASSIC_9X9));
    });
    c.bench_function("count_solutions_9x9", |b| {
        b.iter(|| solver.count_solutions(hint::black_box(&nine), GameType::CLASSIC_9X9));
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
