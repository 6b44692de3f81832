use criterion::{criterion_group, criterion_main, Criterion};
use dlx_solver::dlx::column_selection::{ColumnSelection, FirstActive, MinCount};
use dlx_solver::dlx::solver::Solver;
use dlx_solver::sudoku::solver::{Grid, Sudoku, EXAMPLE_EASY, EXAMPLE_HARD};
use std::hint::black_box;
use std::time::Duration;

fn solve_with<C: ColumnSelection>(sudoku: &Sudoku) -> Option<Vec<usize>> {
    let mut solver: Solver<C> = Solver::new(Sudoku::to_matrix());
    if !sudoku.apply_clues(&mut solver) {
        return None;
    }
    solver.solve()
}

fn bench_matrix_construction(c: &mut Criterion) {
    c.bench_function("build_sudoku_matrix", |b| {
        b.iter(|| black_box(Sudoku::to_matrix()));
    });
}

fn bench_column_selection(c: &mut Criterion) {
    let sudoku = Sudoku::new(Grid::from(EXAMPLE_EASY));

    let mut group = c.benchmark_group("column_selection");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("min_count", |b| {
        b.iter(|| black_box(solve_with::<MinCount>(&sudoku)));
    });

    group.bench_function("first_active", |b| {
        b.iter(|| black_box(solve_with::<FirstActive>(&sudoku)));
    });

    group.finish();
}

fn bench_puzzles(c: &mut Criterion) {
    let easy = Sudoku::new(Grid::from(EXAMPLE_EASY));
    let hard = Sudoku::new(Grid::from(EXAMPLE_HARD));

    let mut group = c.benchmark_group("puzzles");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("easy", |b| {
        b.iter(|| black_box(solve_with::<MinCount>(&easy)));
    });

    group.bench_function("hard", |b| {
        b.iter(|| black_box(solve_with::<MinCount>(&hard)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_matrix_construction,
    bench_column_selection,
    bench_puzzles
);
criterion_main!(benches);
