use criterion::{criterion_group, criterion_main, Criterion};

use sudoku_forge::{Puzzle, SudokuGrid};
use sudoku_forge::generator::Generator;
use sudoku_forge::solver::{BacktrackingSolver, Solver};

// Explanation of benchmark classes:
//
// solve: Solving and scoring a classic 9x9 puzzle, i.e. one full search
//        including the uniqueness check.
// seed: Producing one complete random grid (band fill + completion search).
// generate: One short local-search walk, which is dominated by the re-solve
//           performed after every mutation step.

const CLASSIC: &str = "9;\
    5,3, , ,7, , , , ,\
    6, , ,1,9,5, , , ,\
     ,9,8, , , , ,6, ,\
    8, , , ,6, , , ,3,\
    4, , ,8, ,3, , ,1,\
    7, , , ,2, , , ,6,\
     ,6, , , , ,2,8, ,\
     , , ,4,1,9, , ,5,\
     , , , ,8, , ,7,9";

fn benchmark_solve(c: &mut Criterion) {
    let grid = SudokuGrid::parse(CLASSIC).unwrap();

    c.bench_function("solve classic 9x9", |b| b.iter(|| {
        let mut solver = BacktrackingSolver::new_default();
        solver.solve(&grid)
    }));
}

fn benchmark_seed(c: &mut Criterion) {
    c.bench_function("seed 9x9", |b| b.iter(|| {
        let mut generator = Generator::new_default();
        generator.seed(9).unwrap()
    }));
}

fn benchmark_generate(c: &mut Criterion) {
    let mut generator = Generator::new_default();
    let seed_grid = generator.seed(9).unwrap();
    let puzzle = Puzzle::new("bench", seed_grid);

    c.bench_function("generate 10 steps", |b| b.iter(|| {
        let mut generator = Generator::new_default();
        generator.generate(&puzzle, 10, 1).unwrap()
    }));
}

criterion_group!(all,
    benchmark_solve,
    benchmark_seed,
    benchmark_generate
);

criterion_main!(all);
