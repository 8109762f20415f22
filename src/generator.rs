//! This module contains logic for generating random Sudoku puzzles.
//!
//! Generation happens in two phases. First, a complete grid is seeded: the
//! boxes of the top band and the first column are filled with random digits
//! and the [Solver] completes the rest. Second, the complete grid is refined
//! by randomized local search: clues are repeatedly added and removed, every
//! mutation that destroys unique solvability is rolled back, and the
//! highest-scoring puzzle encountered is retained.
//!
//! ```
//! use sudoku_forge::generator::Generator;
//!
//! // new_default yields a generator with a backtracking solver and
//! // rand::thread_rng()
//! let mut generator = Generator::new_default();
//! let puzzle = generator.create(9, "morning puzzle", None).unwrap();
//!
//! assert_eq!(1, puzzle.solutions().len());
//! assert!(puzzle.difficulty().is_some());
//! ```

use crate::{Cell, Puzzle, SudokuGrid};
use crate::error::{SudokuError, SudokuResult};
use crate::solver::{BacktrackingSolver, Solver};
use crate::util;

use rand::Rng;
use rand::rngs::ThreadRng;

/// The number of mutation steps per walk used by [Generator::create] when no
/// clues are provided.
pub const DEFAULT_STEPS: usize = 10;

/// The number of local-search walks used by [Generator::create] when no
/// clues are provided.
pub const DEFAULT_WALKS: usize = 1;

/// Picks a value from the pool which leaves the guarded cell with at least
/// `box_size` candidates afterwards, so the bottom row of the second box
/// stays fillable. Falls back to an arbitrary pool value if no pick
/// satisfies the guard.
fn pick_guarded(grid: &SudokuGrid, values: &mut Vec<usize>, guarded: usize,
        box_size: usize) -> Option<usize> {
    let guarded_candidates = match grid.cell(guarded) {
        Cell::Candidates(candidates) => candidates,
        Cell::Fixed(_) => return values.pop()
    };

    let choice = values.iter().position(|&value| {
        let remaining = if guarded_candidates.contains(value) {
            guarded_candidates.len() - 1
        }
        else {
            guarded_candidates.len()
        };

        remaining >= box_size
    });

    match choice {
        Some(position) => Some(values.remove(position)),
        None => values.pop()
    }
}

/// A generator produces [Puzzle]s: it seeds complete [SudokuGrid]s and
/// refines them into difficult, uniquely solvable puzzles by randomized
/// local search. It wraps a [Solver], which validates and scores every
/// candidate puzzle, and a random number generator, which drives all random
/// decisions. For most cases, sensible defaults are provided by
/// [Generator::new_default].
pub struct Generator<S: Solver, R: Rng> {
    solver: S,
    rng: R
}

impl Generator<BacktrackingSolver<ThreadRng>, ThreadRng> {

    /// Creates a new generator that uses a [BacktrackingSolver] to validate
    /// and score puzzles and a [ThreadRng] to make random decisions.
    pub fn new_default() -> Generator<BacktrackingSolver<ThreadRng>, ThreadRng> {
        Generator::new(BacktrackingSolver::new_default(), rand::thread_rng())
    }
}

impl<S: Solver, R: Rng> Generator<S, R> {

    /// Creates a new generator that uses the given solver to validate and
    /// score puzzles and the given random number generator to make random
    /// decisions.
    pub fn new(solver: S, rng: R) -> Generator<S, R> {
        Generator {
            solver,
            rng
        }
    }

    fn fill_top_band_box(&mut self, grid: &mut SudokuGrid, band_box: usize) {
        let size = grid.size();
        let box_size = grid.box_size();

        // first cell of the second box's bottom row; the guarded fill below
        // keeps it from running out of candidates
        let guarded = size * (box_size - 1) + box_size;

        for row in 0..box_size {
            let first = row * size + band_box * box_size;
            let candidates = match grid.cell(first) {
                Cell::Candidates(candidates) => candidates,
                Cell::Fixed(_) => continue
            };
            let mut values = util::shuffle(&mut self.rng, candidates.iter());

            for index in first..first + box_size {
                let digit = if band_box == 1 && row < box_size - 1 {
                    pick_guarded(grid, &mut values, guarded, box_size)
                }
                else {
                    values.pop()
                };

                if let Some(digit) = digit {
                    grid.assign(index, digit);
                }
            }
        }
    }

    /// Generates a new random complete grid of the given size. The boxes of
    /// the top band are filled row-by-row with random digit orders, the
    /// remaining cells of the first column are filled randomly from their
    /// candidates, and the solver completes the rest. This seeding order
    /// determines enough of the grid that the completion is forced or
    /// lightly branching, which keeps seeding fast.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidDimensions` If `size` is invalid (zero, not a
    /// perfect square, or too large).
    /// * `SudokuError::Unsolvable` If the randomly seeded cells admit no
    /// completion.
    pub fn seed(&mut self, size: usize) -> SudokuResult<SudokuGrid> {
        let mut grid = SudokuGrid::new(size)?;
        let box_size = grid.box_size();

        for band_box in 0..box_size {
            self.fill_top_band_box(&mut grid, band_box);
        }

        for row in box_size..size {
            let index = row * size;

            if let Cell::Candidates(candidates) = grid.cell(index) {
                let values = util::shuffle(&mut self.rng, candidates.iter());

                if let Some(&digit) = values.first() {
                    grid.assign(index, digit);
                }
            }
        }

        let report = self.solver.solve(&grid);
        report.solutions.into_iter().next().ok_or(SudokuError::Unsolvable)
    }

    /// Creates a new [Puzzle] with the given label.
    ///
    /// If `clues` are provided, they are wrapped directly: the resulting
    /// puzzle contains exactly the given digits and is solved and scored,
    /// but no local search is performed. If `clues` is `None`, a complete
    /// grid is seeded and refined with the default search effort of
    /// [DEFAULT_STEPS] steps and [DEFAULT_WALKS] walks.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of rows and columns of the grid. Must be a
    /// non-zero perfect square of at most
    /// [MAX_DIGITS](crate::util::MAX_DIGITS).
    /// * `label`: A textual label attached to the resulting puzzle.
    /// * `clues`: If present, one entry per cell in row-major order, where 0
    /// marks a blank cell.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidDimensions` If `size` is invalid or the clue
    /// slice has the wrong length.
    /// * `SudokuError::InvalidNumber` If a clue is greater than `size`.
    /// * `SudokuError::ClashingClues` If a clue repeats a digit fixed by an
    /// earlier clue in the same row, column, or box.
    /// * `SudokuError::Unsolvable` If seeding fails to produce a complete
    /// grid.
    pub fn create(&mut self, size: usize, label: &str,
            clues: Option<&[usize]>) -> SudokuResult<Puzzle> {
        match clues {
            Some(clues) => {
                let grid = SudokuGrid::from_clues(size, clues)?;
                let mut puzzle = Puzzle::new(label, grid);
                puzzle.solve_with(&mut self.solver);
                Ok(puzzle)
            },
            None => {
                let solution = self.seed(size)?;
                let mut puzzle = Puzzle::new(label, solution);
                puzzle.solve_with(&mut self.solver);
                self.generate(&puzzle, DEFAULT_STEPS, DEFAULT_WALKS)
            }
        }
    }

    /// Assigns a uniformly random candidate to the given cell. Returns
    /// `true` if a digit was assigned and `false` if the cell was not open
    /// or had no candidates left.
    fn add_clue(&mut self, grid: &mut SudokuGrid, index: usize) -> bool {
        if let Cell::Candidates(candidates) = grid.cell(index) {
            if !candidates.is_empty() {
                let pick = self.rng.gen_range(0..candidates.len());

                if let Some(digit) = candidates.iter().nth(pick) {
                    grid.assign(index, digit);
                    return true;
                }
            }
        }

        false
    }

    /// Performs one walk of `steps` mutation steps starting from the given
    /// grid and returns the highest-scoring uniquely solvable puzzle
    /// encountered, or `None` if no step produced one.
    fn walk(&mut self, start: &SudokuGrid, label: &str, steps: usize)
            -> Option<Puzzle> {
        let mut grid = start.clone();
        let total = grid.size() * grid.size();
        let mut fixed: Vec<usize> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for index in 0..total {
            if grid.cell(index).is_fixed() {
                fixed.push(index);
            }
            else {
                open.push(index);
            }
        }

        let mut walk_best: Option<Puzzle> = None;

        for _ in 0..steps {
            // removal becomes more likely the fuller the grid is
            let removal_probability = 1.0 - open.len() as f64 / total as f64;
            let remove = self.rng.gen_bool(removal_probability);

            if remove && fixed.len() < 2 {
                continue;
            }

            if !remove && open.len() < 2 {
                continue;
            }

            let grid_snapshot = grid.clone();
            let fixed_snapshot = fixed.clone();
            let open_snapshot = open.clone();

            if remove {
                for _ in 0..2 {
                    let pick = self.rng.gen_range(0..fixed.len());
                    let index = fixed.swap_remove(pick);
                    grid.clear(index);
                    open.push(index);
                }
            }
            else {
                let first_pick = self.rng.gen_range(0..open.len());
                let first = open.swap_remove(first_pick);
                let second_pick = self.rng.gen_range(0..open.len());
                let second = open.swap_remove(second_pick);

                for &index in [first, second].iter() {
                    if self.add_clue(&mut grid, index) {
                        fixed.push(index);
                    }
                    else {
                        open.push(index);
                    }
                }
            }

            let report = self.solver.solve(&grid);

            if report.is_unique() {
                let candidate = Puzzle::with_report(label, grid.clone(),
                    report);
                let improved = match &walk_best {
                    Some(best) => candidate.difficulty() > best.difficulty(),
                    None => true
                };

                if improved {
                    walk_best = Some(candidate);
                }
            }
            else {
                // the mutation broke solvability or uniqueness; undo it
                grid = grid_snapshot;
                fixed = fixed_snapshot;
                open = open_snapshot;
            }
        }

        walk_best
    }

    /// Refines the given puzzle by randomized local search and returns the
    /// highest-scoring uniquely solvable puzzle discovered.
    ///
    /// The search is seeded from a solution of the given puzzle. It performs
    /// `walks` independent walks of `steps` mutation steps each. A step
    /// either removes two random clues (via [SudokuGrid::clear]) or fixes
    /// random candidates in two open cells (via [SudokuGrid::assign]), with
    /// the removal probability growing with the number of placed clues.
    /// After every step the mutated grid is re-solved; mutations that do not
    /// leave exactly one solution are rolled back. Each walk's best puzzle
    /// seeds the next walk, and the best puzzle across all walks is
    /// returned.
    ///
    /// With `steps = 0`, no mutation is applied and the result wraps the
    /// solution itself, which has no empty cells and a difficulty of 0.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsolvable` If the given puzzle's grid has no
    /// solution to seed the search from.
    pub fn generate(&mut self, puzzle: &Puzzle, steps: usize, walks: usize)
            -> SudokuResult<Puzzle> {
        let start_report = self.solver.solve(puzzle.grid());
        let solution = start_report.solutions.into_iter().next()
            .ok_or(SudokuError::Unsolvable)?;

        let solution_report = self.solver.solve(&solution);
        let mut best = Puzzle::with_report(puzzle.label(), solution.clone(),
            solution_report);
        let mut current = solution;

        for _ in 0..walks {
            if let Some(walk_best) = self.walk(&current, puzzle.label(),
                    steps) {
                current = walk_best.grid().clone();

                if walk_best.difficulty() > best.difficulty() {
                    best = walk_best;
                }
            }
        }

        Ok(best)
    }
}
