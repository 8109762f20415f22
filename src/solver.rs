//! This module contains the logic for solving Sudoku.
//!
//! Most importantly, this module contains the definition of the [Solver]
//! trait and the [BacktrackingSolver] as a generally usable implementation.
//! Besides the solutions themselves, solving yields a [SolveReport] with the
//! branch factors of the search, which the [score](crate::score) module
//! condenses into a difficulty rating.

use crate::{Cell, SudokuGrid};
use crate::score;
use crate::util::{self, DigitSet};

use rand::Rng;
use rand::rngs::ThreadRng;

/// An enumeration of the different ways a Sudoku can be solvable. This is a
/// summary view of a [SolveReport], obtained via [SolveReport::solution].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {

    /// Indicates that the Sudoku is not solvable at all, i.e. some cell ran
    /// out of candidates on every search path.
    Impossible,

    /// Indicates that the Sudoku has a unique solution, which is wrapped in
    /// this instance.
    Unique(SudokuGrid),

    /// Indicates that the Sudoku has multiple solutions. Such puzzles have
    /// no defined difficulty.
    Ambiguous
}

/// The complete outcome of one [Solver::solve] invocation.
///
/// Dead ends and ambiguity are carried here as data, never as errors: an
/// unsolvable grid simply yields an empty solution list and a grid with
/// several solutions yields two (the search stops at the second one, since
/// it already disproves uniqueness).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SolveReport {

    /// The distinct complete grids discovered by the search, in discovery
    /// order. Contains at most two entries.
    pub solutions: Vec<SudokuGrid>,

    /// One entry per exhausted search node, in exhaustion order: the number
    /// of alternatives that were tried at that node. Forced assignments do
    /// not appear here.
    pub branch_factors: Vec<usize>
}

impl SolveReport {
    fn new() -> SolveReport {
        SolveReport {
            solutions: Vec::new(),
            branch_factors: Vec::new()
        }
    }

    /// Summarizes this report as a [Solution].
    pub fn solution(&self) -> Solution {
        match self.solutions.len() {
            0 => Solution::Impossible,
            1 => Solution::Unique(self.solutions[0].clone()),
            _ => Solution::Ambiguous
        }
    }

    /// Indicates whether exactly one solution was found.
    pub fn is_unique(&self) -> bool {
        self.solutions.len() == 1
    }

    /// Computes the difficulty score of the solved puzzle, given the number
    /// of cells that were unresolved in the puzzle as given. The score is
    /// only defined if exactly one solution was found; otherwise `None` is
    /// returned. See [score::difficulty] for the formula.
    pub fn difficulty(&self, empty_cells: usize) -> Option<u64> {
        if self.is_unique() {
            Some(score::difficulty(&self.branch_factors, empty_cells))
        }
        else {
            None
        }
    }
}

/// A trait for structs which have the ability to solve Sudoku, i.e. find the
/// complete grids that extend a given grid, together with branch-factor
/// bookkeeping. Solvers may be randomized and therefore take `&mut self`;
/// two invocations on the same grid may discover the same solutions along
/// different search paths.
pub trait Solver {

    /// Solves the provided grid. The report contains all discovered
    /// solutions (at most two, as the second one already disproves
    /// uniqueness) and the branch factors of the search. The given grid is
    /// not modified; the search operates on its own copies.
    fn solve(&mut self, grid: &SudokuGrid) -> SolveReport;
}

/// Returns the index and candidate set of an unresolved cell with the
/// minimum number of remaining candidates, or `None` if every cell is
/// fixed. Cells with at most one candidate are returned immediately, since
/// the caller processes them without branching either way.
fn fewest_candidates(grid: &SudokuGrid) -> Option<(usize, DigitSet)> {
    let mut fewest: Option<(usize, DigitSet)> = None;

    for index in 0..grid.size() * grid.size() {
        if let Cell::Candidates(candidates) = grid.cell(index) {
            if candidates.len() <= 1 {
                return Some((index, candidates));
            }

            let replace = match fewest {
                Some((_, best)) => candidates.len() < best.len(),
                None => true
            };

            if replace {
                fewest = Some((index, candidates));
            }
        }
    }

    fewest
}

fn scan_unit(grid: &SudokuGrid, unit: impl Iterator<Item = usize>,
        best: &mut Option<(usize, Vec<usize>)>) {
    let size = grid.size();
    let mut positions: Vec<Vec<usize>> = vec![Vec::new(); size + 1];

    for index in unit {
        if let Cell::Candidates(candidates) = grid.cell(index) {
            for digit in candidates.iter() {
                positions[digit].push(index);
            }
        }
    }

    for digit in 1..=size {
        let digit_positions = &positions[digit];

        if digit_positions.is_empty() {
            continue;
        }

        let replace = match best {
            Some((_, best_positions)) =>
                digit_positions.len() < best_positions.len(),
            None => true
        };

        if replace {
            *best = Some((digit, digit_positions.clone()));
        }
    }
}

/// Determines, over every column, row, and box, which digit has the fewest
/// candidate positions within that unit. Returns the digit and its possible
/// positions for the global minimum, or `None` if no unresolved cell has any
/// candidate.
fn fewest_positions(grid: &SudokuGrid) -> Option<(usize, Vec<usize>)> {
    let size = grid.size();
    let box_size = grid.box_size();
    let mut best = None;

    for col in 0..size {
        scan_unit(grid, (col..size * size).step_by(size), &mut best);
    }

    for row in 0..size {
        scan_unit(grid, row * size..(row + 1) * size, &mut best);
    }

    for box_row in (0..size).step_by(box_size) {
        for box_col in (0..size).step_by(box_size) {
            let top_left = box_row * size + box_col;
            let box_cells = (0..box_size).flat_map(move |row_in_box| {
                let start = top_left + row_in_box * size;
                start..start + box_size
            });
            scan_unit(grid, box_cells, &mut best);
        }
    }

    best
}

/// A perfect [Solver] which solves Sudoku by recursive backtracking over
/// grid snapshots. Its distinguishing features:
///
/// * Constraint propagation: cells with a single remaining candidate are
/// assigned immediately, without counting as a branch.
/// * A hybrid branch-point heuristic: each node branches either on the cell
/// with the fewest remaining candidates or on the digit with the fewest
/// possible positions within some row, column, or box, whichever offers
/// fewer alternatives.
/// * Branch-factor accounting: every exhausted node records how many
/// alternatives it tried, which is the raw material of the difficulty score.
/// * Early abort: as soon as two distinct solutions are known, all remaining
/// siblings are skipped, since uniqueness is already disproved.
///
/// The order of equally promising alternatives is randomized with the
/// wrapped random number generator. This is intentional: puzzle generation
/// depends on varied solution paths, not a canonical search order.
pub struct BacktrackingSolver<R: Rng> {
    rng: R
}

impl BacktrackingSolver<ThreadRng> {

    /// Creates a new backtracking solver that uses a [ThreadRng] to order
    /// equally promising alternatives.
    pub fn new_default() -> BacktrackingSolver<ThreadRng> {
        BacktrackingSolver::new(rand::thread_rng())
    }
}

impl<R: Rng> BacktrackingSolver<R> {

    /// Creates a new backtracking solver that uses the given random number
    /// generator to order equally promising alternatives.
    pub fn new(rng: R) -> BacktrackingSolver<R> {
        BacktrackingSolver {
            rng
        }
    }

    /// Builds the list of `(digit, index)` assignments to try at a branching
    /// node, in uniformly random order. `index` and `candidates` describe
    /// the cell with the fewest remaining candidates.
    fn frontier(&mut self, grid: &SudokuGrid, index: usize,
            candidates: DigitSet) -> Vec<(usize, usize)> {
        if let Some((digit, positions)) = fewest_positions(grid) {
            if positions.len() < candidates.len() {
                // placing this digit somewhere in its unit branches less
                // than filling the cell
                return util::shuffle(&mut self.rng,
                    positions.into_iter().map(|position| (digit, position)));
            }
        }

        util::shuffle(&mut self.rng,
            candidates.iter().map(|digit| (digit, index)))
    }

    fn solve_rec(&mut self, mut grid: SudokuGrid, report: &mut SolveReport)
            -> Option<SudokuGrid> {
        loop {
            if grid.is_complete() {
                if !report.solutions.contains(&grid) {
                    report.solutions.push(grid.clone());
                }

                return Some(grid);
            }

            let (index, candidates) = fewest_candidates(&grid)?;

            if candidates.is_empty() {
                // dead end, not an error
                return None;
            }

            if let Some(digit) = candidates.only() {
                grid.assign(index, digit);
                continue;
            }

            let frontier = self.frontier(&grid, index, candidates);
            let mut branches = 0;

            for (digit, position) in frontier {
                let mut child = grid.clone();
                child.assign(position, digit);
                branches += 1;

                let deeper = self.solve_rec(child, report);

                if report.solutions.len() >= 2 && deeper.is_some() {
                    // uniqueness is disproved; skip the remaining siblings
                    return deeper;
                }
            }

            report.branch_factors.push(branches);
            return None;
        }
    }
}

impl<R: Rng> Solver for BacktrackingSolver<R> {
    fn solve(&mut self, grid: &SudokuGrid) -> SolveReport {
        let mut report = SolveReport::new();
        self.solve_rec(grid.clone(), &mut report);
        report
    }
}
