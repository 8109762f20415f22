// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements an easy-to-understand Sudoku engine that generates
//! puzzles and rates their difficulty. It supports the following key
//! features:
//!
//! * Parsing and printing Sudoku grids
//! * Solving Sudoku using a constraint-propagating backtracking algorithm
//! that tracks how much guessing a puzzle requires
//! * Detecting whether a puzzle is uniquely solvable
//! * Rating uniquely solvable puzzles with a numeric difficulty score
//! * Generating puzzles of high difficulty by randomized local search
//!
//! Note in this introduction we will mostly be using 4x4 Sudoku due to their
//! simpler nature. These are divided in 4 2x2 boxes, each with the digits 1
//! to 4, just like each row and column.
//!
//! # Parsing and printing Sudoku
//!
//! See [SudokuGrid::parse] for the exact format of a Sudoku code.
//!
//! Codes can be used to exchange Sudoku, while pretty prints can be used to
//! display a Sudoku in a clearer manner. An example of how to parse and
//! display a Sudoku grid is provided below.
//!
//! ```
//! use sudoku_forge::SudokuGrid;
//!
//! let grid = SudokuGrid::parse("4;2, ,3, , ,1, , ,1, , ,4, ,2, ,3").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Solving Sudoku
//!
//! The [BacktrackingSolver](solver::BacktrackingSolver) finds all solutions
//! of a grid (up to the second one, at which point uniqueness is disproved
//! and the search stops). Besides the solutions, it reports the branch
//! factors of its search, which measure how much guessing was required.
//!
//! ```
//! use sudoku_forge::SudokuGrid;
//! use sudoku_forge::solver::{BacktrackingSolver, Solution, Solver};
//!
//! // A riddle posed by our app:
//! // ╔═══╤═══╦═══╤═══╗
//! // ║   │   ║   │ 4 ║
//! // ╟───┼───╫───┼───╢
//! // ║   │ 4 ║ 3 │   ║
//! // ╠═══╪═══╬═══╪═══╣
//! // ║   │ 3 ║   │   ║
//! // ╟───┼───╫───┼───╢
//! // ║   │   ║ 1 │   ║
//! // ╚═══╧═══╩═══╧═══╝
//! let grid = SudokuGrid::parse("4; , , ,4, ,4,3, , ,3, , , , ,1, ").unwrap();
//! let mut solver = BacktrackingSolver::new_default();
//! let report = solver.solve(&grid);
//!
//! let expected_solution =
//!     SudokuGrid::parse("4;3,1,2,4,2,4,3,1,1,3,4,2,4,2,1,3").unwrap();
//! assert_eq!(Solution::Unique(expected_solution), report.solution());
//! ```
//!
//! # Generating Sudoku
//!
//! Probably the most interesting feature of this crate is the generation of
//! random Sudoku of high difficulty. The [Generator](generator::Generator)
//! first seeds a complete grid and then hill-climbs through randomized clue
//! additions and removals, keeping only mutations that leave the puzzle
//! uniquely solvable and retaining the highest-scoring puzzle it encounters.
//!
//! ```
//! use sudoku_forge::generator::Generator;
//!
//! // new_default yields a generator with a backtracking solver and
//! // rand::thread_rng()
//! let mut generator = Generator::new_default();
//! let puzzle = generator.create(9, "example", None).unwrap();
//!
//! assert_eq!(1, puzzle.solutions().len());
//! assert!(puzzle.difficulty().is_some());
//! ```
//!
//! # Note regarding performance
//!
//! Rating a puzzle requires solving it to completion, and the local search
//! solves one puzzle per mutation step. It is strongly recommended to use at
//! least `opt-level = 2`, even in tests that use puzzle generation.

pub mod error;
pub mod generator;
pub mod score;
pub mod solver;
pub mod util;


use crate::error::{
    SudokuError,
    SudokuParseError,
    SudokuParseResult,
    SudokuResult
};
use crate::solver::{SolveReport, Solver};
use crate::util::DigitSet;

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;
use std::fmt::{self, Display, Error, Formatter};

/// The state of one cell of a [SudokuGrid]: either a digit that has been
/// fixed, or the set of digits that are still possible for this cell. Every
/// component of this crate dispatches on this tag; there is no other cell
/// representation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {

    /// The cell is resolved to the wrapped digit. Within one grid snapshot,
    /// a fixed cell is never changed by the solver; only the generator
    /// reverts fixed cells via [SudokuGrid::clear].
    Fixed(usize),

    /// The cell is unresolved and the wrapped set holds the digits that no
    /// fixed peer has claimed yet. An empty set means the cell has no legal
    /// digit, making the entire grid unsolvable.
    Candidates(DigitSet)
}

impl Cell {

    /// Indicates whether this cell is resolved to a digit.
    pub fn is_fixed(&self) -> bool {
        match self {
            Cell::Fixed(_) => true,
            Cell::Candidates(_) => false
        }
    }

    /// Returns the digit this cell is resolved to, or `None` if it is
    /// unresolved.
    pub fn fixed(&self) -> Option<usize> {
        match self {
            Cell::Fixed(digit) => Some(*digit),
            Cell::Candidates(_) => None
        }
    }

    /// Returns the candidate set of this cell, or `None` if it is resolved.
    pub fn candidates(&self) -> Option<DigitSet> {
        match self {
            Cell::Fixed(_) => None,
            Cell::Candidates(set) => Some(*set)
        }
    }
}

/// A Sudoku grid is a square arrangement of [Cell]s which is subdivided into
/// square boxes. The size must be a perfect square, so that the boxes tile
/// the grid; for ordinary Sudoku the size is 9 and the boxes are 3x3.
///
/// Cells are stored in row-major order, i.e. for a grid of size `n`, the
/// cell at index `i` lies in row `i / n` and column `i % n`.
///
/// Beyond reading cells, the grid offers exactly two mutating operations:
/// [SudokuGrid::assign], which fixes a digit and prunes it from the
/// candidate sets of all peers, and [SudokuGrid::clear], which reverts a
/// fixed cell to a candidate set recomputed from its currently fixed peers.
///
/// `SudokuGrid` implements `Display`, but only grids with a size of less
/// than or equal to 9 can be displayed with digits 1 to 9. Sudoku of all
/// other sizes will raise an error.
///
/// In serialized form, a grid is represented by its parseable code (see
/// [SudokuGrid::parse]), which records the fixed digits only; candidate
/// sets are re-derived by propagation during deserialization.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct SudokuGrid {
    size: usize,
    box_size: usize,
    cells: Vec<Cell>
}

fn to_char(cell: Cell) -> char {
    match cell {
        Cell::Fixed(digit) => (b'0' + digit as u8) as char,
        Cell::Candidates(set) if set.is_empty() => '!',
        Cell::Candidates(_) => ' '
    }
}

fn line(grid: &SudokuGrid, start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool) -> String {
    let size = grid.size();
    let mut result = String::new();

    for x in 0..size {
        if x == 0 {
            result.push(start);
        }
        else if x % grid.box_size == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row(grid: &SudokuGrid) -> String {
    line(grid, '╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line(grid: &SudokuGrid) -> String {
    line(grid, '╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line(grid: &SudokuGrid) -> String {
    line(grid, '╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row(grid: &SudokuGrid) -> String {
    line(grid, '╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line(grid, '║', '║', '│', |x| to_char(grid.cell(y * grid.size() + x)),
        ' ', '║', true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let size = self.size();

        if size > 9 {
            return Err(Error::default());
        }

        let top_row = top_row(self);
        let thin_separator_line = thin_separator_line(self);
        let thick_separator_line = thick_separator_line(self);
        let bottom_row = bottom_row(self);

        for y in 0..size {
            if y == 0 {
                f.write_str(top_row.as_str())?;
            }
            else if y % self.box_size == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row.as_str())?;
        Ok(())
    }
}

fn check_size(size: usize) -> SudokuResult<usize> {
    if size == 0 || size > util::MAX_DIGITS {
        return Err(SudokuError::InvalidDimensions);
    }

    let box_size = (size as f64).sqrt() as usize;

    if box_size * box_size != size {
        Err(SudokuError::InvalidDimensions)
    }
    else {
        Ok(box_size)
    }
}

/// Invokes the given action for every cell index that shares a box, column,
/// or row with the cell at `index`, in that order. The cell itself is
/// visited as well (once per unit it shares with itself); actions that must
/// not touch it are expected to filter it out.
fn for_peers(size: usize, box_size: usize, index: usize,
        mut action: impl FnMut(usize)) {
    let row = index / size;
    let col = index % size;
    let top_left = (row - row % box_size) * size + (col - col % box_size);

    for box_row_start in (0..size * box_size).step_by(size) {
        for peer in top_left + box_row_start
                ..top_left + box_row_start + box_size {
            action(peer);
        }
    }

    for peer in (col..size * size).step_by(size) {
        action(peer);
    }

    for peer in row * size..(row + 1) * size {
        action(peer);
    }
}

impl SudokuGrid {

    /// Creates a new, empty Sudoku grid of the given size, in which every
    /// cell holds the full candidate set.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of rows and columns of the grid, which is also
    /// the highest digit. Must be a non-zero perfect square of at most
    /// [MAX_DIGITS](util::MAX_DIGITS); the boxes have dimension `√size`.
    ///
    /// # Errors
    ///
    /// If `size` is invalid (zero, not a perfect square, or too large). In
    /// that case, `SudokuError::InvalidDimensions` is returned.
    pub fn new(size: usize) -> SudokuResult<SudokuGrid> {
        let box_size = check_size(size)?;
        let cells = vec![Cell::Candidates(DigitSet::full(size)); size * size];

        Ok(SudokuGrid {
            size,
            box_size,
            cells
        })
    }

    /// Creates a grid of the given size from a flat slice of clues in
    /// row-major order, where 0 marks a blank cell and any other entry is a
    /// given digit. Each clue is propagated with [SudokuGrid::assign] in
    /// index order, so after construction all candidate sets are consistent
    /// with the given digits.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of rows and columns of the grid. Must be a
    /// non-zero perfect square of at most [MAX_DIGITS](util::MAX_DIGITS).
    /// * `clues`: One entry per cell, i.e. `size²` entries in total.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidDimensions` If `size` is invalid or `clues`
    /// does not contain exactly `size²` entries.
    /// * `SudokuError::InvalidNumber` If a clue is greater than `size`.
    /// * `SudokuError::ClashingClues` If a clue repeats a digit which an
    /// earlier clue already fixed in the same row, column, or box.
    pub fn from_clues(size: usize, clues: &[usize])
            -> SudokuResult<SudokuGrid> {
        let mut grid = SudokuGrid::new(size)?;

        if clues.len() != size * size {
            return Err(SudokuError::InvalidDimensions);
        }

        for (index, &clue) in clues.iter().enumerate() {
            if clue == 0 {
                continue;
            }

            if clue > size {
                return Err(SudokuError::InvalidNumber);
            }

            match grid.cell(index) {
                Cell::Candidates(candidates) if candidates.contains(clue) =>
                    grid.assign(index, clue),
                _ => return Err(SudokuError::ClashingClues)
            }
        }

        Ok(grid)
    }

    /// Parses a code encoding a Sudoku grid. The code has to be of the
    /// format `<size>;<cells>` where `<cells>` is a comma-separated list of
    /// entries, which are either empty or a digit. The entries are assigned
    /// left-to-right, top-to-bottom, where each row is completed before the
    /// next one is started. Whitespace in the entries is ignored to allow
    /// for more intuitive formatting. The number of entries must match the
    /// amount of cells in a grid with the given size, i.e. it must be
    /// `size²`.
    ///
    /// As an example, the code `4;1, ,2, , ,3, ,4, , , ,3, ,1, ,2` will
    /// parse to the following grid:
    ///
    /// ```text
    /// ╔═══╤═══╦═══╤═══╗
    /// ║ 1 │   ║ 2 │   ║
    /// ╟───┼───╫───┼───╢
    /// ║   │ 3 ║   │ 4 ║
    /// ╠═══╪═══╬═══╪═══╣
    /// ║   │   ║   │ 3 ║
    /// ╟───┼───╫───┼───╢
    /// ║   │ 1 ║   │ 2 ║
    /// ╚═══╧═══╩═══╧═══╝
    /// ```
    ///
    /// # Errors
    ///
    /// Any specialization of `SudokuParseError` (see that documentation).
    pub fn parse(code: &str) -> SudokuParseResult<SudokuGrid> {
        let parts: Vec<&str> = code.split(';').collect();

        if parts.len() != 2 {
            return Err(SudokuParseError::WrongNumberOfParts);
        }

        let size: usize = parts[0].trim().parse()?;
        let mut grid = match SudokuGrid::new(size) {
            Ok(grid) => grid,
            Err(_) => return Err(SudokuParseError::InvalidDimensions)
        };
        let entries: Vec<&str> = parts[1].split(',').collect();

        if entries.len() != size * size {
            return Err(SudokuParseError::WrongNumberOfCells);
        }

        for (index, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let digit = entry.parse::<usize>()?;

            if digit == 0 || digit > size {
                return Err(SudokuParseError::InvalidNumber);
            }

            match grid.cell(index) {
                Cell::Candidates(candidates) if candidates.contains(digit) =>
                    grid.assign(index, digit),
                _ => return Err(SudokuParseError::ClashingClues)
            }
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [SudokuGrid::parse]. The code records the fixed digits only, so a
    /// grid whose candidate sets have been thinned out by the generator's
    /// [clear](SudokuGrid::clear) operation parses back to a grid whose
    /// candidate sets are freshly derived from the fixed digits.
    ///
    /// ```
    /// use sudoku_forge::SudokuGrid;
    ///
    /// let grid = SudokuGrid::parse("4;1,,,2,,3,,4,,2,,,3,,,").unwrap();
    /// let grid_str = grid.to_parseable_string();
    /// let grid_parsed = SudokuGrid::parse(grid_str.as_str()).unwrap();
    /// assert_eq!(grid, grid_parsed);
    /// ```
    pub fn to_parseable_string(&self) -> String {
        let mut s = format!("{};", self.size);
        let cells = self.cells.iter()
            .map(|cell| match cell {
                Cell::Fixed(digit) => digit.to_string(),
                Cell::Candidates(_) => String::from("")
            })
            .collect::<Vec<String>>()
            .join(",");
        s.push_str(cells.as_str());
        s
    }

    /// Gets the total size of the grid on one axis (horizontally or
    /// vertically), which is also the highest digit.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the width and height of one box of the grid, i.e. the square
    /// root of [SudokuGrid::size].
    pub fn box_size(&self) -> usize {
        self.box_size
    }

    /// Gets the state of the cell at the specified index.
    ///
    /// # Panics
    ///
    /// If `index` is not less than `size²`.
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Gets the cells of this grid in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fixes the given value in the cell at the given index and removes it
    /// from the candidate sets of every peer, that is, every cell that
    /// shares a box, column, or row with the assigned cell. This is the sole
    /// operation by which digits enter a grid: every assignment immediately
    /// prunes the search space instead of deferring the work to a later
    /// consistency check.
    ///
    /// It is the caller's responsibility to only assign values that are
    /// currently candidates of the target cell; this is not checked here.
    /// Assigning anything else produces a grid that violates the Sudoku
    /// rules, which [SudokuGrid::is_valid] can detect after the fact.
    ///
    /// # Arguments
    ///
    /// * `index`: The index of the assigned cell. Must be less than `size²`.
    /// * `value`: The digit to fix. Must be in the range `[1, size]`.
    ///
    /// # Panics
    ///
    /// If `index` is not less than `size²`.
    pub fn assign(&mut self, index: usize, value: usize) {
        let size = self.size;
        let box_size = self.box_size;
        let cells = &mut self.cells;

        for_peers(size, box_size, index, |peer| {
            if let Cell::Candidates(candidates) = &mut cells[peer] {
                candidates.remove(value);
            }
        });

        self.cells[index] = Cell::Fixed(value);
    }

    /// Reverts the cell at the given index to an unresolved state. The new
    /// candidate set contains every digit that is not currently fixed in any
    /// peer cell. If the cell is not fixed, nothing happens.
    ///
    /// Note that only *currently fixed* peers are consulted: candidates that
    /// were pruned from other cells while this cell was still fixed are not
    /// restored anywhere else. A sequence of `clear` calls can therefore
    /// leave peers with candidate sets that are narrower than the fixed
    /// digits warrant. The generator compensates by re-solving after every
    /// mutation step and discarding steps that break unique solvability.
    ///
    /// # Panics
    ///
    /// If `index` is not less than `size²`.
    pub fn clear(&mut self, index: usize) {
        if let Cell::Candidates(_) = self.cells[index] {
            return;
        }

        let size = self.size;
        let box_size = self.box_size;
        let cells = &self.cells;
        let mut candidates = DigitSet::full(size);

        for_peers(size, box_size, index, |peer| {
            if peer == index {
                return;
            }

            if let Cell::Fixed(digit) = cells[peer] {
                candidates.remove(digit);
            }
        });

        self.cells[index] = Cell::Candidates(candidates);
    }

    /// Indicates whether every cell of this grid is fixed to a digit.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_fixed())
    }

    /// Counts the number of fixed cells of this grid. While on average
    /// Sudoku with less clues are harder, this is *not* a reliable measure
    /// of difficulty; see the [score] module for that.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_fixed()).count()
    }

    /// Counts the number of unresolved cells of this grid. This is the
    /// linear term of the difficulty score.
    pub fn empty_cells(&self) -> usize {
        self.cells.len() - self.count_clues()
    }

    /// Indicates whether the fixed digits of this grid satisfy the Sudoku
    /// rules, i.e. no digit appears twice in any row, column, or box.
    /// Unresolved cells are ignored, so partial grids can be valid.
    pub fn is_valid(&self) -> bool {
        let size = self.size;
        let box_size = self.box_size;

        for row in 0..size {
            if !self.unit_has_no_duplicates(row * size..(row + 1) * size) {
                return false;
            }
        }

        for col in 0..size {
            if !self.unit_has_no_duplicates((col..size * size).step_by(size)) {
                return false;
            }
        }

        for box_row in (0..size).step_by(box_size) {
            for box_col in (0..size).step_by(box_size) {
                let top_left = box_row * size + box_col;
                let box_cells = (0..box_size).flat_map(move |row_in_box| {
                    let start = top_left + row_in_box * size;
                    start..start + box_size
                });

                if !self.unit_has_no_duplicates(box_cells) {
                    return false;
                }
            }
        }

        true
    }

    fn unit_has_no_duplicates(&self, unit: impl Iterator<Item = usize>)
            -> bool {
        let mut seen = DigitSet::empty(self.size);

        for index in unit {
            if let Cell::Fixed(digit) = self.cells[index] {
                if !seen.insert(digit) {
                    return false;
                }
            }
        }

        true
    }
}

impl From<SudokuGrid> for String {
    fn from(grid: SudokuGrid) -> String {
        grid.to_parseable_string()
    }
}

impl TryFrom<String> for SudokuGrid {
    type Error = SudokuParseError;

    fn try_from(code: String) -> Result<SudokuGrid, SudokuParseError> {
        SudokuGrid::parse(&code)
    }
}

/// A Sudoku puzzle bundles a labelled [SudokuGrid] of clues with the results
/// of solving it: the list of discovered complete solutions (of which at
/// most two are searched for, since a second one already disproves
/// uniqueness), the branch factors recorded during the search, and, if and
/// only if exactly one solution exists, a difficulty score.
///
/// A puzzle is created either by wrapping a grid with [Puzzle::new] or by
/// the [Generator](generator::Generator). Solving via [Puzzle::solve_with]
/// re-derives solutions, branch factors and difficulty from the current
/// grid.
#[derive(Clone, Debug)]
pub struct Puzzle {
    label: String,
    grid: SudokuGrid,
    solutions: Vec<SudokuGrid>,
    branch_factors: Vec<usize>,
    difficulty: Option<u64>
}

impl Puzzle {

    /// Creates a new, unsolved puzzle with the given label around the given
    /// grid of clues. The solution list is empty and the difficulty
    /// undefined until [Puzzle::solve_with] is called.
    pub fn new(label: &str, grid: SudokuGrid) -> Puzzle {
        Puzzle {
            label: String::from(label),
            grid,
            solutions: Vec::new(),
            branch_factors: Vec::new(),
            difficulty: None
        }
    }

    /// Creates a puzzle directly from a grid and the report of a solver run
    /// on that grid.
    pub(crate) fn with_report(label: &str, grid: SudokuGrid,
            report: SolveReport) -> Puzzle {
        let difficulty = report.difficulty(grid.empty_cells());

        Puzzle {
            label: String::from(label),
            grid,
            solutions: report.solutions,
            branch_factors: report.branch_factors,
            difficulty
        }
    }

    /// Gets the label of this puzzle.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Gets a reference to the grid of clues of this puzzle.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Gets the complete solutions discovered for this puzzle. The search
    /// stops as soon as a second solution is found, so this slice contains
    /// at most two entries even for wildly ambiguous grids.
    pub fn solutions(&self) -> &[SudokuGrid] {
        &self.solutions
    }

    /// If this puzzle has exactly one discovered solution, returns it.
    pub fn unique_solution(&self) -> Option<&SudokuGrid> {
        if self.solutions.len() == 1 {
            self.solutions.first()
        }
        else {
            None
        }
    }

    /// Gets the branch factors recorded while solving this puzzle, in the
    /// order in which the search exhausted the associated nodes.
    pub fn branch_factors(&self) -> &[usize] {
        &self.branch_factors
    }

    /// Gets the difficulty score of this puzzle, which is defined if and
    /// only if it has exactly one solution. See
    /// [score::difficulty](score::difficulty) for the formula.
    pub fn difficulty(&self) -> Option<u64> {
        self.difficulty
    }

    /// Solves this puzzle's grid with the given solver and stores the
    /// discovered solutions, the branch factors, and, if the solution is
    /// unique, the difficulty score. Previous results are discarded.
    pub fn solve_with(&mut self, solver: &mut impl Solver) {
        let report = solver.solve(&self.grid);
        self.difficulty = report.difficulty(self.grid.empty_cells());
        self.solutions = report.solutions;
        self.branch_factors = report.branch_factors;
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        Display::fmt(&self.grid, f)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::digits;

    #[test]
    fn parse_ok() {
        let grid_res = SudokuGrid::parse("4; 1,,,2, ,3,,4, ,2,,, 3,,,");

        if let Ok(grid) = grid_res {
            assert_eq!(4, grid.size());
            assert_eq!(2, grid.box_size());
            assert_eq!(Some(1), grid.cell(0).fixed());
            assert_eq!(None, grid.cell(1).fixed());
            assert_eq!(None, grid.cell(2).fixed());
            assert_eq!(Some(2), grid.cell(3).fixed());
            assert_eq!(None, grid.cell(4).fixed());
            assert_eq!(Some(3), grid.cell(5).fixed());
            assert_eq!(None, grid.cell(6).fixed());
            assert_eq!(Some(4), grid.cell(7).fixed());
            assert_eq!(None, grid.cell(8).fixed());
            assert_eq!(Some(2), grid.cell(9).fixed());
            assert_eq!(Some(3), grid.cell(12).fixed());
            assert_eq!(None, grid.cell(15).fixed());
        }
        else {
            panic!("Parsing valid grid failed.");
        }
    }

    #[test]
    fn parse_wrong_number_of_parts() {
        assert_eq!(Err(SudokuParseError::WrongNumberOfParts),
            SudokuGrid::parse("4;,,,,,,,,,,,,,,,;whatever"));
        assert_eq!(Err(SudokuParseError::WrongNumberOfParts),
            SudokuGrid::parse("1,2,3,4"));
    }

    #[test]
    fn parse_invalid_dimensions() {
        assert_eq!(Err(SudokuParseError::InvalidDimensions),
            SudokuGrid::parse("5;,"));
        assert_eq!(Err(SudokuParseError::InvalidDimensions),
            SudokuGrid::parse("0;,"));
        assert_eq!(Err(SudokuParseError::InvalidDimensions),
            SudokuGrid::parse("81;,"));
    }

    #[test]
    fn parse_number_format_error() {
        assert_eq!(Err(SudokuParseError::NumberFormatError),
            SudokuGrid::parse("#;,"));
        assert_eq!(Err(SudokuParseError::NumberFormatError),
            SudokuGrid::parse("4;a,,,,,,,,,,,,,,,"));
    }

    #[test]
    fn parse_invalid_number() {
        assert_eq!(Err(SudokuParseError::InvalidNumber),
            SudokuGrid::parse("4;,,,5,,,,,,,,,,,,"));
        assert_eq!(Err(SudokuParseError::InvalidNumber),
            SudokuGrid::parse("4;0,,,,,,,,,,,,,,,"));
    }

    #[test]
    fn parse_wrong_number_of_cells() {
        assert_eq!(Err(SudokuParseError::WrongNumberOfCells),
            SudokuGrid::parse("4;1,2,3,4,1,2,3,4,1,2,3,4,1,2,3"));
        assert_eq!(Err(SudokuParseError::WrongNumberOfCells),
            SudokuGrid::parse("4;1,2,3,4,1,2,3,4,1,2,3,4,1,2,3,4,1"));
    }

    #[test]
    fn parse_clashing_clues() {
        // two 1s in the first row
        assert_eq!(Err(SudokuParseError::ClashingClues),
            SudokuGrid::parse("4;1,1,,,,,,,,,,,,,,"));

        // two 3s in the first column
        assert_eq!(Err(SudokuParseError::ClashingClues),
            SudokuGrid::parse("4;3,,,,,,,,3,,,,,,,"));

        // two 2s in the top-left box
        assert_eq!(Err(SudokuParseError::ClashingClues),
            SudokuGrid::parse("4;2,,,,,2,,,,,,,,,,"));
    }

    #[test]
    fn to_parseable_string() {
        let mut grid = SudokuGrid::new(4).unwrap();

        assert_eq!("4;,,,,,,,,,,,,,,,", grid.to_parseable_string().as_str());

        grid.assign(0, 1);
        grid.assign(5, 2);
        grid.assign(10, 3);
        grid.assign(15, 4);

        assert_eq!("4;1,,,,,2,,,,,3,,,,,4",
            grid.to_parseable_string().as_str());
    }

    #[test]
    fn new_grid_has_full_candidate_sets() {
        let grid = SudokuGrid::new(9).unwrap();

        assert_eq!(9, grid.size());
        assert_eq!(3, grid.box_size());
        assert_eq!(81, grid.empty_cells());
        assert!(!grid.is_complete());

        for index in 0..81 {
            assert_eq!(Some(DigitSet::full(9)), grid.cell(index).candidates());
        }
    }

    #[test]
    fn new_rejects_invalid_sizes() {
        assert_eq!(Err(SudokuError::InvalidDimensions), SudokuGrid::new(0));
        assert_eq!(Err(SudokuError::InvalidDimensions), SudokuGrid::new(5));
        assert_eq!(Err(SudokuError::InvalidDimensions), SudokuGrid::new(8));
        assert_eq!(Err(SudokuError::InvalidDimensions), SudokuGrid::new(81));
        assert!(SudokuGrid::new(1).is_ok());
        assert!(SudokuGrid::new(4).is_ok());
        assert!(SudokuGrid::new(16).is_ok());
        assert!(SudokuGrid::new(64).is_ok());
    }

    #[test]
    fn assign_prunes_peers() {
        let mut grid = SudokuGrid::new(9).unwrap();
        grid.assign(0, 5);

        assert_eq!(Some(5), grid.cell(0).fixed());

        // same row
        assert!(!grid.cell(1).candidates().unwrap().contains(5));
        assert!(!grid.cell(8).candidates().unwrap().contains(5));

        // same column
        assert!(!grid.cell(9).candidates().unwrap().contains(5));
        assert!(!grid.cell(72).candidates().unwrap().contains(5));

        // same box
        assert!(!grid.cell(10).candidates().unwrap().contains(5));
        assert!(!grid.cell(20).candidates().unwrap().contains(5));

        // unrelated cell keeps the digit
        assert!(grid.cell(80).candidates().unwrap().contains(5));
        assert!(grid.cell(30).candidates().unwrap().contains(5));
    }

    #[test]
    fn assign_is_idempotent_on_peers() {
        let mut grid = SudokuGrid::new(9).unwrap();
        grid.assign(0, 5);
        grid.assign(40, 7);

        let snapshot = grid.clone();
        grid.assign(0, 5);

        assert_eq!(snapshot, grid);
    }

    #[test]
    fn from_clues_accepts_consistent_grid() {
        let mut clues = vec![0; 16];
        clues[3] = 4;
        clues[5] = 4;
        clues[6] = 3;
        clues[9] = 3;
        clues[14] = 1;

        let grid = SudokuGrid::from_clues(4, &clues).unwrap();

        assert_eq!(Some(4), grid.cell(3).fixed());
        assert_eq!(Some(4), grid.cell(5).fixed());
        assert_eq!(Some(3), grid.cell(6).fixed());
        assert_eq!(Some(3), grid.cell(9).fixed());
        assert_eq!(Some(1), grid.cell(14).fixed());
        assert_eq!(11, grid.empty_cells());
        assert!(grid.is_valid());
    }

    #[test]
    fn from_clues_rejects_clashing_clues() {
        // two 9s in the first row
        let mut clues = vec![0; 81];
        clues[0] = 9;
        clues[5] = 9;

        assert_eq!(Err(SudokuError::ClashingClues),
            SudokuGrid::from_clues(9, &clues));
    }

    #[test]
    fn from_clues_rejects_wrong_length() {
        assert_eq!(Err(SudokuError::InvalidDimensions),
            SudokuGrid::from_clues(9, &vec![0; 80]));
    }

    #[test]
    fn from_clues_rejects_invalid_number() {
        let mut clues = vec![0; 16];
        clues[7] = 5;

        assert_eq!(Err(SudokuError::InvalidNumber),
            SudokuGrid::from_clues(4, &clues));
    }

    fn complete_grid() -> SudokuGrid {
        SudokuGrid::parse("4;3,1,2,4,2,4,3,1,1,3,4,2,4,2,1,3").unwrap()
    }

    #[test]
    fn clear_recomputes_candidates_from_fixed_peers() {
        let mut grid = complete_grid();
        grid.clear(0);

        // every other digit of the cleared cell's units is still fixed
        assert_eq!(Some(digits!(4; 3)), grid.cell(0).candidates());
        assert_eq!(15, grid.count_clues());
    }

    #[test]
    fn clear_of_unresolved_cell_is_a_no_op() {
        let mut grid = complete_grid();
        grid.clear(0);
        let snapshot = grid.clone();
        grid.clear(0);

        assert_eq!(snapshot, grid);
    }

    #[test]
    fn cleared_cells_keep_stale_candidate_sets() {
        // Characterizes the documented recomputation gap of `clear`: a
        // cleared cell's candidate set is computed once, from the peers
        // fixed at that moment, and clearing further peers afterwards does
        // not widen it again.

        let mut grid = complete_grid();

        grid.clear(4);
        grid.clear(0);
        grid.clear(2);

        // cells 4 and 2 held the only 2s among cell 0's peers, yet the set
        // of cell 0 still excludes 2 because both were fixed when cell 0
        // was cleared
        assert_eq!(Some(digits!(4; 3)), grid.cell(0).candidates());
        assert_eq!(Some(digits!(4; 2)), grid.cell(4).candidates());
        assert_eq!(Some(digits!(4; 2)), grid.cell(2).candidates());
    }

    #[test]
    fn completeness_and_counts() {
        let empty = SudokuGrid::new(4).unwrap();
        let partial = SudokuGrid::parse("4;1,,3,2,4,,,,,,,,,,1,").unwrap();
        let full = complete_grid();

        assert_eq!(0, empty.count_clues());
        assert_eq!(5, partial.count_clues());
        assert_eq!(16, full.count_clues());

        assert_eq!(16, empty.empty_cells());
        assert_eq!(11, partial.empty_cells());
        assert_eq!(0, full.empty_cells());

        assert!(!empty.is_complete());
        assert!(!partial.is_complete());
        assert!(full.is_complete());
    }

    #[test]
    fn validity_of_rule_breaking_grid() {
        // assign does not check its precondition, so a duplicate can be
        // forced into a unit and must be caught by is_valid
        let mut grid = SudokuGrid::new(4).unwrap();
        grid.assign(0, 1);
        grid.assign(1, 1);

        assert!(!grid.is_valid());
    }

    #[test]
    fn validity_of_complete_grid() {
        assert!(complete_grid().is_valid());
    }

    #[test]
    fn serde_round_trip() {
        let grid = SudokuGrid::parse("4;1,,,2,,3,,4,,2,,,3,,,").unwrap();
        let json = serde_json::to_string(&grid).unwrap();

        assert_eq!("\"4;1,,,2,,3,,4,,2,,,3,,,\"", json.as_str());

        let parsed: SudokuGrid = serde_json::from_str(json.as_str()).unwrap();
        assert_eq!(grid, parsed);
    }

    #[test]
    fn serde_rejects_invalid_code() {
        let result: Result<SudokuGrid, _> =
            serde_json::from_str("\"4;1,1,,,,,,,,,,,,,,\"");
        assert!(result.is_err());
    }

    #[test]
    fn puzzle_starts_unsolved() {
        let puzzle = Puzzle::new("fresh",
            SudokuGrid::parse("4;1,,,2,,3,,4,,2,,,3,,,").unwrap());

        assert_eq!("fresh", puzzle.label());
        assert!(puzzle.solutions().is_empty());
        assert!(puzzle.branch_factors().is_empty());
        assert_eq!(None, puzzle.difficulty());
        assert_eq!(None, puzzle.unique_solution());
    }
}
