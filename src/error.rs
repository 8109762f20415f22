//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// Miscellaneous errors that can occur when constructing grids or generating
/// puzzles. This does not include errors that occur when parsing a grid code,
/// see [SudokuParseError](enum.SudokuParseError.html) for that.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the size specified for a created grid is invalid. This
    /// is the case if it is zero, not a perfect square, or larger than
    /// [MAX_DIGITS](crate::util::MAX_DIGITS). It is also returned if a clue
    /// slice does not contain exactly one entry per cell.
    InvalidDimensions,

    /// Indicates that some digit is invalid for the size of the grid in
    /// question. This is the case if it is greater than the size. Note that 0
    /// marks a blank cell in clue slices and is therefore legal there.
    InvalidNumber,

    /// Indicates that the specified cell index lies outside the grid in
    /// question. This is the case if it is greater than or equal to the
    /// squared size.
    OutOfBounds,

    /// Indicates that a provided clue is inconsistent with the clues placed
    /// before it, i.e. the same digit is already fixed in the clue's row,
    /// column, or box. Such grids are rejected at construction.
    ClashingClues,

    /// An error that is raised whenever the generator requires at least one
    /// complete solution of a grid, but the search found none.
    Unsolvable
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::InvalidDimensions =>
                write!(f, "invalid dimensions"),
            SudokuError::InvalidNumber =>
                write!(f, "invalid number"),
            SudokuError::OutOfBounds =>
                write!(f, "cell index out of bounds"),
            SudokuError::ClashingClues =>
                write!(f, "clashing clues"),
            SudokuError::Unsolvable =>
                write!(f, "grid has no solution")
        }
    }
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a
/// [SudokuGrid](crate::SudokuGrid) code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SudokuParseError {

    /// Indicates that the code has the wrong number of parts, which are
    /// separated by semicolons. The code should have two parts: size and
    /// cells (separated by ';'), so if the code does not contain exactly one
    /// semicolon, this error will be returned.
    WrongNumberOfParts,

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal the square of the size.
    WrongNumberOfCells,

    /// Indicates that the provided size is invalid (i.e. zero, not a perfect
    /// square, or larger than [MAX_DIGITS](crate::util::MAX_DIGITS)).
    InvalidDimensions,

    /// Indicates that one of the numbers (size or cell content) could not be
    /// parsed.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid digit (0 or more than
    /// the grid size).
    InvalidNumber,

    /// Indicates that a cell is filled with a digit that is inconsistent with
    /// the cells before it, i.e. the same digit appears twice in a row,
    /// column, or box.
    ClashingClues
}

impl Display for SudokuParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuParseError::WrongNumberOfParts =>
                write!(f, "wrong number of parts"),
            SudokuParseError::WrongNumberOfCells =>
                write!(f, "wrong number of cells"),
            SudokuParseError::InvalidDimensions =>
                write!(f, "invalid dimensions"),
            SudokuParseError::NumberFormatError =>
                write!(f, "number format error"),
            SudokuParseError::InvalidNumber =>
                write!(f, "invalid number"),
            SudokuParseError::ClashingClues =>
                write!(f, "clashing clues")
        }
    }
}

impl From<ParseIntError> for SudokuParseError {
    fn from(_: ParseIntError) -> Self {
        SudokuParseError::NumberFormatError
    }
}

/// Syntactic sugar for `Result<V, SudokuParseError>`.
pub type SudokuParseResult<V> = Result<V, SudokuParseError>;
