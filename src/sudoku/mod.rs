#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `solver` module reduces a Sudoku grid to an exact-cover instance and
/// maps a found cover back to a completed grid.
pub mod solver;
