#![deny(missing_docs)]
//! This crate solves Sudoku puzzles by reducing them to exact-cover problems
//! and running Knuth's Algorithm X over a dancing-links sparse matrix.
//!
//! The exact-cover core knows nothing about Sudoku; it consumes columns and
//! candidate rows and produces the identifiers of one covering row set:
//!
//! ```
//! use dlx_solver::dlx::matrix::Matrix;
//! use dlx_solver::dlx::solver::Solver;
//!
//! // The instance from Wikipedia's Algorithm X article: rows A..F over
//! // seven columns, with {B, D, F} as the unique exact cover.
//! let mut matrix = Matrix::new(7);
//! matrix.add_row(0, [0, 3, 6]); // A
//! matrix.add_row(1, [0, 3]); // B
//! matrix.add_row(2, [3, 4, 6]); // C
//! matrix.add_row(3, [2, 4, 5]); // D
//! matrix.add_row(4, [1, 2, 5, 6]); // E
//! matrix.add_row(5, [1, 6]); // F
//!
//! let mut solver: Solver = Solver::new(matrix);
//! let mut solution = solver.solve().expect("instance is solvable");
//! solution.sort_unstable();
//! assert_eq!(solution, vec![1, 3, 5]);
//! ```
//!
//! The `sudoku` module is the thin driver on top: it builds the fixed
//! 324-column, 729-row Sudoku matrix, preselects the puzzle's clues, and
//! decodes the chosen rows back into a completed grid.

/// The `dlx` module implements the exact-cover core: the dancing-links
/// matrix, its cover/uncover operations and the backtracking search.
pub mod dlx;

/// The `sudoku` module implements the Sudoku puzzle driver, which encodes a
/// 9x9 grid as an exact-cover instance.
pub mod sudoku;
