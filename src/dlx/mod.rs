#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The exact-cover core: a dancing-links sparse matrix and the Algorithm X
//! search over it. Problem-specific encodings (such as Sudoku's) live
//! outside this module and talk to it purely in terms of columns and
//! candidate rows.

/// Column-selection heuristics for the search.
pub mod column_selection;

/// The toroidal doubly-linked sparse matrix and its cover/uncover operations.
pub mod matrix;

/// The recursive backtracking search for one exact cover.
pub mod solver;
