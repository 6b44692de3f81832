#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knuth's Algorithm X: recursive backtracking over a dancing-links matrix.
//!
//! The solver owns a [`Matrix`] and searches for one exact cover, a set of
//! candidate rows touching every column exactly once. The search is plain
//! depth-first recursion: pick a column with the configured
//! [`ColumnSelection`] heuristic, cover it, try each of its candidate rows in
//! turn (covering the row's other columns, recursing, uncovering), and
//! backtrack when a level runs out of candidates. The first full cover found
//! is returned; no enumeration.
//!
//! Cover and uncover calls are strictly paired on every code path, including
//! the early return on success, so the matrix is back in its pre-search state
//! when [`Solver::solve`] returns. Recursion depth is bounded by the number
//! of columns, so stack usage is predictable.

use crate::dlx::column_selection::{ColumnSelection, MinCount};
use crate::dlx::matrix::Matrix;
use smallvec::SmallVec;
use std::marker::PhantomData;

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate rows tried across all levels.
    pub decisions: usize,
    /// Candidate rows that had to be undone.
    pub backtracks: usize,
    /// Deepest recursion level reached.
    pub max_depth: usize,
}

/// An exact-cover solver over a dancing-links [`Matrix`].
///
/// Construct with [`Solver::new`], optionally preselect forced rows with
/// [`Solver::assume`], then call [`Solver::solve`] once.
#[derive(Debug, Clone)]
pub struct Solver<C: ColumnSelection = MinCount> {
    matrix: Matrix,
    solution: Vec<usize>,
    assumed: usize,
    stats: SearchStats,
    conflicting: bool,
    _selection: PhantomData<C>,
}

impl<C: ColumnSelection> Solver<C> {
    /// Creates a solver for `matrix`.
    #[must_use]
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            solution: Vec::new(),
            assumed: 0,
            stats: SearchStats::default(),
            conflicting: false,
            _selection: PhantomData,
        }
    }

    /// Preselects a candidate row as part of the solution, before search.
    ///
    /// This is how externally-forced choices (Sudoku clues) enter the solver:
    /// all of the row's columns are covered and the row is recorded as
    /// chosen. Returns `false` when the row does not exist in the matrix or
    /// any of its columns is already covered, i.e. the assumption
    /// contradicts an earlier one; in that case the matrix is left
    /// untouched and [`Solver::solve`] will report failure.
    pub fn assume(&mut self, row: usize) -> bool {
        if self.conflicting {
            return false;
        }

        let Some(entry) = self.matrix.row_entry(row) else {
            self.conflicting = true;
            return false;
        };

        let mut columns: SmallVec<[usize; 4]> = SmallVec::new();
        let mut j = entry;
        loop {
            columns.push(self.matrix.column_of(j));
            j = self.matrix.right(j);
            if j == entry {
                break;
            }
        }

        if columns.iter().any(|&c| !self.matrix.is_active(c)) {
            self.conflicting = true;
            return false;
        }

        for &column in &columns {
            self.matrix.cover(column);
        }
        self.solution.push(row);
        self.assumed += 1;
        true
    }

    /// Runs the search and returns the chosen row identifiers in selection
    /// order (assumed rows first), or `None` if no exact cover exists from
    /// the current state.
    ///
    /// On return the matrix is restored to its pre-search (post-assumption)
    /// state, whether or not a cover was found.
    pub fn solve(&mut self) -> Option<Vec<usize>> {
        if self.conflicting {
            return None;
        }
        if self.search(0) {
            Some(self.solution.clone())
        } else {
            None
        }
    }

    /// One level of Algorithm X.
    fn search(&mut self, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        // No active columns left: every constraint is covered exactly once.
        let Some(column) = C::choose(&self.matrix) else {
            return true;
        };

        // A zero-count column yields no candidates below and backtracks
        // straight away.
        self.matrix.cover(column);

        let head = self.matrix.head_of(column);
        let mut found = false;
        let mut r = self.matrix.down(head);
        while r != head && !found {
            self.stats.decisions += 1;
            self.solution.push(self.matrix.row_of(r));

            let mut j = self.matrix.right(r);
            while j != r {
                let other = self.matrix.column_of(j);
                self.matrix.cover(other);
                j = self.matrix.right(j);
            }

            found = self.search(depth + 1);

            // Undo in the reverse of the cover order regardless of the
            // outcome; a found solution is already recorded above.
            let mut j = self.matrix.left(r);
            while j != r {
                let other = self.matrix.column_of(j);
                self.matrix.uncover(other);
                j = self.matrix.left(j);
            }

            if !found {
                self.solution.pop();
                self.stats.backtracks += 1;
                r = self.matrix.down(r);
            }
        }

        self.matrix.uncover(column);
        found
    }

    /// The number of rows preselected via [`Solver::assume`].
    #[must_use]
    pub fn assumed(&self) -> usize {
        self.assumed
    }

    /// Search counters for the last [`Solver::solve`] call.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}
