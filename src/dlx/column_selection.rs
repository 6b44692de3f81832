#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Column-selection heuristics for the Algorithm X search.
//!
//! At every search level the solver picks one uncovered column to branch on.
//! Any active column is correct; which one is picked only changes the shape
//! of the search tree. The trait seam exists so the heuristics can be
//! compared in the benchmarks. [`MinCount`] is the one that makes
//! Sudoku-scale instances tractable and is the solver's default.

use crate::dlx::matrix::Matrix;

/// Strategy for choosing the next column to branch on.
///
/// `choose` returns `None` exactly when no active column remains, which is
/// the search's success terminal.
pub trait ColumnSelection {
    /// Picks an active column of `matrix`, or `None` if all are covered.
    fn choose(matrix: &Matrix) -> Option<usize>;
}

/// Minimum-remaining-values: the active column with the fewest live cells,
/// ties broken by whichever is encountered first scanning right from the
/// root.
///
/// A column may be chosen with a live count of zero; that level then has no
/// branches to try and backtracks immediately, which is exactly the early
/// pruning the heuristic exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinCount;

impl ColumnSelection for MinCount {
    fn choose(matrix: &Matrix) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for column in matrix.active_columns() {
            let count = matrix.count(column);
            if best.is_none_or(|(_, best_count)| count < best_count) {
                best = Some((column, count));
            }
        }
        best.map(|(column, _)| column)
    }
}

/// Takes the first active column, ignoring live counts.
///
/// Correct but slow on anything non-trivial; kept as the baseline the
/// benchmarks measure [`MinCount`] against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstActive;

impl ColumnSelection for FirstActive {
    fn choose(matrix: &Matrix) -> Option<usize> {
        matrix.active_columns().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_none_when_fully_covered() {
        let matrix = Matrix::new(0);
        assert_eq!(MinCount::choose(&matrix), None);
        assert_eq!(FirstActive::choose(&matrix), None);
    }

    #[test]
    fn test_min_count_picks_smallest_column() {
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, [0, 1]);
        matrix.add_row(1, [0, 2]);
        matrix.add_row(2, [0]);
        // Counts: column 0 -> 3, column 1 -> 1, column 2 -> 1.
        assert_eq!(MinCount::choose(&matrix), Some(1));
    }

    #[test]
    fn test_min_count_tie_break_is_first_from_root() {
        let mut matrix = Matrix::new(4);
        matrix.add_row(0, [0, 1]);
        matrix.add_row(1, [0, 2]);
        matrix.add_row(2, [0, 3]);
        // Columns 1, 2 and 3 all have count 1; the scan from the root
        // reaches column 1 first.
        assert_eq!(MinCount::choose(&matrix), Some(1));
    }

    #[test]
    fn test_min_count_tie_break_after_cover() {
        let mut matrix = Matrix::new(4);
        matrix.add_row(0, [0, 1]);
        matrix.add_row(1, [1, 2]);
        matrix.add_row(2, [2, 3]);
        matrix.add_row(3, [3, 0]);
        matrix.cover(0);
        // Covering column 0 drops rows 0 and 3, leaving columns 1 and 3
        // tied at count 1 with column 2 at 2; the scan reaches 1 first.
        assert_eq!(MinCount::choose(&matrix), Some(1));
    }

    #[test]
    fn test_min_count_returns_zero_count_column() {
        let mut matrix = Matrix::new(2);
        matrix.add_row(0, [0]);
        assert_eq!(MinCount::choose(&matrix), Some(1));
        assert_eq!(matrix.count(1), 0);
    }

    #[test]
    fn test_first_active_ignores_counts() {
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, [0, 1]);
        matrix.add_row(1, [0, 2]);
        assert_eq!(FirstActive::choose(&matrix), Some(0));
    }
}
