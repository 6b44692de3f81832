#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as an exact-cover problem.
//!
//! A classic 9x9 Sudoku is four families of 81 constraints: every cell is
//! filled, every row contains each value once, every column contains each
//! value once, and every box contains each value once. That gives 324
//! columns in the exact-cover matrix. Each of the 729 `(row, col, value)` candidates
//! satisfies exactly one constraint from each family, so every candidate row
//! of the matrix has exactly four cells.
//!
//! This module owns the bookkeeping around that encoding: grid parsing and
//! validation, the fixed matrix construction, preselecting the puzzle's
//! clues, decoding a found cover back into a grid, and verifying a solved
//! grid against the Sudoku rules.

use crate::dlx::column_selection::{ColumnSelection, MinCount};
use crate::dlx::matrix::Matrix;
use crate::dlx::solver::Solver;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt;
use std::path::Path;

/// Side length of the grid.
pub const SIZE: usize = 9;

/// Side length of a box.
pub const BOX: usize = 3;

/// Number of cells in the grid.
pub const CELLS: usize = SIZE * SIZE;

/// Number of exact-cover columns: cell, row-value, column-value and
/// box-value constraints, 81 of each.
pub const COLUMNS: usize = 4 * CELLS;

/// Number of candidate rows: one per `(row, col, value)` triple.
pub const CANDIDATE_ROWS: usize = SIZE * SIZE * SIZE;

/// The Wikipedia example puzzle; solvable with a unique solution.
pub const EXAMPLE_EASY: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// The unique solution of [`EXAMPLE_EASY`].
pub const EXAMPLE_EASY_SOLVED: [[usize; 9]; 9] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

/// A sparsely-clued puzzle, used to give the benchmarks something to chew
/// on.
pub const EXAMPLE_HARD: [[usize; 9]; 9] = [
    [0, 7, 0, 4, 8, 0, 1, 3, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 5, 6, 0, 0, 8, 0],
    [0, 6, 0, 0, 0, 8, 0, 7, 0],
    [0, 4, 1, 0, 0, 6, 0, 0, 0],
    [0, 0, 8, 0, 0, 0, 0, 1, 0],
    [0, 9, 0, 3, 0, 0, 2, 0, 8],
    [0, 0, 5, 0, 0, 2, 0, 0, 0],
    [4, 0, 0, 0, 7, 0, 5, 0, 0],
];

/// [`EXAMPLE_EASY`] with a second 5 planted in the first row; directly
/// contradictory.
pub const EXAMPLE_UNSOLVABLE: [[usize; 9]; 9] = [
    [5, 5, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A 9x9 Sudoku grid; `0` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid(Vec<Vec<usize>>);

impl Grid {
    /// Wraps a grid, validating its shape and value range.
    ///
    /// # Errors
    ///
    /// If the grid is not 9x9 or a cell holds a value above 9. Logical
    /// contradictions between clues are not checked here; those surface as
    /// an unsolvable puzzle.
    pub fn new(cells: Vec<Vec<usize>>) -> Result<Self, String> {
        if cells.len() != SIZE {
            return Err(format!("expected {SIZE} rows, found {}", cells.len()));
        }
        for (r, row) in cells.iter().enumerate() {
            if row.len() != SIZE {
                return Err(format!(
                    "expected {SIZE} cells in row {r}, found {}",
                    row.len()
                ));
            }
            if let Some(&value) = row.iter().find(|&&value| value > SIZE) {
                return Err(format!("value {value} out of range in row {r}"));
            }
        }
        Ok(Self(cells))
    }

    /// The value at `(row, col)`, `0` if empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.0[row][col]
    }

    /// Iterates all cells as `(row, col, value)`, including empty ones.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &v)| (r, c, v)))
    }

    /// The number of filled cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.cells().filter(|&(_, _, v)| v != 0).count()
    }
}

impl From<[[usize; 9]; 9]> for Grid {
    fn from(cells: [[usize; 9]; 9]) -> Self {
        Self(cells.iter().map(|row| row.to_vec()).collect())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r % BOX == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            let rendered = row
                .chunks(BOX)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&v| if v == 0 { ".".into() } else { v.to_string() })
                        .join(" ")
                })
                .join(" | ");
            writeln!(f, "| {rendered} |")?;
        }
        write!(f, "+-------+-------+-------+")
    }
}

/// The dense candidate-row identifier for placing `value` at
/// `(row, col)`. Rows are numbered `81*row + 9*col + (value - 1)`.
#[must_use]
pub const fn candidate_row(row: usize, col: usize, value: usize) -> usize {
    CELLS * row + SIZE * col + (value - 1)
}

/// Inverse of [`candidate_row`].
#[must_use]
pub const fn decode_candidate(id: usize) -> (usize, usize, usize) {
    (id / CELLS, (id / SIZE) % SIZE, id % SIZE + 1)
}

/// The four constraint columns the candidate `(row, col, value)`
/// satisfies: cell filled, row has value, column has value, box has value.
#[must_use]
pub const fn constraint_columns(row: usize, col: usize, value: usize) -> [usize; 4] {
    let cell = SIZE * row + col;
    let row_value = CELLS + SIZE * row + (value - 1);
    let col_value = 2 * CELLS + SIZE * col + (value - 1);
    let box_value = 3 * CELLS + SIZE * (BOX * (row / BOX) + col / BOX) + (value - 1);
    [cell, row_value, col_value, box_value]
}

/// A Sudoku puzzle to be solved via exact cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    /// The starting grid; clues are the non-zero cells.
    pub grid: Grid,
}

impl Sudoku {
    /// Wraps a starting grid.
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Builds the full 324-column, 729-row constraint matrix. The matrix is
    /// clue-independent; clues enter via [`Sudoku::apply_clues`].
    #[must_use]
    pub fn to_matrix() -> Matrix {
        let names = (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| format!("cell r{r}c{c}")))
            .chain((0..SIZE).flat_map(|r| (1..=SIZE).map(move |v| format!("row r{r} has {v}"))))
            .chain((0..SIZE).flat_map(|c| (1..=SIZE).map(move |v| format!("col c{c} has {v}"))))
            .chain((0..SIZE).flat_map(|b| (1..=SIZE).map(move |v| format!("box b{b} has {v}"))))
            .collect_vec();

        let mut matrix = Matrix::with_names(names);
        for row in 0..SIZE {
            for col in 0..SIZE {
                for value in 1..=SIZE {
                    matrix.add_row(
                        candidate_row(row, col, value),
                        constraint_columns(row, col, value),
                    );
                }
            }
        }
        matrix
    }

    /// Preselects the candidate row of every clue, simulating the search
    /// having already chosen them. Returns `false` when a clue contradicts
    /// an earlier one (its constraints are already covered), in which case
    /// the solver will report the puzzle unsolvable.
    pub fn apply_clues<C: ColumnSelection>(&self, solver: &mut Solver<C>) -> bool {
        self.grid
            .cells()
            .filter(|&(_, _, v)| v != 0)
            .all(|(r, c, v)| solver.assume(candidate_row(r, c, v)))
    }

    /// Decodes chosen candidate rows back into a grid.
    #[must_use]
    pub fn decode(&self, rows: &[usize]) -> Grid {
        let mut cells = vec![vec![0; SIZE]; SIZE];
        for &id in rows {
            let (r, c, v) = decode_candidate(id);
            cells[r][c] = v;
        }
        Grid(cells)
    }

    /// Solves the puzzle, returning the completed grid or `None` when no
    /// solution exists (including contradictory clues). Convenience wrapper
    /// over the matrix/solver pipeline with the default heuristic.
    #[must_use]
    pub fn solve(&self) -> Option<Grid> {
        let mut solver: Solver<MinCount> = Solver::new(Self::to_matrix());
        if !self.apply_clues(&mut solver) {
            return None;
        }
        solver.solve().map(|rows| self.decode(&rows))
    }
}

impl From<Grid> for Sudoku {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}

impl fmt::Display for Sudoku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.fmt(f)
    }
}

/// Parses a grid from text: 81 cell characters, where `1`..`9` are clues
/// and `0` or `.` mark empty cells. Whitespace and the decoration
/// characters `|`, `-` and `+` are ignored, so both bare 81-character
/// strings and the output of [`Grid`]'s `Display` parse back.
///
/// # Errors
///
/// If the input contains an unexpected character or does not hold exactly
/// 81 cells.
pub fn parse_grid(input: &str) -> Result<Grid, String> {
    let mut cells = Vec::with_capacity(CELLS);
    for ch in input.chars() {
        match ch {
            '0' | '.' => cells.push(0),
            '1'..='9' => cells.push(ch as usize - '0' as usize),
            '|' | '-' | '+' => {}
            ch if ch.is_whitespace() => {}
            ch => return Err(format!("unexpected character {ch:?} in grid")),
        }
    }

    if cells.len() != CELLS {
        return Err(format!("expected {CELLS} cells, found {}", cells.len()));
    }

    Grid::new(cells.chunks(SIZE).map(<[usize]>::to_vec).collect_vec())
}

/// Parses a Sudoku puzzle file. See [`parse_grid`] for the format.
///
/// # Errors
///
/// If the file cannot be read or its contents do not parse.
pub fn parse_sudoku_file(path: &Path) -> Result<Sudoku, String> {
    let input = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_grid(&input).map(Sudoku::new)
}

/// Checks a completed grid against the Sudoku rules: every row, column and
/// box contains each of `1..=9` exactly once.
#[must_use]
pub fn verify(grid: &Grid) -> bool {
    let unit_ok = |cells: &[usize]| {
        let distinct: FxHashSet<usize> = cells.iter().copied().collect();
        distinct.len() == SIZE && cells.iter().all(|&v| (1..=SIZE).contains(&v))
    };

    let rows = (0..SIZE).map(|r| (0..SIZE).map(|c| grid.get(r, c)).collect_vec());
    let cols = (0..SIZE).map(|c| (0..SIZE).map(|r| grid.get(r, c)).collect_vec());
    let boxes = (0..SIZE).map(|b| {
        (0..SIZE)
            .map(|i| grid.get(BOX * (b / BOX) + i / BOX, BOX * (b % BOX) + i % BOX))
            .collect_vec()
    });

    rows.chain(cols).chain(boxes).all(|unit| unit_ok(&unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_row_round_trip() {
        for row in 0..SIZE {
            for col in 0..SIZE {
                for value in 1..=SIZE {
                    let id = candidate_row(row, col, value);
                    assert!(id < CANDIDATE_ROWS);
                    assert_eq!(decode_candidate(id), (row, col, value));
                }
            }
        }
    }

    #[test]
    fn test_constraint_columns_families() {
        for row in 0..SIZE {
            for col in 0..SIZE {
                for value in 1..=SIZE {
                    let [cell, row_value, col_value, box_value] =
                        constraint_columns(row, col, value);
                    assert!(cell < CELLS);
                    assert!((CELLS..2 * CELLS).contains(&row_value));
                    assert!((2 * CELLS..3 * CELLS).contains(&col_value));
                    assert!((3 * CELLS..COLUMNS).contains(&box_value));
                }
            }
        }
    }

    #[test]
    fn test_matrix_shape() {
        let matrix = Sudoku::to_matrix();
        assert_eq!(matrix.num_columns(), COLUMNS);
        // Every constraint starts with 9 candidates.
        assert!((0..COLUMNS).all(|column| matrix.count(column) == SIZE));
        assert_eq!(matrix.live_incidences(), 4 * CANDIDATE_ROWS);
        assert!(matrix.links_consistent());
    }

    #[test]
    fn test_solves_easy_to_unique_solution() {
        let sudoku = Sudoku::new(Grid::from(EXAMPLE_EASY));
        let solved = sudoku.solve().expect("puzzle is solvable");
        assert_eq!(solved, Grid::from(EXAMPLE_EASY_SOLVED));
    }

    #[test]
    fn test_solves_hard_puzzle() {
        let sudoku = Sudoku::new(Grid::from(EXAMPLE_HARD));
        let solved = sudoku.solve().expect("puzzle is solvable");
        assert!(verify(&solved));
        // The solution extends the clues.
        for (r, c, v) in sudoku.grid.cells().filter(|&(_, _, v)| v != 0) {
            assert_eq!(solved.get(r, c), v);
        }
    }

    #[test]
    fn test_contradictory_clues_report_failure() {
        let sudoku = Sudoku::new(Grid::from(EXAMPLE_UNSOLVABLE));
        assert_eq!(sudoku.solve(), None);
    }

    #[test]
    fn test_already_solved_grid_needs_no_search() {
        let sudoku = Sudoku::new(Grid::from(EXAMPLE_EASY_SOLVED));
        let mut solver: Solver = Solver::new(Sudoku::to_matrix());
        assert!(sudoku.apply_clues(&mut solver));
        assert_eq!(solver.assumed(), CELLS);

        let rows = solver.solve().expect("grid is already complete");
        assert_eq!(rows.len(), CELLS);
        assert_eq!(solver.stats().decisions, 0);
        assert_eq!(sudoku.decode(&rows), Grid::from(EXAMPLE_EASY_SOLVED));
    }

    #[test]
    fn test_grid_validation() {
        assert!(Grid::new(vec![vec![0; 9]; 9]).is_ok());
        assert!(Grid::new(vec![vec![0; 9]; 8]).is_err());
        assert!(Grid::new(vec![vec![0; 8]; 9]).is_err());
        let mut cells = vec![vec![0; 9]; 9];
        cells[4][4] = 10;
        assert!(Grid::new(cells).is_err());
    }

    #[test]
    fn test_parse_grid_dots_and_digits() {
        let input =
            "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grid = parse_grid(input).expect("valid grid");
        assert_eq!(grid, Grid::from(EXAMPLE_EASY));
    }

    #[test]
    fn test_parse_grid_accepts_rendered_output() {
        let grid = Grid::from(EXAMPLE_EASY);
        let reparsed = parse_grid(&grid.to_string()).expect("display output parses");
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn test_parse_grid_errors() {
        assert!(parse_grid("123").is_err());
        assert!(parse_grid(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_verify_accepts_solution_rejects_corruption() {
        let solved = Grid::from(EXAMPLE_EASY_SOLVED);
        assert!(verify(&solved));

        let mut corrupted = EXAMPLE_EASY_SOLVED;
        corrupted[0][0] = corrupted[0][1];
        assert!(!verify(&Grid::from(corrupted)));

        assert!(!verify(&Grid::from(EXAMPLE_EASY)));
    }

    #[test]
    fn test_clue_count() {
        assert_eq!(Grid::from(EXAMPLE_EASY).clue_count(), 30);
        assert_eq!(Grid::from(EXAMPLE_EASY_SOLVED).clue_count(), CELLS);
    }
}
