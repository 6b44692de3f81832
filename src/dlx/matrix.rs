#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The toroidal sparse matrix underlying the dancing-links technique.
//!
//! An exact-cover instance is a 0/1 matrix; a solution is a subset of its rows
//! such that every column contains exactly one `1` among the chosen rows. This
//! module represents that matrix sparsely: one node per `1`, with every node
//! linked into a circular doubly-linked list for its row and another for its
//! column. A header node per column tracks how many cells are still live, and
//! a root header anchors the circular list of column headers.
//!
//! Links are not pointers. All nodes live in a single `Vec` arena and the
//! up/down/left/right "links" are indices into that arena, which sidesteps the
//! ownership cycles a pointer-based rendition would create and makes snapshot
//! comparison in tests a plain `==`.
//!
//! The two central operations are [`Matrix::cover`] and [`Matrix::uncover`].
//! Covering a column unlinks it from the header list and unlinks every row
//! that intersects it from all *other* columns; uncovering performs the exact
//! inverse, walking the same cells in reverse order. Neither operation ever
//! deallocates or rewrites a removed node's own links, which is what makes
//! the restoration exact.

use smallvec::SmallVec;

/// Arena index of the root header. The root is always node zero.
const ROOT: usize = 0;

/// A single cell of the sparse matrix, or a column/root header.
///
/// Headers reuse the same layout: the root and the column headers carry no
/// row membership, so their `row` field is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    /// Index of the previous cell in the same column.
    up: usize,
    /// Index of the next cell in the same column.
    down: usize,
    /// Index of the previous cell in the same row.
    left: usize,
    /// Index of the next cell in the same row.
    right: usize,
    /// The column this cell belongs to, as an external column identifier.
    column: usize,
    /// The candidate-row identifier this cell belongs to.
    row: usize,
}

/// A dancing-links matrix for an exact-cover instance.
///
/// The column set is fixed at construction; candidate rows are added with
/// [`Matrix::add_row`]. After construction the topology never changes; only
/// the active/inactive status of nodes does, via [`Matrix::cover`] and
/// [`Matrix::uncover`].
///
/// Columns are addressed by dense identifiers `0..num_columns`, rows by the
/// caller-supplied row identifiers passed to `add_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// The node arena. Node 0 is the root header, nodes `1..=num_columns`
    /// are the column headers, and cells follow in insertion order.
    nodes: Vec<Node>,
    /// Live cell count per column.
    counts: Vec<usize>,
    /// Human-readable column names, for diagnostics.
    names: Vec<String>,
    /// Maps a row identifier to one of its cells (the first inserted).
    rows: Vec<Option<usize>>,
}

impl Matrix {
    /// Creates a matrix with `num_columns` columns and no rows.
    ///
    /// Columns are named `column 0`, `column 1`, ... in order.
    #[must_use]
    pub fn new(num_columns: usize) -> Self {
        Self::with_names((0..num_columns).map(|i| format!("column {i}")).collect())
    }

    /// Creates a matrix with one column per entry of `names`.
    #[must_use]
    pub fn with_names(names: Vec<String>) -> Self {
        let num_columns = names.len();
        let mut nodes = Vec::with_capacity(num_columns + 1);

        // The root and the headers form one circular horizontal list.
        for i in 0..=num_columns {
            nodes.push(Node {
                up: i,
                down: i,
                left: if i == 0 { num_columns } else { i - 1 },
                right: if i == num_columns { 0 } else { i + 1 },
                column: i.wrapping_sub(1),
                row: usize::MAX,
            });
        }

        Self {
            nodes,
            counts: vec![0; num_columns],
            names,
            rows: Vec::new(),
        }
    }

    /// The number of columns this matrix was built with, active or not.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.counts.len()
    }

    /// The live cell count of `column`.
    #[must_use]
    pub fn count(&self, column: usize) -> usize {
        self.counts[column]
    }

    /// The name of `column`.
    #[must_use]
    pub fn name(&self, column: usize) -> &str {
        &self.names[column]
    }

    /// Whether `column` is still linked into the header list.
    ///
    /// Covering a column splices its neighbours together but leaves the
    /// header's own links untouched, so the header is active exactly when its
    /// left neighbour still points back at it.
    #[must_use]
    pub fn is_active(&self, column: usize) -> bool {
        let head = column + 1;
        self.nodes[self.nodes[head].left].right == head
    }

    /// Whether any column remains to be covered.
    #[must_use]
    pub fn is_fully_covered(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Iterates the active columns in header-list order, starting from the
    /// root's right neighbour. This order defines the tie-break for
    /// column-selection heuristics.
    pub fn active_columns(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.nodes[ROOT].right), |&head| {
            Some(self.nodes[head].right)
        })
        .take_while(|&head| head != ROOT)
        .map(|head| head - 1)
    }

    /// Adds a candidate row identified by `row`, incident to the given
    /// columns.
    ///
    /// One cell is created per column, the cells are linked circularly as a
    /// row, and each cell is spliced into the bottom of its column's vertical
    /// list. Row identifiers need not be contiguous but each may only be
    /// added once.
    ///
    /// # Panics
    ///
    /// If `columns` is empty, names a column out of range, or `row` was
    /// already added.
    pub fn add_row<I>(&mut self, row: usize, columns: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let columns: SmallVec<[usize; 4]> = columns.into_iter().collect();
        assert!(!columns.is_empty(), "candidate row {row} has no columns");

        if self.rows.len() <= row {
            self.rows.resize(row + 1, None);
        }
        assert!(self.rows[row].is_none(), "candidate row {row} added twice");

        let first = self.nodes.len();
        let len = columns.len();

        for (i, &column) in columns.iter().enumerate() {
            assert!(
                column < self.num_columns(),
                "column {column} out of range for row {row}"
            );

            let head = column + 1;
            let idx = self.nodes.len();
            let up = self.nodes[head].up;

            self.nodes.push(Node {
                up,
                down: head,
                left: first + (i + len - 1) % len,
                right: first + (i + 1) % len,
                column,
                row,
            });

            self.nodes[up].down = idx;
            self.nodes[head].up = idx;
            self.counts[column] += 1;
        }

        self.rows[row] = Some(first);
    }

    /// Removes `column` from the header list and unlinks every cell that
    /// shares a row with a cell of `column` from its own column's vertical
    /// list, decrementing that column's live count.
    ///
    /// The removed nodes keep their own links, so the operation is exactly
    /// reversible by [`Matrix::uncover`] as long as cover/uncover calls nest
    /// like a stack.
    pub fn cover(&mut self, column: usize) {
        let head = column + 1;

        let (left, right) = (self.nodes[head].left, self.nodes[head].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut i = self.nodes[head].down;
        while i != head {
            let mut j = self.nodes[i].right;
            while j != i {
                let (up, down) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.counts[self.nodes[j].column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// The exact inverse of [`Matrix::cover`]: relinks every cell removed by
    /// the matching cover call, walking bottom-to-top and right-to-left to
    /// mirror the removal order, then restores the header itself.
    pub fn uncover(&mut self, column: usize) {
        let head = column + 1;

        let mut i = self.nodes[head].up;
        while i != head {
            let mut j = self.nodes[i].left;
            while j != i {
                self.counts[self.nodes[j].column] += 1;
                let (up, down) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[up].down = j;
                self.nodes[down].up = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let (left, right) = (self.nodes[head].left, self.nodes[head].right);
        self.nodes[left].right = head;
        self.nodes[right].left = head;
    }

    /// Checks the link-symmetry invariant over the root, every active header
    /// and every active cell: `left.right == self`, `right.left == self`, and
    /// likewise vertically. Also checks each live count against the actual
    /// length of the column's vertical list.
    ///
    /// Intended for tests and debug output; the solver never needs it.
    #[must_use]
    pub fn links_consistent(&self) -> bool {
        let symmetric = |idx: usize| {
            let n = &self.nodes[idx];
            self.nodes[n.left].right == idx
                && self.nodes[n.right].left == idx
                && self.nodes[n.up].down == idx
                && self.nodes[n.down].up == idx
        };

        if !symmetric(ROOT) {
            return false;
        }

        for column in self.active_columns() {
            let head = column + 1;
            if !symmetric(head) {
                return false;
            }

            let mut cells = 0;
            let mut i = self.nodes[head].down;
            while i != head {
                if !symmetric(i) {
                    return false;
                }
                cells += 1;
                i = self.nodes[i].down;
            }
            if cells != self.counts[column] {
                return false;
            }
        }

        true
    }

    /// The number of (row, column) incidences among currently-active rows,
    /// counted by walking every active column. Equals the sum of live counts
    /// whenever the matrix is outside a cover/uncover call.
    #[must_use]
    pub fn live_incidences(&self) -> usize {
        self.active_columns()
            .map(|column| {
                let head = column + 1;
                let mut cells = 0;
                let mut i = self.nodes[head].down;
                while i != head {
                    cells += 1;
                    i = self.nodes[i].down;
                }
                cells
            })
            .sum()
    }

    /// The sum of live counts over all active columns.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.active_columns().map(|column| self.counts[column]).sum()
    }

    // Low-level traversal for the search algorithm. These deal in arena
    // indices and are deliberately not part of the public surface.

    pub(crate) fn head_of(&self, column: usize) -> usize {
        column + 1
    }

    pub(crate) fn row_entry(&self, row: usize) -> Option<usize> {
        self.rows.get(row).copied().flatten()
    }

    pub(crate) fn down(&self, idx: usize) -> usize {
        self.nodes[idx].down
    }

    pub(crate) fn left(&self, idx: usize) -> usize {
        self.nodes[idx].left
    }

    pub(crate) fn right(&self, idx: usize) -> usize {
        self.nodes[idx].right
    }

    pub(crate) fn column_of(&self, idx: usize) -> usize {
        self.nodes[idx].column
    }

    pub(crate) fn row_of(&self, idx: usize) -> usize {
        self.nodes[idx].row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_matrix() -> Matrix {
        // The example instance from Knuth's paper: 7 columns, 6 rows,
        // unique exact cover {0, 3, 4}.
        let mut matrix = Matrix::new(7);
        matrix.add_row(0, [2, 4, 5]);
        matrix.add_row(1, [0, 3, 6]);
        matrix.add_row(2, [1, 2, 5]);
        matrix.add_row(3, [0, 3]);
        matrix.add_row(4, [1, 6]);
        matrix.add_row(5, [3, 4, 6]);
        matrix
    }

    #[test]
    fn test_empty_matrix_is_fully_covered() {
        let matrix = Matrix::new(0);
        assert!(matrix.is_fully_covered());
        assert_eq!(matrix.active_columns().count(), 0);
        assert!(matrix.links_consistent());
    }

    #[test]
    fn test_construction_counts_and_links() {
        let matrix = small_matrix();
        assert_eq!(matrix.num_columns(), 7);
        assert!(matrix.links_consistent());
        assert_eq!(matrix.count(0), 2);
        assert_eq!(matrix.count(3), 3);
        assert_eq!(matrix.count(6), 3);
        assert_eq!(matrix.total_count(), 16);
        assert_eq!(matrix.live_incidences(), 16);
        assert_eq!(
            matrix.active_columns().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_cover_removes_column_and_conflicting_rows() {
        let mut matrix = small_matrix();
        matrix.cover(0);

        assert!(!matrix.is_active(0));
        assert!(matrix.links_consistent());
        assert_eq!(
            matrix.active_columns().collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );

        // Rows 1 and 3 intersect column 0, so their cells vanish from
        // columns 3 and 6.
        assert_eq!(matrix.count(3), 1);
        assert_eq!(matrix.count(6), 2);
        assert_eq!(matrix.total_count(), matrix.live_incidences());
    }

    #[test]
    fn test_cover_then_uncover_is_identity() {
        let matrix = small_matrix();
        for column in 0..matrix.num_columns() {
            let mut covered = matrix.clone();
            covered.cover(column);
            covered.uncover(column);
            assert_eq!(covered, matrix, "cover/uncover of column {column}");
        }
    }

    #[test]
    fn test_nested_cover_uncover_restores_exactly() {
        let pristine = small_matrix();
        let mut matrix = small_matrix();

        matrix.cover(0);
        matrix.cover(4);
        matrix.cover(1);
        assert!(matrix.links_consistent());
        assert_eq!(matrix.total_count(), matrix.live_incidences());
        matrix.uncover(1);
        matrix.uncover(4);
        matrix.uncover(0);

        assert_eq!(matrix, pristine);
    }

    #[test]
    fn test_count_conservation_under_cover() {
        let mut matrix = small_matrix();
        matrix.cover(3);
        assert_eq!(matrix.total_count(), matrix.live_incidences());
        matrix.cover(1);
        assert_eq!(matrix.total_count(), matrix.live_incidences());
    }

    #[test]
    fn test_is_active_tracks_cover_state() {
        let mut matrix = small_matrix();
        assert!(matrix.is_active(2));
        matrix.cover(2);
        assert!(!matrix.is_active(2));
        matrix.uncover(2);
        assert!(matrix.is_active(2));
    }

    #[test]
    fn test_column_with_no_rows_has_zero_count() {
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, [0, 1]);
        assert_eq!(matrix.count(2), 0);
        assert!(matrix.is_active(2));
    }

    #[test]
    fn test_named_columns() {
        let matrix = Matrix::with_names(vec!["first".into(), "second".into()]);
        assert_eq!(matrix.name(0), "first");
        assert_eq!(matrix.name(1), "second");
    }

    #[test]
    #[should_panic(expected = "has no columns")]
    fn test_empty_row_panics() {
        let mut matrix = Matrix::new(2);
        matrix.add_row(0, []);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_column_panics() {
        let mut matrix = Matrix::new(2);
        matrix.add_row(0, [5]);
    }

    #[test]
    #[should_panic(expected = "added twice")]
    fn test_duplicate_row_id_panics() {
        let mut matrix = Matrix::new(2);
        matrix.add_row(0, [0]);
        matrix.add_row(0, [1]);
    }
}
