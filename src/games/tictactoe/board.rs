//! 3x3 board and line evaluation.
//!
//! Cells are indexed row-major:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Centre cell index.
pub const CENTER: usize = 4;

/// Corner cell indices.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Opponent,
}

/// Cell indices, sized for a full board without allocating.
pub type CellList = SmallVec<[usize; CELL_COUNT]>;

/// Board contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cells (tests, restored sessions).
    #[must_use]
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Get a cell. Out-of-range indices read as `None`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// All cells in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Copy of this board with `index` set to `mark`.
    ///
    /// Callers validate `index` first.
    #[must_use]
    pub(crate) fn with(mut self, index: usize, mark: Cell) -> Self {
        self.cells[index] = mark;
        self
    }

    /// Empty cell indices, ascending.
    #[must_use]
    pub fn empty_cells(&self) -> CellList {
        (0..CELL_COUNT)
            .filter(|&i| self.cells[i] == Cell::Empty)
            .collect()
    }

    /// Is every cell taken?
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// First line holding three identical marks, with the mark.
    #[must_use]
    pub fn winner(&self) -> Option<(Cell, [usize; 3])> {
        LINES.into_iter().find_map(|line @ [a, b, c]| {
            let mark = self.cells[a];
            (mark != Cell::Empty && mark == self.cells[b] && mark == self.cells[c])
                .then_some((mark, line))
        })
    }

    /// Lowest empty cell that would give `mark` three in a row.
    #[must_use]
    pub fn completing_move(&self, mark: Cell) -> Option<usize> {
        self.empty_cells()
            .into_iter()
            .find(|&i| matches!(self.with(i, mark).winner(), Some((m, _)) if m == mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Cell::{Empty as E, Opponent as O, Player as P};

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.empty_cells().len(), 9);
        assert!(!board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut board = Board::new();
            for i in line {
                board = board.with(i, Cell::Player);
            }
            assert_eq!(board.winner(), Some((Cell::Player, line)));
        }
    }

    #[test]
    fn test_full_board_without_winner() {
        let board = Board::from_cells([P, O, P, P, O, O, O, P, P]);
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_completing_move() {
        let board = Board::from_cells([P, P, E, O, O, E, E, E, E]);
        assert_eq!(board.completing_move(Cell::Player), Some(2));
        assert_eq!(board.completing_move(Cell::Opponent), Some(5));
        assert_eq!(Board::new().completing_move(Cell::Player), None);
    }

    #[test]
    fn test_get_out_of_range() {
        assert_eq!(Board::new().get(9), None);
        assert_eq!(Board::new().get(0), Some(Cell::Empty));
    }
}
