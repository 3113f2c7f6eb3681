//! The 6 × 9 connect-five grid.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::rules;
use crate::types::{Cell, Column, Disc};

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLUMNS: usize = 9;

/// Connect-five board. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; COLUMNS]; ROWS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    /// Gets the cell at the given row and column, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Drops a disc into a column.
    ///
    /// The disc settles in the lowest empty cell. Returns the row it landed
    /// in, or `None` when the column is already full, in which case the board
    /// is left untouched.
    #[instrument(skip(self), fields(column = column.number()))]
    pub fn drop_disc(&mut self, column: Column, disc: Disc) -> Option<usize> {
        let col = column.index();
        let row = (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())?;
        self.cells[row][col] = Cell::Occupied(disc);
        debug!(row, "Disc landed");
        Some(row)
    }

    /// Returns true if five or more `disc`s line up anywhere on the board.
    #[instrument(skip(self))]
    pub fn check_win(&self, disc: Disc) -> bool {
        rules::win::has_five(self, disc)
    }

    /// Length of the longest run of `disc` on any axis.
    pub fn longest_run(&self, disc: Disc) -> usize {
        rules::win::longest_run(self, disc)
    }

    /// Returns true when every cell holds a disc.
    pub fn is_full(&self) -> bool {
        rules::draw::is_full(self)
    }

    /// Returns true when a disc could still be dropped into the column.
    pub fn has_room(&self, column: Column) -> bool {
        self.cells[0][column.index()].is_empty()
    }

    /// Empties every cell.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; COLUMNS]; ROWS];
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLUMNS]> {
        self.cells.iter()
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `[ ]`, `[R]` or `[B]` per cell, one line per row, top row first.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "[{}]", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
