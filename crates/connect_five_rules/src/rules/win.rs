//! Win detection logic for connect-five.

use crate::board::Board;
use crate::types::{Cell, Disc};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Number of contiguous discs needed to win.
pub const WINNING_LENGTH: usize = 5;

/// A line direction through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Bottom-left to top-right ("/").
    Rising,
    /// Top-left to bottom-right ("\").
    Falling,
}

impl Axis {
    /// (row, column) step taken when walking in the positive direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Rising => (-1, 1),
            Axis::Falling => (1, 1),
        }
    }
}

/// Counts matching discs from (row, col), exclusive, walking by `step`.
///
/// Stops at the first non-matching cell or at the edge. Index 0 is a
/// valid cell and is counted like any other.
fn walk(board: &Board, disc: Disc, row: usize, col: usize, step: (isize, isize)) -> usize {
    let (dr, dc) = step;
    let mut count = 0;
    let (mut r, mut c) = (row as isize + dr, col as isize + dc);
    while r >= 0
        && c >= 0
        && board.get(r as usize, c as usize) == Some(Cell::Occupied(disc))
    {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Length of the run of `disc` passing through (row, col) along `axis`.
///
/// Returns 0 if the cell does not hold `disc`.
pub fn run_through(board: &Board, disc: Disc, row: usize, col: usize, axis: Axis) -> usize {
    if board.get(row, col) != Some(Cell::Occupied(disc)) {
        return 0;
    }
    let (dr, dc) = axis.step();
    1 + walk(board, disc, row, col, (dr, dc)) + walk(board, disc, row, col, (-dr, -dc))
}

/// Length of the longest run of `disc` on the board, on any axis.
#[instrument(skip(board))]
pub fn longest_run(board: &Board, disc: Disc) -> usize {
    occupied_by(board, disc)
        .flat_map(|(row, col)| Axis::iter().map(move |axis| (row, col, axis)))
        .map(|(row, col, axis)| run_through(board, disc, row, col, axis))
        .max()
        .unwrap_or(0)
}

/// Returns true if `disc` has at least [`WINNING_LENGTH`] in a row.
#[instrument(skip(board))]
pub fn has_five(board: &Board, disc: Disc) -> bool {
    occupied_by(board, disc).any(|(row, col)| {
        Axis::iter().any(|axis| run_through(board, disc, row, col, axis) >= WINNING_LENGTH)
    })
}

fn occupied_by(board: &Board, disc: Disc) -> impl Iterator<Item = (usize, usize)> + '_ {
    board.rows().enumerate().flat_map(move |(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == Cell::Occupied(disc))
            .map(move |(col, _)| (row, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{COLUMNS, Column, ROWS};

    fn place(board: &mut Board, disc: Disc, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            board.set(row, col, Cell::Occupied(disc));
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!has_five(&board, Disc::Red));
        assert_eq!(longest_run(&board, Disc::Red), 0);
    }

    #[test]
    fn test_horizontal_five() {
        let mut board = Board::new();
        place(&mut board, Disc::Red, &[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4)]);
        assert!(has_five(&board, Disc::Red));
        assert!(!has_five(&board, Disc::Blue));
    }

    #[test]
    fn test_vertical_five_by_drops() {
        let mut board = Board::new();
        let column = Column::from_one_based(7).unwrap();
        for _ in 0..WINNING_LENGTH {
            board.drop_disc(column, Disc::Blue);
        }
        assert!(board.check_win(Disc::Blue));
    }

    #[test]
    fn test_rising_diagonal_five() {
        let mut board = Board::new();
        place(&mut board, Disc::Red, &[(5, 2), (4, 3), (3, 4), (2, 5), (1, 6)]);
        assert!(has_five(&board, Disc::Red));
    }

    #[test]
    fn test_falling_diagonal_five() {
        let mut board = Board::new();
        place(&mut board, Disc::Blue, &[(1, 4), (2, 5), (3, 6), (4, 7), (5, 8)]);
        assert!(has_five(&board, Disc::Blue));
    }

    #[test]
    fn test_every_five_window_wins() {
        for axis in Axis::iter() {
            let (dr, dc) = axis.step();
            for row in 0..ROWS as isize {
                for col in 0..COLUMNS as isize {
                    let end = (row + dr * 4, col + dc * 4);
                    if end.0 < 0 || end.1 < 0 || end.0 >= ROWS as isize || end.1 >= COLUMNS as isize {
                        continue;
                    }
                    let cells: Vec<(usize, usize)> = (0..5)
                        .map(|i| ((row + dr * i) as usize, (col + dc * i) as usize))
                        .collect();
                    let mut board = Board::new();
                    place(&mut board, Disc::Red, &cells);
                    assert!(has_five(&board, Disc::Red), "{axis:?} from ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_blocked_four_is_not_a_win() {
        let mut board = Board::new();
        place(&mut board, Disc::Red, &[(5, 2), (5, 3), (5, 4), (5, 5)]);
        place(&mut board, Disc::Blue, &[(5, 1), (5, 6)]);
        assert!(!has_five(&board, Disc::Red));
        assert_eq!(longest_run(&board, Disc::Red), 4);
    }

    #[test]
    fn test_four_against_edge_is_not_a_win() {
        let mut board = Board::new();
        place(&mut board, Disc::Blue, &[(0, 0), (1, 0), (2, 0), (3, 0)]);
        place(&mut board, Disc::Red, &[(4, 0)]);
        assert!(!has_five(&board, Disc::Blue));
    }

    #[test]
    fn test_run_touching_low_edges_counts_index_zero() {
        // The only cells of this diagonal are (4,0)..(0,4); both ends sit on
        // index 0 of one axis.
        let mut board = Board::new();
        place(&mut board, Disc::Red, &[(4, 0), (3, 1), (2, 2), (1, 3), (0, 4)]);
        assert_eq!(run_through(&board, Disc::Red, 0, 4, Axis::Rising), 5);
        assert_eq!(run_through(&board, Disc::Red, 4, 0, Axis::Rising), 5);
        assert!(has_five(&board, Disc::Red));
    }

    #[test]
    fn test_six_in_a_row_wins() {
        let mut board = Board::new();
        place(&mut board, Disc::Blue, &[(2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6)]);
        assert!(has_five(&board, Disc::Blue));
        assert_eq!(longest_run(&board, Disc::Blue), 6);
    }

    #[test]
    fn test_run_through_other_color_is_zero() {
        let mut board = Board::new();
        place(&mut board, Disc::Blue, &[(5, 0)]);
        assert_eq!(run_through(&board, Disc::Red, 5, 0, Axis::Horizontal), 0);
    }
}
