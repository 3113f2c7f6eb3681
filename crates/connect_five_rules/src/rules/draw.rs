//! Draw detection for connect-five.

use crate::board::Board;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner indicates a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.rows().flatten().all(|cell| !cell.is_empty())
}
