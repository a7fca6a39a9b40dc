//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner is a draw; callers check the winner first.
#[instrument(skip(board))]
pub fn check_draw(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
