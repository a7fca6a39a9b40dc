//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`](super::Board). The controller calls these after
//! every placed mark; nothing here mutates state.

mod draw;
mod win;

pub use draw::check_draw;
pub use win::{LINES, check_winner};

use super::{Board, GameStatus, Mark};
use tracing::instrument;

/// Derives the game status from the board alone.
#[instrument(skip(board))]
pub fn derive_status(board: &Board) -> GameStatus {
    match check_winner(board) {
        Some((Mark::Player, line)) => GameStatus::PlayerWin(line),
        Some((Mark::Opponent, line)) => GameStatus::OpponentWin(line),
        None if check_draw(board) => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}

/// Indices of empty cells, ascending.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    (0..9).filter(|&i| board.is_empty(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Cell;

    const P: Cell = Cell::Occupied(Mark::Player);
    const O: Cell = Cell::Occupied(Mark::Opponent);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(derive_status(&Board::new()), GameStatus::InProgress);
        assert_eq!(legal_moves(&Board::new()), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_player_win_status_carries_line() {
        let board = Board::from_cells([P, P, P, O, O, E, E, E, E]);
        assert_eq!(derive_status(&board), GameStatus::PlayerWin([0, 1, 2]));
    }

    #[test]
    fn test_opponent_win_on_diagonal() {
        let board = Board::from_cells([P, P, O, P, O, E, O, E, E]);
        assert_eq!(derive_status(&board), GameStatus::OpponentWin([2, 4, 6]));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // O X O / O X X / X O O
        let board = Board::from_cells([P, O, P, P, O, O, O, P, P]);
        assert_eq!(derive_status(&board), GameStatus::Draw);
        assert!(legal_moves(&board).is_empty());
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        // Full board where the player also completed the left column.
        let board = Board::from_cells([P, O, P, P, O, O, P, P, O]);
        assert_eq!(derive_status(&board), GameStatus::PlayerWin([0, 3, 6]));
    }

    #[test]
    fn test_derive_status_idempotent() {
        let board = Board::from_cells([P, O, E, E, P, E, E, O, E]);
        let first = derive_status(&board);
        assert_eq!(first, derive_status(&board));
        assert_eq!(first, GameStatus::InProgress);
    }

    #[test]
    fn test_legal_moves_skips_occupied() {
        let board = Board::from_cells([P, E, E, E, O, E, E, E, P]);
        assert_eq!(legal_moves(&board), vec![1, 2, 3, 5, 6, 7]);
    }
}
