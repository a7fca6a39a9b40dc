//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark, WinLine};
use tracing::instrument;

/// Winning lines in scan order: rows, columns, then diagonals.
pub const LINES: [WinLine; 8] = [
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

/// Checks if there is a winner on the board.
///
/// Returns the owner and the first complete line in [`LINES`] order. One move
/// can complete two lines at once (a corner closing a row and a column); both
/// then belong to the same mark and only the first is reported.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, WinLine)> {
    let cells = board.cells();
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line;
        match cells[a] {
            Cell::Occupied(mark) if cells[b] == cells[a] && cells[c] == cells[a] => {
                Some((mark, line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(pos, mark) in marks {
            assert!(board.place(pos, mark));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[(0, Mark::Player), (1, Mark::Player), (2, Mark::Player)]);
        assert_eq!(check_winner(&board), Some((Mark::Player, [0, 1, 2])));
    }

    #[test]
    fn test_winner_middle_column() {
        let board = board_with(&[
            (1, Mark::Opponent),
            (4, Mark::Opponent),
            (7, Mark::Opponent),
            (0, Mark::Player),
            (8, Mark::Player),
        ]);
        assert_eq!(check_winner(&board), Some((Mark::Opponent, [1, 4, 7])));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[(2, Mark::Player), (4, Mark::Player), (6, Mark::Player)]);
        assert_eq!(check_winner(&board), Some((Mark::Player, [2, 4, 6])));
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let board = board_with(&[(0, Mark::Player), (1, Mark::Opponent), (2, Mark::Player)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_scan_order_prefers_rows() {
        // Not reachable in play, but pins the documented tie-break.
        let board = board_with(&[
            (0, Mark::Player),
            (1, Mark::Player),
            (2, Mark::Player),
            (3, Mark::Player),
            (6, Mark::Player),
        ]);
        assert_eq!(check_winner(&board), Some((Mark::Player, [0, 1, 2])));
    }
}
