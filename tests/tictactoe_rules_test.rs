//! Tests for tic-tac-toe rules and positions.

use oracle_tictactoe::{
    Board, Cell, GameStatus, LINES, Mark, Position, check_draw, check_winner, derive_status,
    legal_moves,
};

const P: Cell = Cell::Occupied(Mark::Player);
const O: Cell = Cell::Occupied(Mark::Opponent);
const E: Cell = Cell::Empty;

#[test]
fn test_player_top_row_wins() {
    let board = Board::from_cells([P, P, P, E, E, E, E, E, E]);
    assert_eq!(check_winner(&board), Some((Mark::Player, [0, 1, 2])));
    assert_eq!(derive_status(&board), GameStatus::PlayerWin([0, 1, 2]));
}

#[test]
fn test_full_board_without_line_is_draw() {
    // O X O / X X O / O O X
    let board = Board::from_cells([P, O, P, O, O, P, P, P, O]);
    assert_eq!(check_winner(&board), None);
    assert!(check_draw(&board));
    assert_eq!(derive_status(&board), GameStatus::Draw);
}

#[test]
fn test_win_lines_only_on_win_status() {
    assert_eq!(GameStatus::InProgress.win_line(), None);
    assert_eq!(GameStatus::Draw.win_line(), None);
    assert_eq!(GameStatus::OpponentWin([2, 5, 8]).win_line(), Some([2, 5, 8]));
}

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_position_index_round_trip() {
    for index in 0..9 {
        let position = Position::from_index(index).unwrap();
        assert_eq!(position.to_index(), index);
    }
    assert_eq!(Position::from_index(2).unwrap().label(), "top-right");
}

#[test]
fn test_legal_moves_filters_occupied() {
    let mut board = Board::new();
    board.place(0, Mark::Player);
    board.place(4, Mark::Opponent);
    assert_eq!(legal_moves(&board), vec![1, 2, 3, 5, 6, 7, 8]);
}

#[test]
fn test_place_rejects_taken_and_out_of_range() {
    let mut board = Board::new();
    assert!(board.place(3, Mark::Player));
    let before = board.clone();
    assert!(!board.place(3, Mark::Opponent));
    assert!(!board.place(9, Mark::Opponent));
    assert_eq!(board, before);
}

fn complete_lines(board: &Board) -> Vec<(Mark, [usize; 3])> {
    let cells = board.cells();
    LINES
        .iter()
        .filter_map(|&[a, b, c]| match cells[a] {
            Cell::Occupied(mark) if cells[b] == cells[a] && cells[c] == cells[a] => {
                Some((mark, [a, b, c]))
            }
            _ => None,
        })
        .collect()
}

/// Walks every game reachable by alternating legal moves, player first.
fn visit_reachable(board: &Board, to_move: Mark, visit: &mut dyn FnMut(&Board, Mark)) {
    for cell in legal_moves(board) {
        let mut next = board.clone();
        next.place(cell, to_move);
        visit(&next, to_move);
        if derive_status(&next) == GameStatus::InProgress {
            visit_reachable(&next, to_move.other(), visit);
        }
    }
}

#[test]
fn test_reachable_boards_have_single_winner() {
    let mut boards = 0usize;
    let mut double_lines = 0usize;
    visit_reachable(&Board::new(), Mark::Player, &mut |board, mover| {
        boards += 1;
        let lines = complete_lines(board);
        if lines.len() > 1 {
            double_lines += 1;
        }
        // Every complete line belongs to the side that just moved, and the
        // reported line is the first of them in scan order.
        assert!(lines.iter().all(|(mark, _)| *mark == mover));
        assert_eq!(check_winner(board), lines.first().copied());
        // Status is a pure function of the board.
        assert_eq!(derive_status(board), derive_status(board));
    });
    assert!(boards > 0);
    assert!(double_lines > 0, "a corner can close two lines at once");
}
