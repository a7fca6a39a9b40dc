mod position;
mod rules;
mod types;

pub use position::Position;
pub use rules::{LINES, check_draw, check_winner, derive_status, legal_moves};
pub use types::{Board, Cell, GameStatus, Mark, WinLine};
