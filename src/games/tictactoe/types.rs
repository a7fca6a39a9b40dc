//! Core domain types for tic-tac-toe against the oracle.

use serde::{Deserialize, Serialize};

/// Side of the board: the human player or the oracle-controlled opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// The human player (moves first, shown as `O`).
    Player,
    /// The oracle-controlled opponent (shown as `X`).
    Opponent,
}

impl Mark {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    /// Board symbol for this side.
    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'O',
            Mark::Opponent => 'X',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty square.
    #[default]
    Empty,
    /// Square taken by one side.
    Occupied(Mark),
}

/// Three cell indices forming a completed line.
pub type WinLine = [usize; 3];

/// 3x3 board in row-major order (0-2 top, 3-5 middle, 6-8 bottom).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from nine cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Places `mark` at `index`.
    ///
    /// Returns `false` and leaves the board untouched when the index is out of
    /// range or the cell is taken.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if *cell == Cell::Empty => {
                *cell = Cell::Occupied(mark);
                true
            }
            _ => false,
        }
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Empty).count()
    }

    /// Formats the board with `_` for empty cells.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Empty => '_',
                    Cell::Occupied(mark) => mark.symbol(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push_str(" | ");
                }
            }
            if row < 2 {
                result.push_str("\n---------\n");
            }
        }
        result
    }

    /// Reference grid showing the index of every cell.
    pub fn index_guide() -> &'static str {
        "0 | 1 | 2\n---------\n3 | 4 | 5\n---------\n6 | 7 | 8"
    }
}

/// Status of a game. Win variants always carry the completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// The player completed a line.
    PlayerWin(WinLine),
    /// The opponent completed a line.
    OpponentWin(WinLine),
    /// Board is full with no line.
    Draw,
}

impl GameStatus {
    /// True for every status except [`GameStatus::InProgress`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The completed line, if this is a win.
    pub fn win_line(&self) -> Option<WinLine> {
        match self {
            GameStatus::PlayerWin(line) | GameStatus::OpponentWin(line) => Some(*line),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}
