//! Game session state owned by the controller.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::games::tictactoe::{Board, GameStatus, Mark, WinLine, derive_status};

/// Identifies one session; bumped by every new game.
pub type Generation = u64;

/// Where the controller is in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No game started yet.
    Idle,
    /// Waiting for the player's move.
    PlayerTurn,
    /// A move request to the oracle is outstanding.
    OpponentThinking,
    /// Game over.
    Terminal(GameStatus),
}

/// Why a submitted move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum IgnoreReason {
    /// No game has been started.
    NoGame,
    /// The oracle is still choosing its move.
    AwaitingOracle,
    /// The game is over.
    GameOver,
    /// Index outside 0-8.
    OutOfRange,
    /// The cell already has a mark.
    Occupied,
}

/// One entry in the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct MoveRecord {
    board_after_move: Board,
    /// `None` for the opening entry.
    actor: Option<Mark>,
    /// `None` for the opening entry.
    cell_index: Option<usize>,
    commentary: String,
}

impl MoveRecord {
    /// The "game start" pseudo-entry.
    pub fn opening() -> Self {
        Self::new(Board::new(), None, None, String::new())
    }

    /// True for the opening pseudo-entry.
    pub fn is_opening(&self) -> bool {
        self.actor.is_none() && self.cell_index.is_none()
    }
}

/// A single playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameSession {
    generation: Generation,
    board: Board,
    status: GameStatus,
    turn: Mark,
    phase: Phase,
    history: Vec<MoveRecord>,
    /// Latest commentary shown to the player.
    commentary: String,
    stats_recorded: bool,
}

impl GameSession {
    /// The state before any game: generation 0, phase [`Phase::Idle`].
    pub fn idle() -> Self {
        Self {
            generation: 0,
            board: Board::new(),
            status: GameStatus::InProgress,
            turn: Mark::Player,
            phase: Phase::Idle,
            history: Vec::new(),
            commentary: String::new(),
            stats_recorded: false,
        }
    }

    /// A fresh game waiting for the player, with the opening entry in history.
    #[instrument]
    pub fn start(generation: Generation) -> Self {
        debug!("Starting session");
        Self {
            generation,
            phase: Phase::PlayerTurn,
            history: vec![MoveRecord::opening()],
            ..Self::idle()
        }
    }

    /// The completed line, if the game was won.
    pub fn win_line(&self) -> Option<WinLine> {
        self.status.win_line()
    }

    /// True while a move request is outstanding.
    pub fn awaiting_oracle(&self) -> bool {
        self.phase == Phase::OpponentThinking
    }

    /// Returns why a player move at `cell` would be ignored, if it would.
    pub fn reject_reason(&self, cell: usize) -> Option<IgnoreReason> {
        match self.phase {
            Phase::Idle => Some(IgnoreReason::NoGame),
            Phase::OpponentThinking => Some(IgnoreReason::AwaitingOracle),
            Phase::Terminal(_) => Some(IgnoreReason::GameOver),
            Phase::PlayerTurn if cell >= 9 => Some(IgnoreReason::OutOfRange),
            Phase::PlayerTurn if !self.board.is_empty(cell) => Some(IgnoreReason::Occupied),
            Phase::PlayerTurn => None,
        }
    }

    /// Places `mark`, recomputes status, and passes the turn.
    ///
    /// Returns `false` without changes if the cell is unavailable.
    pub(crate) fn place(&mut self, cell: usize, mark: Mark) -> bool {
        if !self.board.place(cell, mark) {
            return false;
        }
        self.status = derive_status(&self.board);
        self.turn = mark.other();
        true
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn push_record(&mut self, record: MoveRecord) {
        self.commentary = record.commentary.clone();
        self.history.push(record);
    }

    /// Fills in the opening entry's commentary.
    pub(crate) fn set_opening_commentary(&mut self, text: String) {
        if let Some(first) = self.history.first_mut().filter(|r| r.is_opening()) {
            first.commentary = text.clone();
        }
        if self.history.len() <= 1 {
            self.commentary = text;
        }
    }

    /// Marks the result as recorded. Returns `true` only on the first call.
    pub(crate) fn claim_stats_record(&mut self) -> bool {
        !std::mem::replace(&mut self.stats_recorded, true)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::idle()
    }
}
