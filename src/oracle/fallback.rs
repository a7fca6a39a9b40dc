//! Local substitutes for oracle output.

use crate::games::tictactoe::GameStatus;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::instrument;

/// What a piece of commentary is reacting to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentaryContext {
    /// A fresh game.
    GameStart,
    /// A move in a game that is still going.
    MoveMade,
    /// The player completed a line.
    PlayerWin,
    /// The opponent completed a line.
    OpponentWin,
    /// Board full, no line.
    Draw,
}

impl CommentaryContext {
    /// Picks the context for a status and the move that produced it.
    pub fn from_status(status: &GameStatus, last_move: Option<usize>) -> Self {
        match (status, last_move) {
            (GameStatus::PlayerWin(_), _) => Self::PlayerWin,
            (GameStatus::OpponentWin(_), _) => Self::OpponentWin,
            (GameStatus::Draw, _) => Self::Draw,
            (GameStatus::InProgress, Some(_)) => Self::MoveMade,
            (GameStatus::InProgress, None) => Self::GameStart,
        }
    }
}

/// Canned commentary used when the oracle cannot provide any.
pub fn fallback_commentary(context: CommentaryContext) -> &'static str {
    match context {
        CommentaryContext::GameStart => "Let's begin!",
        CommentaryContext::MoveMade => "Nice move!",
        CommentaryContext::PlayerWin => "You win! I'll get you next time.",
        CommentaryContext::OpponentWin => "I win! Care for a rematch?",
        CommentaryContext::Draw => "A draw! Shall we play again?",
    }
}

/// Picks a legal cell uniformly at random; `None` when there is none.
#[instrument(skip(rng))]
pub fn select_fallback<R: Rng + ?Sized>(legal_moves: &[usize], rng: &mut R) -> Option<usize> {
    legal_moves.choose(rng).copied()
}
