//! Move oracle: the remote opponent that answers in free text.
//!
//! The oracle is an injected capability. The controller never trusts its
//! output: move proposals go through [`parse_move`] and anything unusable is
//! replaced by [`select_fallback`]; failed commentary is replaced by
//! [`fallback_commentary`].

mod error;
mod fallback;
mod llm;
mod parse;
mod prompt;
mod protocol;

pub use error::{MoveRequestError, OracleError, OracleErrorKind, OracleParseError};
pub use fallback::{CommentaryContext, fallback_commentary, select_fallback};
pub use llm::LlmOracle;
pub use parse::{first_integer, parse_move};
pub use prompt::{SYSTEM_PROMPT, render_prompt};
pub use protocol::{DEFAULT_ORACLE_TIMEOUT, request_commentary, request_move};

use crate::games::tictactoe::{Board, GameStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What the oracle is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OraclePurpose {
    /// A cell index for the opponent's next mark.
    Move,
    /// A short remark about the game.
    Commentary,
}

/// Everything the oracle gets to see for one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// Session generation that issued the request.
    pub generation: u64,
    /// Board at the time of the request.
    pub board: Board,
    /// Empty cells, ascending.
    pub legal_moves: Vec<usize>,
    /// Move or commentary.
    pub purpose: OraclePurpose,
    /// Status of the game on `board`.
    pub context: GameStatus,
    /// The cell most recently played, if any.
    pub last_move: Option<usize>,
}

/// Asynchronous source of free-form text for moves and commentary.
#[async_trait::async_trait]
pub trait MoveOracle: Send + Sync {
    /// Sends one request and returns the raw response text.
    async fn request_text(&self, request: &OracleRequest) -> Result<String, OracleError>;

    /// Returns the oracle's display name.
    fn name(&self) -> &str;
}

/// Oracle that is never reachable, so every turn uses the fallbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineOracle;

#[async_trait::async_trait]
impl MoveOracle for OfflineOracle {
    #[instrument(skip(self, request), fields(purpose = %request.purpose))]
    async fn request_text(&self, request: &OracleRequest) -> Result<String, OracleError> {
        debug!("Offline oracle asked for text");
        Err(OracleError::new(
            OracleErrorKind::Unavailable,
            "no oracle configured",
        ))
    }

    fn name(&self) -> &str {
        "offline"
    }
}
