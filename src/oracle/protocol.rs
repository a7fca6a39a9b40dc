//! The two oracle call sites: move requests and commentary requests.

use super::{
    MoveOracle, MoveRequestError, OracleError, OracleErrorKind, OraclePurpose, OracleRequest,
    parse_move,
};
use crate::games::tictactoe::{Board, GameStatus};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Upper bound on a single oracle call unless configured otherwise.
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends `request` and fails with [`OracleErrorKind::Timeout`] after `timeout`.
async fn call_with_timeout(
    oracle: &dyn MoveOracle,
    request: &OracleRequest,
    timeout: Duration,
) -> Result<String, OracleError> {
    match tokio::time::timeout(timeout, oracle.request_text(request)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(oracle = oracle.name(), ?timeout, "Oracle call timed out");
            Err(OracleError::new(
                OracleErrorKind::Timeout,
                format!("no response within {timeout:?}"),
            ))
        }
    }
}

/// Asks the oracle for the opponent's move and validates the answer.
///
/// # Errors
///
/// Returns [`MoveRequestError::Oracle`] if the call fails or times out and
/// [`MoveRequestError::Parse`] if the text names no cell in `legal_moves`.
#[instrument(skip(oracle, board, legal_moves), fields(oracle = oracle.name()))]
pub async fn request_move(
    oracle: &dyn MoveOracle,
    generation: u64,
    board: &Board,
    legal_moves: &[usize],
    timeout: Duration,
) -> Result<usize, MoveRequestError> {
    let request = OracleRequest {
        generation,
        board: board.clone(),
        legal_moves: legal_moves.to_vec(),
        purpose: OraclePurpose::Move,
        context: GameStatus::InProgress,
        last_move: None,
    };
    let text = call_with_timeout(oracle, &request, timeout).await?;
    debug!(response = %text, "Oracle proposed a move");
    Ok(parse_move(&text, legal_moves)?)
}

/// Asks the oracle for a short remark on the current position.
///
/// The text is trimmed and otherwise accepted as is.
///
/// # Errors
///
/// Returns [`OracleError`] if the call fails, times out, or yields only
/// whitespace.
#[instrument(skip(oracle, board), fields(oracle = oracle.name()))]
pub async fn request_commentary(
    oracle: &dyn MoveOracle,
    generation: u64,
    board: &Board,
    status: GameStatus,
    last_move: Option<usize>,
    timeout: Duration,
) -> Result<String, OracleError> {
    let request = OracleRequest {
        generation,
        board: board.clone(),
        legal_moves: crate::games::tictactoe::legal_moves(board),
        purpose: OraclePurpose::Commentary,
        context: status,
        last_move,
    };
    let text = call_with_timeout(oracle, &request, timeout).await?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(OracleError::new(
            OracleErrorKind::Service,
            "empty commentary",
        ));
    }
    Ok(trimmed.to_string())
}
