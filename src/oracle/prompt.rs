//! Prompt text sent to a language-model oracle.

use super::{CommentaryContext, OraclePurpose, OracleRequest};
use crate::games::tictactoe::{Board, Position};
use tracing::instrument;

/// System prompt shared by every oracle call.
pub const SYSTEM_PROMPT: &str =
    "You are the AI player in a game of tic-tac-toe. The player uses O and you use X.";

const LENGTH_LIMIT: &str = "in 30 characters or fewer";

/// Renders the user message for `request`.
#[instrument(skip(request), fields(purpose = %request.purpose, generation = request.generation))]
pub fn render_prompt(request: &OracleRequest) -> String {
    match request.purpose {
        OraclePurpose::Move => move_prompt(request),
        OraclePurpose::Commentary => commentary_prompt(request),
    }
}

fn move_prompt(request: &OracleRequest) -> String {
    let empty = request
        .legal_moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Board cells are numbered 0-8:\n{guide}\n\n\
         Current board:\n{board}\n\n\
         Empty cells: {empty}\n\n\
         Pick the best cell (0-8) for your next move.\n\
         Important:\n\
         1. First check whether you have a winning move.\n\
         2. Then check whether you must block the player's winning move.\n\
         3. Otherwise choose a strategically strong cell.\n\n\
         Answer with the number only (for example: 4).",
        guide = Board::index_guide(),
        board = request.board.display(),
    )
}

fn commentary_prompt(request: &OracleRequest) -> String {
    let placed = request
        .last_move
        .and_then(Position::from_index)
        .map(|pos| pos.label());

    let ask = match CommentaryContext::from_status(&request.context, request.last_move) {
        CommentaryContext::GameStart => {
            format!("The game is starting! Reply with a greeting and your resolve {LENGTH_LIMIT}.")
        }
        CommentaryContext::MoveMade => format!(
            "You placed your mark at the {}. With {} empty cells left, reply to the player \
             with a strategic taunt or remark {LENGTH_LIMIT}.",
            placed.unwrap_or("board"),
            request.board.empty_count(),
        ),
        CommentaryContext::OpponentWin => {
            let winning = placed
                .map(|label| format!(" Your mark at the {label} sealed it."))
                .unwrap_or_default();
            format!(
                "You won!{winning} Reply with a victory line and invite the player to a \
                 rematch {LENGTH_LIMIT}."
            )
        }
        CommentaryContext::PlayerWin => format!(
            "The player won! Concede the game and promise to win next time {LENGTH_LIMIT}."
        ),
        CommentaryContext::Draw => format!(
            "It's a draw! Comment on the draw and invite the player to a rematch {LENGTH_LIMIT}."
        ),
    };

    format!("Current board:\n{}\n\n{ask}", request.board.display())
}
