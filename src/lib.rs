//! Oracle Tic-Tac-Toe library - rule-checked play against an unreliable LLM opponent
//!
//! The opponent's moves and remarks come from a [`MoveOracle`] that answers in
//! free text, may fail, and may take arbitrarily long. Everything it says is
//! validated against the rules; anything unusable is replaced locally.
//!
//! # Architecture
//!
//! - **Games**: board, marks, and pure rule functions
//! - **Oracle**: request/response protocol, prompt text, fallbacks
//! - **Controller**: the session state machine with stale-response discarding
//! - **Stats**: durable counters with change notification
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use oracle_tictactoe::{GameController, OfflineOracle, StatsStore, TurnOutcome};
//!
//! # async fn example() {
//! let controller = GameController::new(Arc::new(OfflineOracle), StatsStore::in_memory())
//!     .with_seed(7);
//! controller.new_game().await;
//! let outcome = controller.submit_move(4).await;
//! assert!(matches!(outcome, TurnOutcome::AwaitingPlayer));
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod llm_client;
mod oracle;
mod session;
mod stats;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Controller and session
pub use controller::{GameController, TurnOutcome};
pub use session::{GameSession, Generation, IgnoreReason, MoveRecord, Phase};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmErrorKind, LlmProvider};

// Crate-level exports - Oracle protocol
pub use oracle::{
    CommentaryContext, DEFAULT_ORACLE_TIMEOUT, LlmOracle, MoveOracle, MoveRequestError,
    OfflineOracle, OracleError, OracleErrorKind, OracleParseError, OraclePurpose, OracleRequest,
    SYSTEM_PROMPT, fallback_commentary, first_integer, parse_move, render_prompt,
    request_commentary, request_move, select_fallback,
};

// Crate-level exports - Stats
pub use stats::{
    FileStorage, GameOutcome, Lead, MemoryStorage, STATS_KEY, StatsChanged, StatsRecord,
    StatsStorage, StatsStore, StatsSubscription, StatsSummary, StorageError,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Cell, GameStatus, LINES, Mark, Position, WinLine, check_draw, check_winner,
    derive_status, legal_moves,
};
