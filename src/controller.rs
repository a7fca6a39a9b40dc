//! Game controller: the state machine between the player, the oracle, and the stats store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{Board, GameStatus, Mark, legal_moves};
use crate::oracle::{
    CommentaryContext, DEFAULT_ORACLE_TIMEOUT, MoveOracle, fallback_commentary,
    request_commentary, request_move, select_fallback,
};
use crate::session::{GameSession, Generation, IgnoreReason, MoveRecord, Phase};
use crate::stats::{GameOutcome, StatsStore};

/// Result of [`GameController::submit_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnOutcome {
    /// The move was not applied; the session is unchanged.
    Ignored(IgnoreReason),
    /// Both moves were applied and it is the player's turn again.
    AwaitingPlayer,
    /// The game ended with this status.
    Finished(GameStatus),
    /// A new game started while this turn was in flight; its result was dropped.
    Superseded,
}

/// Runs games against a [`MoveOracle`] and records results in a [`StatsStore`].
///
/// The controller is a cheap handle: clones share one session, so a front end
/// may start a new game while another task is still awaiting the oracle. Any
/// response that arrives for an older generation is discarded.
#[derive(Clone)]
pub struct GameController {
    session: Arc<Mutex<GameSession>>,
    oracle: Arc<dyn MoveOracle>,
    stats: StatsStore,
    rng: Arc<Mutex<StdRng>>,
    oracle_timeout: Duration,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("oracle", &self.oracle.name())
            .field("oracle_timeout", &self.oracle_timeout)
            .field("session", &*self.lock_session())
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates an idle controller.
    #[instrument(skip(oracle, stats), fields(oracle = oracle.name()))]
    pub fn new(oracle: Arc<dyn MoveOracle>, stats: StatsStore) -> Self {
        info!("Creating game controller");
        Self {
            session: Arc::new(Mutex::new(GameSession::idle())),
            oracle,
            stats,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    /// Seeds the fallback move generator.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Replaces the fallback move generator.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    /// Bounds every oracle call; expiry counts as an oracle failure.
    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> GameSession {
        self.lock_session().clone()
    }

    /// The stats store results are recorded in.
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    fn lock_session(&self) -> MutexGuard<'_, GameSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new game from any phase and returns its generation.
    ///
    /// The player may move as soon as the session is reset; the opening
    /// commentary is filled in when it arrives.
    #[instrument(skip(self))]
    pub async fn new_game(&self) -> Generation {
        let generation = {
            let mut session = self.lock_session();
            let generation = session.generation() + 1;
            if session.awaiting_oracle() {
                debug!(previous = session.generation(), "Abandoning in-flight oracle request");
            }
            *session = GameSession::start(generation);
            generation
        };
        info!(generation, "New game started");

        let text = self
            .commentary(generation, &Board::new(), GameStatus::InProgress, None)
            .await;

        let mut session = self.lock_session();
        if *session.generation() == generation {
            session.set_opening_commentary(text);
        } else {
            debug!(generation, "Discarding stale opening commentary");
        }
        generation
    }

    /// Plays the player's mark at `cell`, then lets the oracle answer.
    ///
    /// Moves outside [`Phase::PlayerTurn`], out of range, or onto a taken cell
    /// are ignored and leave the session untouched.
    #[instrument(skip(self))]
    pub async fn submit_move(&self, cell: usize) -> TurnOutcome {
        let (generation, board, status, record) = {
            let mut session = self.lock_session();
            if let Some(reason) = session.reject_reason(cell) {
                debug!(%reason, "Ignoring move");
                return TurnOutcome::Ignored(reason);
            }
            session.place(cell, Mark::Player);
            let status = *session.status();
            let board = session.board().clone();
            let record = if status.is_terminal() {
                session.set_phase(Phase::Terminal(status));
                session.claim_stats_record()
            } else {
                session.push_record(MoveRecord::new(
                    board.clone(),
                    Some(Mark::Player),
                    Some(cell),
                    String::new(),
                ));
                session.set_phase(Phase::OpponentThinking);
                false
            };
            (*session.generation(), board, status, record)
        };
        debug!(generation, ?status, "Player mark placed");

        if status.is_terminal() {
            if record {
                self.record_result(status).await;
            }
            let text = self.commentary(generation, &board, status, Some(cell)).await;
            return self.append_closing(generation, board, Mark::Player, cell, text, status);
        }

        self.opponent_turn(generation, board).await
    }

    async fn opponent_turn(&self, generation: Generation, board: Board) -> TurnOutcome {
        let legal = legal_moves(&board);
        let choice = match request_move(
            self.oracle.as_ref(),
            generation,
            &board,
            &legal,
            self.oracle_timeout,
        )
        .await
        {
            Ok(cell) => cell,
            Err(e) => {
                let fallback = {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    select_fallback(&legal, &mut *rng)
                };
                match fallback {
                    Some(cell) => {
                        warn!(error = %e, fallback = cell, "Oracle move unusable, using fallback");
                        cell
                    }
                    None => {
                        warn!(error = %e, generation, "No legal cell for the opponent, ending turn");
                        return self.resume_player(generation);
                    }
                }
            }
        };

        let (board, status, record) = {
            let mut session = self.lock_session();
            if *session.generation() != generation {
                debug!(generation, current = session.generation(), "Discarding stale oracle move");
                return TurnOutcome::Superseded;
            }
            session.place(choice, Mark::Opponent);
            let status = *session.status();
            let record = status.is_terminal() && {
                session.set_phase(Phase::Terminal(status));
                session.claim_stats_record()
            };
            (session.board().clone(), status, record)
        };
        info!(generation, cell = choice, ?status, "Opponent mark placed");

        if record {
            self.record_result(status).await;
        }

        let text = self.commentary(generation, &board, status, Some(choice)).await;
        match self.append_closing(generation, board, Mark::Opponent, choice, text, status) {
            TurnOutcome::AwaitingPlayer => self.resume_player(generation),
            outcome => outcome,
        }
    }

    /// Hands the turn back to the player if `generation` is still current.
    fn resume_player(&self, generation: Generation) -> TurnOutcome {
        let mut session = self.lock_session();
        if *session.generation() != generation {
            return TurnOutcome::Superseded;
        }
        session.set_phase(Phase::PlayerTurn);
        TurnOutcome::AwaitingPlayer
    }

    /// Appends the history entry for a move whose commentary just arrived.
    fn append_closing(
        &self,
        generation: Generation,
        board: Board,
        actor: Mark,
        cell: usize,
        commentary: String,
        status: GameStatus,
    ) -> TurnOutcome {
        let mut session = self.lock_session();
        if *session.generation() != generation {
            debug!(generation, "Discarding stale commentary");
            return TurnOutcome::Superseded;
        }
        session.push_record(MoveRecord::new(board, Some(actor), Some(cell), commentary));
        if status.is_terminal() {
            TurnOutcome::Finished(status)
        } else {
            TurnOutcome::AwaitingPlayer
        }
    }

    /// Commentary from the oracle, or the canned line for the context.
    async fn commentary(
        &self,
        generation: Generation,
        board: &Board,
        status: GameStatus,
        last_move: Option<usize>,
    ) -> String {
        match request_commentary(
            self.oracle.as_ref(),
            generation,
            board,
            status,
            last_move,
            self.oracle_timeout,
        )
        .await
        {
            Ok(text) => text,
            Err(e) => {
                let context = CommentaryContext::from_status(&status, last_move);
                warn!(error = %e, ?context, "Commentary unavailable, using fallback");
                fallback_commentary(context).to_string()
            }
        }
    }

    /// Records a finished game. Storage is synchronous, so the write runs on
    /// the blocking pool.
    async fn record_result(&self, status: GameStatus) {
        let Some(outcome) = GameOutcome::from_status(&status) else {
            return;
        };
        let stats = self.stats.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || stats.record_result(outcome)).await {
            warn!(error = %e, %outcome, "Stats recording task failed");
        }
    }
}
