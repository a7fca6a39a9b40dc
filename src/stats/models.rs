//! Stats record and derived views.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::games::tictactoe::GameStatus;

/// Game outcome from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameOutcome {
    /// Player completed a line.
    PlayerWin,
    /// Opponent completed a line.
    OpponentWin,
    /// Board filled without a line.
    Draw,
}

impl GameOutcome {
    /// Maps a terminal status to its outcome; `None` while in progress.
    #[instrument]
    pub fn from_status(status: &GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::PlayerWin(_) => Some(Self::PlayerWin),
            GameStatus::OpponentWin(_) => Some(Self::OpponentWin),
            GameStatus::Draw => Some(Self::Draw),
        }
    }
}

/// Aggregate counters persisted across sessions.
///
/// Stored as `{"totalGames", "playerWins", "aiWins", "draws", "lastPlayed"}`.
/// Missing fields read as zero so older or partial records still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    total_games: u32,
    player_wins: u32,
    #[serde(rename = "aiWins")]
    opponent_wins: u32,
    draws: u32,
    last_played: Option<DateTime<Utc>>,
}

impl StatsRecord {
    /// The empty record.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns this record with one more game of `outcome`, played at `at`.
    #[instrument(skip(self))]
    pub fn with_outcome(mut self, outcome: GameOutcome, at: DateTime<Utc>) -> Self {
        self.total_games = self.total_games.saturating_add(1);
        let counter = match outcome {
            GameOutcome::PlayerWin => &mut self.player_wins,
            GameOutcome::OpponentWin => &mut self.opponent_wins,
            GameOutcome::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
        self.last_played = Some(at);
        self
    }

    /// True when the total equals the sum of the three counters.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.total_games)
            == u64::from(self.player_wins) + u64::from(self.opponent_wins) + u64::from(self.draws)
    }

    /// Count for one outcome.
    pub fn count(&self, outcome: GameOutcome) -> u32 {
        match outcome {
            GameOutcome::PlayerWin => self.player_wins,
            GameOutcome::OpponentWin => self.opponent_wins,
            GameOutcome::Draw => self.draws,
        }
    }

    /// Share of games with `outcome` as a percentage (0.0–100.0).
    pub fn rate(&self, outcome: GameOutcome) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.count(outcome) as f64 / self.total_games as f64) * 100.0
        }
    }
}

/// Which side is ahead on wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lead {
    /// Player ahead by this many wins.
    Player(u32),
    /// Opponent ahead by this many wins.
    Opponent(u32),
    /// Equal wins.
    Even,
}

/// Read-only summary for a stats view.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct StatsSummary {
    player_win_rate: f64,
    opponent_win_rate: f64,
    draw_rate: f64,
    most_common: Option<GameOutcome>,
    lead: Lead,
}

impl StatsSummary {
    /// Summarises `record`. Ties for most common favour the player, then the opponent.
    #[instrument]
    pub fn from_record(record: &StatsRecord) -> Self {
        let (p, o, d) = (record.player_wins, record.opponent_wins, record.draws);

        let most_common = if record.total_games == 0 {
            None
        } else if p >= o && p >= d {
            Some(GameOutcome::PlayerWin)
        } else if o >= d {
            Some(GameOutcome::OpponentWin)
        } else {
            Some(GameOutcome::Draw)
        };

        let lead = match p.cmp(&o) {
            std::cmp::Ordering::Greater => Lead::Player(p - o),
            std::cmp::Ordering::Less => Lead::Opponent(o - p),
            std::cmp::Ordering::Equal => Lead::Even,
        };

        Self {
            player_win_rate: record.rate(GameOutcome::PlayerWin),
            opponent_win_rate: record.rate(GameOutcome::OpponentWin),
            draw_rate: record.rate(GameOutcome::Draw),
            most_common,
            lead,
        }
    }
}
