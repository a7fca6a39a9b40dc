//! Oracle Tic-Tac-Toe - terminal front end
//!
//! Plays games against an LLM opponent and shows the accumulated statistics.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use oracle_tictactoe::{
    AppConfig, FileStorage, GameController, GameOutcome, GameSession, GameStatus, Lead, LlmClient,
    LlmOracle, MoveOracle, OfflineOracle, Phase, StatsRecord, StatsStore, StatsSummary,
    TurnOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "Enter a cell 0-8, 'n' for a new game, 's' for stats, or 'q' to quit.";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they don't interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.stats_dir {
        config = config.with_stats_dir(dir);
    }
    let stats = StatsStore::new(Arc::new(FileStorage::new(config.stats_dir())));

    match cli.command {
        Command::Play { offline, seed } => run_play(&config, stats, offline, seed).await,
        Command::Stats => {
            print_stats(&stats.read());
            Ok(())
        }
        Command::ResetStats => {
            stats.reset();
            println!("Statistics reset.");
            Ok(())
        }
    }
}

/// Builds the oracle, falling back to offline play when no API key is set.
fn build_oracle(config: &AppConfig, offline: bool) -> Arc<dyn MoveOracle> {
    if offline {
        return Arc::new(OfflineOracle);
    }
    match config.create_llm_config() {
        Ok(llm) => Arc::new(LlmOracle::new(LlmClient::new(llm))),
        Err(e) => {
            warn!(error = %e, "LLM unavailable, playing offline");
            Arc::new(OfflineOracle)
        }
    }
}

/// Interactive game loop on stdin/stdout.
async fn run_play(config: &AppConfig, stats: StatsStore, offline: bool, seed: Option<u64>) -> Result<()> {
    let oracle = build_oracle(config, offline);
    info!(oracle = oracle.name(), "Starting play");

    let mut controller =
        GameController::new(oracle, stats.clone()).with_oracle_timeout(config.oracle_timeout());
    if let Some(seed) = seed {
        controller = controller.with_seed(seed);
    }
    let mut subscription = stats.subscribe();

    controller.new_game().await;
    render(&controller.session());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "q" | "quit" => break,
            "n" | "new" => {
                controller.new_game().await;
            }
            "s" | "stats" => print_stats(&stats.read()),
            input => match input.parse::<usize>() {
                Ok(cell) => {
                    if let TurnOutcome::Ignored(reason) = controller.submit_move(cell).await {
                        println!("Move ignored: {reason}");
                    }
                }
                Err(_) => println!("{HELP}"),
            },
        }

        if let Some(record) = subscription.try_changed() {
            print_stats(&record);
        }
        render(&controller.session());
    }

    Ok(())
}

fn render(session: &GameSession) {
    println!();
    println!("{}", session.board().display());
    if !session.commentary().is_empty() {
        println!("AI: {}", session.commentary());
    }
    let status = match session.phase() {
        Phase::Idle => "Start a new game with 'n'.".to_string(),
        Phase::PlayerTurn => "Your turn (you are O).".to_string(),
        Phase::OpponentThinking => "AI is thinking...".to_string(),
        Phase::Terminal(GameStatus::PlayerWin(line)) => format!("You win! Line {line:?}"),
        Phase::Terminal(GameStatus::OpponentWin(line)) => format!("AI wins! Line {line:?}"),
        Phase::Terminal(_) => "Draw!".to_string(),
    };
    println!("{status}");
}

fn print_stats(record: &StatsRecord) {
    let summary = StatsSummary::from_record(record);
    println!();
    println!(
        "Games: {}   Player wins: {}   AI wins: {}   Draws: {}",
        record.total_games(),
        record.player_wins(),
        record.opponent_wins(),
        record.draws()
    );
    println!(
        "Win rate: player {:.1}%   AI {:.1}%   draw {:.1}%",
        summary.player_win_rate(),
        summary.opponent_win_rate(),
        summary.draw_rate()
    );
    match record.last_played() {
        Some(at) => println!("Last played: {}", at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")),
        None => println!("Last played: never"),
    }
    if let Some(most) = summary.most_common() {
        let label = match most {
            GameOutcome::PlayerWin => "player wins",
            GameOutcome::OpponentWin => "AI wins",
            GameOutcome::Draw => "draws",
        };
        println!("Most common result: {label}");
        match summary.lead() {
            Lead::Player(n) => println!("Player leads by {n}"),
            Lead::Opponent(n) => println!("AI leads by {n}"),
            Lead::Even => println!("Evenly matched"),
        }
    }
}
