//! Command-line smoke driver for the Renju search core.
//!
//! Mirrors the teacher's root `cbt` package: a thin binary that wraps the
//! `renju-core`/`renju-engine` crates for manual poking, self-play, and
//! perft-style sanity checks, rather than any part of the search itself.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use renju_core::{init_zobrist_keys, Board, Color, Move};
use renju_engine::{Difficulty, Engine};

#[derive(Parser)]
#[command(name = "renju", about = "Renju search engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replays a move history (e.g. "H8 I7 G7") and prints the engine's
    /// choice for the side to move next.
    Best {
        /// Whitespace-separated letter-number moves.
        #[arg(long, default_value = "")]
        moves: String,
        /// Whether black moved first in this history.
        #[arg(long, default_value_t = true)]
        black_first: bool,
        #[arg(long, value_enum, default_value = "hard")]
        difficulty: DifficultyArg,
    },
    /// Plays the engine against itself for a fixed number of plies and
    /// prints the resulting board, used as a quick end-to-end smoke test.
    SelfPlay {
        #[arg(long, default_value_t = 20)]
        plies: u16,
        #[arg(long, value_enum, default_value = "medium")]
        difficulty: DifficultyArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    init_zobrist_keys();

    let cli = Cli::parse();
    match cli.command {
        Command::Best { moves, black_first, difficulty } => run_best(&moves, black_first, difficulty.into()),
        Command::SelfPlay { plies, difficulty } => run_self_play(plies, difficulty.into()),
    }
}

fn run_best(moves: &str, black_first: bool, difficulty: Difficulty) -> Result<()> {
    let first_color = if black_first { Color::Black } else { Color::White };
    let history: Vec<Move> = moves
        .split_whitespace()
        .map(Move::from_notation)
        .collect::<Result<_, _>>()
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut board = Board::from_moves(&history, first_color)?;
    let color_to_move = if history.len() % 2 == 0 { first_color } else { !first_color };

    let mut engine = Engine::new();
    let result = engine.find_best_move(&mut board, color_to_move, difficulty);

    match result.best_move {
        Some(mv) => {
            tracing::info!(
                move_ = %mv,
                score = result.score,
                depth = result.completed_depth,
                nodes = result.stats.nodes,
                "best move found"
            );
            println!("{mv} (score {}, depth {})", result.score, result.completed_depth);
        }
        None => bail!("engine returned no move for an occupied board"),
    }

    Ok(())
}

fn run_self_play(plies: u16, difficulty: Difficulty) -> Result<()> {
    let mut board = Board::new();
    let mut color = Color::Black;
    let mut engine = Engine::new();

    for ply in 0..plies {
        let result = engine.find_best_move(&mut board, color, difficulty);
        let Some(mv) = result.best_move else {
            tracing::warn!(ply, "no legal move available, stopping self-play");
            break;
        };

        board.place_in_place(mv, color);
        tracing::debug!(ply, move_ = %mv, color = ?color, score = result.score, "played move");

        if result.score.abs() >= renju_engine::FIVE - 1 {
            println!("{color:?} wins with {mv} at ply {ply}");
            break;
        }

        color = !color;
    }

    println!("{board}");
    Ok(())
}
