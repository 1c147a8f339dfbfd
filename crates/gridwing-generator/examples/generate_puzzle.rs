//! Example demonstrating puzzle generation.
//!
//! Generates a puzzle for a chosen board shape and difficulty, printing
//! the problem, solution, seed, and solve statistics.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! cargo run --example generate_puzzle -- --game-type 6x6 --difficulty easy
//! cargo run --example generate_puzzle -- --seed <64-hex-digits>
//! ```
//!
//! Sample several puzzles in parallel and keep the one that needed the
//! most deductions:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --samples 100
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use gridwing_core::{GameDifficulty, GameType, codec};
use gridwing_generator::{GeneratedPuzzle, PuzzleGenerator, PuzzleSeed};
use gridwing_solver::{BacktrackSolver, SolveStats};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameTypeArg {
    #[value(name = "6x6")]
    Six,
    #[value(name = "9x9")]
    Nine,
    #[value(name = "12x12")]
    Twelve,
    #[value(name = "killer9x9")]
    Killer,
}

impl From<GameTypeArg> for GameType {
    fn from(arg: GameTypeArg) -> Self {
        match arg {
            GameTypeArg::Six => GameType::CLASSIC_6X6,
            GameTypeArg::Nine => GameType::CLASSIC_9X9,
            GameTypeArg::Twelve => GameType::CLASSIC_12X12,
            GameTypeArg::Killer => GameType::KILLER_9X9,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Unspecified,
    Simple,
    Easy,
    Moderate,
    Hard,
    Challenge,
}

impl From<DifficultyArg> for GameDifficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Unspecified => GameDifficulty::Unspecified,
            DifficultyArg::Simple => GameDifficulty::Simple,
            DifficultyArg::Easy => GameDifficulty::Easy,
            DifficultyArg::Moderate => GameDifficulty::Moderate,
            DifficultyArg::Hard => GameDifficulty::Hard,
            DifficultyArg::Challenge => GameDifficulty::Challenge,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board shape to generate.
    #[arg(long, value_name = "TYPE", default_value = "9x9")]
    game_type: GameTypeArg,

    /// Difficulty to target.
    #[arg(long, value_name = "DIFFICULTY", default_value = "unspecified")]
    difficulty: DifficultyArg,

    /// Seed to reproduce a previous run (64 hex digits).
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Number of candidate puzzles to sample; the one requiring the most
    /// deductions wins.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    samples: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let game_type = GameType::from(args.game_type);
    let difficulty = GameDifficulty::from(args.difficulty);
    let generator = PuzzleGenerator::new();

    if args.samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(1);
    }

    let result = if let Some(seed) = args.seed {
        generator.generate_with_seed(game_type, difficulty, seed)
    } else if args.samples == 1 {
        generator.generate(game_type, difficulty)
    } else {
        let best = (0..args.samples)
            .into_par_iter()
            .filter_map(|_| generator.generate(game_type, difficulty).ok())
            .max_by_key(|puzzle| {
                let stats = solve_stats(puzzle);
                stats.propagation_steps() + stats.guesses
            });
        match best {
            Some(puzzle) => Ok(puzzle),
            None => {
                eprintln!("No sample produced a {difficulty} puzzle.");
                process::exit(1);
            }
        }
    };

    match result {
        Ok(puzzle) => print_puzzle(&puzzle),
        Err(err) => {
            eprintln!("Generation failed: {err}");
            process::exit(1);
        }
    }
}

fn solve_stats(puzzle: &GeneratedPuzzle) -> SolveStats {
    let report = BacktrackSolver::new()
        .solve(&puzzle.problem.values(), puzzle.game_type)
        .expect("generated puzzles are well-formed");
    *report.stats()
}

fn print_puzzle(puzzle: &GeneratedPuzzle) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();
    println!("Type: {}", puzzle.game_type);
    println!("Difficulty: {}", puzzle.difficulty);
    println!();
    println!("Problem:");
    println!("  {}", codec::board_to_string(&puzzle.problem, '.'));
    println!();
    println!("Solution:");
    println!("  {}", codec::board_to_string(&puzzle.solution, '.'));

    if !puzzle.cages.is_empty() {
        println!();
        println!("Cages:");
        println!("  {}", codec::cages_to_string(&puzzle.cages));
    }

    let stats = solve_stats(puzzle);
    println!();
    println!("Stats:");
    println!("  naked singles: {}", stats.naked_singles);
    println!("  hidden singles: {}", stats.hidden_singles);
    println!("  guesses: {}", stats.guesses);
    println!("  backtracks: {}", stats.backtracks);
}
