//! Benchmarks the search by choosing the first move on an empty board and timing it
use std::process::ExitCode;
use std::time::Instant;

use c4_rs::c4::Board;
use c4_rs::player::{Difficulty, PlayerId};
use c4_rs::search::choose_move;
use c4_rs::C4Error;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    #[arg(short, long, default_value_t = 6)]
    depth: usize,
    #[arg(short, long, default_value_t = 10)]
    episodes: usize,
}

fn run_benchmark(difficulty: Difficulty) -> Result<f64, C4Error> {
    let mut board = Board::new();
    let start = Instant::now();
    let column = choose_move(&mut board, PlayerId::One, difficulty)?;
    let elapsed = start.elapsed();
    println!(
        "Depth {} chose column {} in {:.3} seconds",
        difficulty.depth(),
        column,
        elapsed.as_secs_f64()
    );
    Ok(elapsed.as_secs_f64())
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("===\nDepth: {}, Episodes: {}", args.depth, args.episodes);
    println!("---");
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let difficulty = match Difficulty::from_depth(args.depth) {
        Ok(difficulty) => difficulty,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    let durations: Result<Vec<f64>, C4Error> = (0..args.episodes)
        .map(|_| run_benchmark(difficulty))
        .collect();
    let durations = match durations {
        Ok(durations) => durations,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    println!("---");
    println!(
        "Average duration: {:.3} seconds",
        durations.iter().sum::<f64>() / durations.len().max(1) as f64
    );
    ExitCode::SUCCESS
}
