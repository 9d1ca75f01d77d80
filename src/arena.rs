//! Plays computer configurations against one another
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use c4_rs::config::ArenaSettings;
use c4_rs::console::Headless;
use c4_rs::game::{Game, Outcome};
use c4_rs::player::PlayerId;
use c4_rs::C4Error;
use clap::Parser;
use env_logger::fmt::Formatter;
use log::Record;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg()]
    config_file: PathBuf,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

///
/// Plays the opening moves at random, stopping early if one of them ends the game.
///
fn random_opening<R: Rng>(game: &mut Game, moves: usize, rng: &mut R) -> Result<(), C4Error> {
    for _ in 0..moves {
        if game.is_over() {
            break;
        }
        let legal = game.board().legal_columns();
        let column = *legal.choose(rng).ok_or(C4Error::NoLegalMove)?;
        log::debug!("Random opening move in column {}", column);
        game.submit_move(column)?;
    }
    Ok(())
}

fn run_episode<R: Rng>(settings: &ArenaSettings, rng: &mut R) -> Result<Outcome, C4Error> {
    let mut game = Game::new(
        settings.players[0].player(PlayerId::One)?,
        settings.players[1].player(PlayerId::Two)?,
        settings.first,
    )?;
    random_opening(&mut game, settings.random_openings, rng)?;
    let outcome = game.play(&mut Headless)?;
    log::debug!("Final position:\n{}", game.board());
    Ok(outcome)
}

fn run(args: &Args) -> Result<(), C4Error> {
    let settings = ArenaSettings::from_file(&args.config_file)?;
    let mut rng = rand::thread_rng();

    let mut wins = [0usize; 2];
    let mut draws = 0usize;
    for episode in 0..settings.episodes {
        log::info!("Starting episode {}", episode);
        match run_episode(&settings, &mut rng)? {
            Outcome::Won(player) => wins[player.index()] += 1,
            Outcome::Drawn => draws += 1,
            Outcome::Aborted => log::warn!("Episode {} was aborted", episode),
        }
    }

    let total = settings.episodes.max(1) as f64;
    println!("Player\tWins\tPercentage");
    for (i, w) in wins.iter().enumerate() {
        println!("{}\t{}\t{:>5.2}%", i + 1, w, (100.0 * *w as f64) / total);
    }
    println!("Draws\t{}\t{:>5.2}%", draws, (100.0 * draws as f64) / total);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .format(|buf: &mut Formatter, record: &Record| {
            let thread_id = thread::current().id();
            let timestamp = buf.timestamp_millis();
            writeln!(
                buf,
                "[{}] [Thread: {:?}] [{}] - {}",
                timestamp,
                thread_id,
                record.level(),
                record.args()
            )
        })
        .filter_level(args.verbose.log_level_filter())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
