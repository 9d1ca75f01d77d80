use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use c4_rs::config::DifficultyTable;
use c4_rs::console::Console;
use c4_rs::game::{Game, Outcome};
use c4_rs::graphical;
use c4_rs::player::{Player, PlayerId};
use c4_rs::C4Error;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerType {
    /// Human at the console
    H,
    /// Computer
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Interface {
    /// Text grid on the terminal
    Console,
    /// Window with a clickable board
    Graphical,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum First {
    One,
    Two,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player type for each seat
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_enum,
        default_values_t = [PlayerType::H, PlayerType::C]
    )]
    players: Vec<PlayerType>,

    /// Difficulty level for each computer seat; a single value applies to both
    #[arg(short, long, value_delimiter = ',', default_values_t = [2])]
    levels: Vec<u8>,

    /// Who moves first
    #[arg(short, long, value_enum, default_value_t = First::One)]
    first: First,

    /// JSON list of search depths, one per difficulty level
    #[arg(short, long)]
    difficulty_file: Option<PathBuf>,

    /// How the game is shown and human moves are read
    #[arg(short, long, value_enum, default_value_t = Interface::Console)]
    interface: Interface,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn make_player(
    id: PlayerId,
    player_type: PlayerType,
    level: u8,
    table: &DifficultyTable,
) -> Result<Player, C4Error> {
    match player_type {
        PlayerType::H => Ok(Player::human(id)),
        PlayerType::C => Ok(Player::computer(id, table.difficulty(level)?)),
    }
}

/// Every requested level must name a row of the table, whether or not a computer uses it.
fn check_levels(levels: &[u8], table: &DifficultyTable) -> Result<(), C4Error> {
    match levels
        .iter()
        .find(|&&level| level == 0 || level > table.levels())
    {
        Some(&level) => Err(C4Error::InvalidDifficulty { level }),
        None => Ok(()),
    }
}

///
/// Runs the match on a worker thread while the window holds the main thread.
/// Closing the window abandons the match.
///
fn play_graphical(mut game: Game) -> Result<Outcome, C4Error> {
    let (mut front_end, window) = graphical::channel();
    let controller = thread::spawn(move || game.play(&mut front_end));
    let shown = graphical::show(window);
    let outcome = match controller.join() {
        Ok(outcome) => outcome,
        Err(panic) => std::panic::resume_unwind(panic),
    };
    shown?;
    outcome
}

fn run(args: &Args) -> Result<Outcome, C4Error> {
    let table = match &args.difficulty_file {
        Some(path) => DifficultyTable::from_file(path)?,
        None => DifficultyTable::default(),
    };
    check_levels(&args.levels, &table)?;
    let seat = |index: usize| -> (PlayerType, u8) {
        let player_type = args.players.get(index).copied().unwrap_or(PlayerType::C);
        let level = args
            .levels
            .get(index)
            .or(args.levels.first())
            .copied()
            .unwrap_or(1);
        (player_type, level)
    };
    let (type_one, level_one) = seat(0);
    let (type_two, level_two) = seat(1);
    let first = match args.first {
        First::One => PlayerId::One,
        First::Two => PlayerId::Two,
    };

    let mut game = Game::new(
        make_player(PlayerId::One, type_one, level_one, &table)?,
        make_player(PlayerId::Two, type_two, level_two, &table)?,
        first,
    )?;
    match args.interface {
        Interface::Console => game.play(&mut Console::stdio()),
        Interface::Graphical => play_graphical(game),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match run(&args) {
        Ok(Outcome::Aborted) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
