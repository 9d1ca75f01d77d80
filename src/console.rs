//! Text front end: draws the grid and reads column numbers.
use std::io::{self, BufRead, Write};

use log::warn;

use crate::c4::{C4Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::C4Error;
use crate::game::{FrontEnd, Game, HumanTurn, Outcome};
use crate::player::PlayerId;

pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn draw(&mut self, game: &Game) -> io::Result<()> {
        let labels: Vec<String> = (1..=BOARD_WIDTH)
            .map(|column| column.to_string())
            .collect();
        let ruler = format!("+{}", "---+".repeat(BOARD_WIDTH));
        writeln!(self.output, "  {}", labels.join("   "))?;
        writeln!(self.output, "{}", ruler)?;
        for row in 0..BOARD_HEIGHT {
            write!(self.output, "|")?;
            for column in 0..BOARD_WIDTH {
                let symbol = match game.board().get(row, column) {
                    C4Cell::Empty => ' ',
                    C4Cell::Filled(player) => player.symbol(),
                };
                write!(self.output, " {} |", symbol)?;
            }
            writeln!(self.output)?;
            writeln!(self.output, "{}", ruler)?;
        }
        writeln!(self.output, "  {}", labels.join("   "))?;
        self.output.flush()
    }

    /// Prompts until a column number or `q` is read. End of input counts as quitting.
    fn read_turn(&mut self, player: PlayerId) -> io::Result<HumanTurn> {
        loop {
            write!(
                self.output,
                "Player {} ({}), column 1-{} or q to quit: ",
                player.index() + 1,
                player.symbol(),
                BOARD_WIDTH
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(HumanTurn::Quit);
            }
            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") {
                return Ok(HumanTurn::Quit);
            }
            match answer.parse::<usize>() {
                // Columns are shown 1-based; 0 maps past the board and gets refused.
                Ok(column) => return Ok(HumanTurn::Drop(column.wrapping_sub(1))),
                Err(_) => writeln!(self.output, "'{}' is not a column number", answer)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> FrontEnd for Console<R, W> {
    fn get_human_turn(&mut self, _game: &Game, player: PlayerId) -> HumanTurn {
        self.read_turn(player).unwrap_or_else(|error| {
            warn!("Could not read a move: {}", error);
            HumanTurn::Quit
        })
    }

    fn visualise_state(&mut self, game: &Game) {
        if let Err(error) = self.draw(game) {
            warn!("Could not draw the board: {}", error);
        }
    }

    fn reject_move(&mut self, error: &C4Error) {
        let message = match error {
            C4Error::ColumnOutOfRange { .. } => "That column is not on the board".to_string(),
            C4Error::ColumnFull { column } => format!("Column {} is full", column + 1),
            other => other.to_string(),
        };
        if let Err(error) = writeln!(self.output, "{}, try again.", message) {
            warn!("Could not write to the console: {}", error);
        }
    }

    fn announce_outcome(&mut self, _game: &Game, outcome: Outcome) {
        let message = match outcome {
            Outcome::Won(player) => {
                format!("Player {} ({}) wins!", player.index() + 1, player.symbol())
            }
            Outcome::Drawn => "It's a draw.".to_string(),
            Outcome::Aborted => "Game abandoned.".to_string(),
        };
        if let Err(error) = writeln!(self.output, "{}", message) {
            warn!("Could not write to the console: {}", error);
        }
    }
}

/// Front end with nobody watching, for computer-only matches.
pub struct Headless;

impl FrontEnd for Headless {
    fn get_human_turn(&mut self, _game: &Game, player: PlayerId) -> HumanTurn {
        warn!("Headless front end asked to move for {:?}", player);
        HumanTurn::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use std::io::Cursor;

    fn humans() -> Game {
        Game::new(
            Player::human(PlayerId::One),
            Player::human(PlayerId::Two),
            PlayerId::One,
        )
        .unwrap()
    }

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_reads_one_based_column() {
        let game = humans();
        let mut console = console("4\n");
        assert_eq!(
            console.get_human_turn(&game, PlayerId::One),
            HumanTurn::Drop(3)
        );
    }

    #[test]
    fn test_reprompts_on_garbage() {
        let game = humans();
        let mut console = console("left\n\n7\n");
        assert_eq!(
            console.get_human_turn(&game, PlayerId::Two),
            HumanTurn::Drop(6)
        );
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("'left' is not a column number"));
    }

    #[test]
    fn test_quit_and_end_of_input() {
        let game = humans();
        assert_eq!(
            console("q\n").get_human_turn(&game, PlayerId::One),
            HumanTurn::Quit
        );
        assert_eq!(
            console("").get_human_turn(&game, PlayerId::One),
            HumanTurn::Quit
        );
    }

    #[test]
    fn test_zero_is_off_the_board() {
        let mut game = humans();
        let mut console = console("0\n1\n");
        let turn = console.get_human_turn(&game, PlayerId::One);
        let column = match turn {
            HumanTurn::Drop(column) => column,
            HumanTurn::Quit => panic!("expected a column"),
        };
        assert!(matches!(
            game.submit_move(column),
            Err(C4Error::ColumnOutOfRange { .. })
        ));
    }

    #[test]
    fn test_full_game_through_console() {
        let mut game = humans();
        let mut console = console("1\n2\n1\n2\n1\n2\n1\n");
        assert_eq!(game.play(&mut console).unwrap(), Outcome::Won(PlayerId::One));
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("| X | O |   |"));
        assert!(output.ends_with("Player 1 (X) wins!\n"));
    }
}
