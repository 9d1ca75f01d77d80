use crate::c4::{check_move, Board, C4Cell, MoveResult, BOARD_WIDTH};
use crate::error::C4Error;
use crate::player::{Player, PlayerId, Strategy};
use crate::search::choose_move;
use log::{debug, info, warn};

/// Where a match stands. During play it names the next mover; once over, the result.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Status {
    InProgress(PlayerId),
    Won(PlayerId),
    Drawn,
}

/// How a match driven by `Game::play` finished.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Won(PlayerId),
    Drawn,
    /// A front end quit before the game was decided.
    Aborted,
}

/// What a front end answers when asked for a human's move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum HumanTurn {
    Drop(usize),
    Quit,
}

///
/// The side of a user interface the controller talks to.
///
/// Only `get_human_turn` is required; the display hooks default to doing nothing.
///
pub trait FrontEnd {
    /// Blocks until the human playing `player` picks a column or quits.
    fn get_human_turn(&mut self, game: &Game, player: PlayerId) -> HumanTurn;

    fn visualise_state(&mut self, _game: &Game) {}

    /// Called when a human's column was refused; the controller asks again afterwards.
    fn reject_move(&mut self, _error: &C4Error) {}

    fn announce_outcome(&mut self, _game: &Game, _outcome: Outcome) {}

    /// Polled by `Game::play` before every turn; true abandons the match.
    fn wants_quit(&mut self) -> bool {
        false
    }
}

pub struct Game {
    board: Board,
    players: [Player; 2],
    status: Status,
    aborted: bool,
}

impl Game {
    ///
    /// Starts a match on an empty board. `one` and `two` must carry the identities
    /// `PlayerId::One` and `PlayerId::Two`.
    ///
    pub fn new(one: Player, two: Player, first: PlayerId) -> Result<Game, C4Error> {
        Game::from_board(Board::new(), one, two, first)
    }

    /// Starts a match from an existing position, with `next` to move.
    pub fn from_board(
        board: Board,
        one: Player,
        two: Player,
        next: PlayerId,
    ) -> Result<Game, C4Error> {
        if one.id() == two.id() {
            return Err(C4Error::DuplicatePlayer(one.id()));
        }
        let players = match one.id() {
            PlayerId::One => [one, two],
            PlayerId::Two => [two, one],
        };
        Ok(Game {
            board,
            players,
            status: Status::InProgress(next),
            aborted: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Next mover while the game runs, winner once it is won, nobody after a draw.
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.status {
            Status::InProgress(player) | Status::Won(player) => Some(player),
            Status::Drawn => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.aborted || !matches!(self.status, Status::InProgress(_))
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Records that the match was abandoned. No further moves are accepted.
    pub fn abort(&mut self) {
        info!("Game aborted");
        self.aborted = true;
    }

    ///
    /// Checks the token that just landed at (`row`, `column`) and advances the status:
    /// the mover wins on a four, a full board draws, otherwise the other player is next.
    /// Returns whether the game has ended. A game already decided or abandoned is left as it is.
    ///
    pub fn is_terminal_after_move(&mut self, row: usize, column: usize) -> bool {
        if self.is_over() {
            return true;
        }
        let mover = match self.board.get(row, column) {
            C4Cell::Filled(mover) => mover,
            C4Cell::Empty => panic!("no token at ({}, {}) to check", row, column),
        };
        self.status = match check_move(&self.board, row, column) {
            MoveResult::Win(winner) => Status::Won(winner),
            MoveResult::Draw => Status::Drawn,
            MoveResult::Ongoing => Status::InProgress(mover.other()),
        };
        !matches!(self.status, Status::InProgress(_))
    }

    ///
    /// Drops the current player's token into `column`.
    ///
    /// A column off the board or already full is refused without touching the game.
    ///
    pub fn submit_move(&mut self, column: usize) -> Result<Status, C4Error> {
        let mover = match self.status {
            Status::InProgress(mover) if !self.aborted => mover,
            _ => return Err(C4Error::GameOver),
        };
        if column >= BOARD_WIDTH {
            return Err(C4Error::ColumnOutOfRange { column });
        }
        let row = self
            .board
            .lowest_open_row(column)
            .ok_or(C4Error::ColumnFull { column })?;
        self.board.set_cell(row, column, C4Cell::Filled(mover));
        debug!("{:?} drops into column {} (row {})", mover, column, row);
        self.is_terminal_after_move(row, column);
        Ok(self.status)
    }

    ///
    /// Plays one move for whoever is next, asking `front_end` if they are human.
    ///
    /// Illegal human columns are reported back and asked for again. Returns the outcome
    /// once the move ended the game, `None` if play goes on.
    ///
    pub fn play_turn(
        &mut self,
        front_end: &mut dyn FrontEnd,
    ) -> Result<Option<Outcome>, C4Error> {
        if self.aborted {
            return Ok(Some(Outcome::Aborted));
        }
        let mover = match self.status {
            Status::InProgress(mover) => mover,
            Status::Won(winner) => return Ok(Some(Outcome::Won(winner))),
            Status::Drawn => return Ok(Some(Outcome::Drawn)),
        };

        match self.player(mover).strategy() {
            Strategy::Computer(difficulty) => {
                debug!(
                    "{:?} searching at level {} (depth {})",
                    mover,
                    difficulty.level(),
                    difficulty.depth()
                );
                let column = choose_move(&mut self.board, mover, difficulty)?;
                self.submit_move(column)?;
            }
            Strategy::Human => loop {
                match front_end.get_human_turn(self, mover) {
                    HumanTurn::Quit => {
                        self.abort();
                        return Ok(Some(Outcome::Aborted));
                    }
                    HumanTurn::Drop(column) => match self.submit_move(column) {
                        Ok(_) => break,
                        Err(error) if error.is_illegal_move() => {
                            warn!("{:?} tried column {}: {}", mover, column, error);
                            front_end.reject_move(&error);
                        }
                        Err(error) => return Err(error),
                    },
                }
            },
        }

        Ok(match self.status {
            Status::InProgress(_) => None,
            Status::Won(winner) => Some(Outcome::Won(winner)),
            Status::Drawn => Some(Outcome::Drawn),
        })
    }

    ///
    /// Runs turns until the game is won, drawn or abandoned, then tells the front end.
    /// The front end may abandon the match between turns through `wants_quit`.
    ///
    pub fn play(&mut self, front_end: &mut dyn FrontEnd) -> Result<Outcome, C4Error> {
        front_end.visualise_state(self);
        let outcome = loop {
            if !self.is_over() && front_end.wants_quit() {
                self.abort();
                break Outcome::Aborted;
            }
            let turn = self.play_turn(front_end)?;
            if turn != Some(Outcome::Aborted) {
                front_end.visualise_state(self);
            }
            if let Some(outcome) = turn {
                break outcome;
            }
        };
        info!("Game finished: {:?}", outcome);
        front_end.announce_outcome(self, outcome);
        Ok(outcome)
    }
}
