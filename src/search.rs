//! Depth-bounded negamax over the shared board.
//!
//! Scores are costs to the player moving at that node (see `heuristic::evaluate`):
//! each ply picks the cheapest column, and a reply's cost is negated on the way up.
use crate::c4::{check_move, evaluate, Board, C4Cell, MoveResult, BOARD_WIDTH};
use crate::error::C4Error;
use crate::player::{Difficulty, PlayerId};
use log::{debug, trace};
use std::ops::{Deref, DerefMut};

/// Magnitude of a decided game, well beyond any heuristic score.
pub const WIN_SCORE: i32 = 100_000;

///
/// A token placed for exploration. It is taken back off the board when the guard drops,
/// so every way out of a branch leaves the board as it was.
///
struct TrialMove<'a> {
    board: &'a mut Board,
    row: usize,
    column: usize,
}

impl<'a> TrialMove<'a> {
    fn play(board: &'a mut Board, column: usize, mover: PlayerId) -> Option<TrialMove<'a>> {
        let row = board.lowest_open_row(column)?;
        board.set_cell(row, column, C4Cell::Filled(mover));
        Some(TrialMove { board, row, column })
    }
}

impl Deref for TrialMove<'_> {
    type Target = Board;
    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.clear_cell(self.row, self.column);
    }
}

///
/// Cost to `mover` of dropping into `column`, looking `depth` plies ahead.
/// `None` when the column is full.
///
fn move_cost(board: &mut Board, mover: PlayerId, column: usize, depth: usize) -> Option<i32> {
    let mut trial = TrialMove::play(board, column, mover)?;
    let row = trial.row;
    let cost = match check_move(&trial, row, column) {
        // Nearer wins cost less, nearer losses cost more.
        MoveResult::Win(_) => -(WIN_SCORE + depth as i32),
        MoveResult::Draw => evaluate(&trial, mover),
        MoveResult::Ongoing if depth <= 1 => evaluate(&trial, mover),
        MoveResult::Ongoing => match best_move(&mut trial, mover.other(), depth - 1) {
            Some((_, reply_cost)) => -reply_cost,
            None => evaluate(&trial, mover),
        },
    };
    trace!(
        "depth {} {:?} column {} cost {}",
        depth,
        mover,
        column,
        cost
    );
    Some(cost)
}

/// Cheapest column for `mover` and its cost; ties go to the leftmost column.
fn best_move(board: &mut Board, mover: PlayerId, depth: usize) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for column in 0..BOARD_WIDTH {
        if let Some(cost) = move_cost(board, mover, column, depth) {
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((column, cost));
            }
        }
    }
    best
}

///
/// Picks the column `mover` should play, searching as deep as `difficulty` allows.
///
/// The board is borrowed mutably for trial moves but is identical on return.
///
pub fn choose_move(
    board: &mut Board,
    mover: PlayerId,
    difficulty: Difficulty,
) -> Result<usize, C4Error> {
    let tokens_before = board.token_count();
    let (column, cost) =
        best_move(board, mover, difficulty.depth()).ok_or(C4Error::NoLegalMove)?;
    debug_assert_eq!(board.token_count(), tokens_before);
    debug!(
        "{:?} chooses column {} at depth {} (cost {})",
        mover,
        column,
        difficulty.depth(),
        cost
    );
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(depth: usize) -> Difficulty {
        Difficulty::from_depth(depth).unwrap()
    }

    #[test]
    fn test_empty_board_depth_one() {
        // Corner columns only touch three cells, the rest five; leftmost of the best wins.
        let mut board = Board::new();
        assert_eq!(choose_move(&mut board, PlayerId::One, depth(1)).unwrap(), 1);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board: Board = ".......\n.......\n.......\n.......\nOO.....\nXXX.O.."
            .parse()
            .unwrap();
        for d in 1..=3 {
            assert_eq!(choose_move(&mut board, PlayerId::One, depth(d)).unwrap(), 3);
        }
    }

    #[test]
    fn test_blocks_opponent_win() {
        let mut board: Board = ".......\n.......\n.......\n.......\n.X.....\nOOO.X.X"
            .parse()
            .unwrap();
        assert_eq!(choose_move(&mut board, PlayerId::One, depth(2)).unwrap(), 3);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board: Board = ".......\n.......\n..X....\n..OO...\n..XX...\n.XOXOOX"
            .parse()
            .unwrap();
        let before = board.clone();
        choose_move(&mut board, PlayerId::Two, depth(4)).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_deterministic() {
        let mut board: Board = ".......\n.......\n.......\n.......\n...O...\n..XXO.."
            .parse()
            .unwrap();
        let first = choose_move(&mut board, PlayerId::One, depth(3)).unwrap();
        for _ in 0..3 {
            assert_eq!(choose_move(&mut board, PlayerId::One, depth(3)).unwrap(), first);
        }
    }

    #[test]
    fn test_only_open_column() {
        let mut board: Board = "
            XOXO.OX
            XOXOXOX
            OXOXOXO
            OXOXOXO
            XOXOXOX
            XOXOXOX"
            .parse()
            .unwrap();
        assert_eq!(choose_move(&mut board, PlayerId::One, depth(3)).unwrap(), 4);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board: Board = "
            XOXOXOX
            XOXOXOX
            OXOXOXO
            OXOXOXO
            XOXOXOX
            XOXOXOX"
            .parse()
            .unwrap();
        assert!(matches!(
            choose_move(&mut board, PlayerId::One, depth(2)),
            Err(C4Error::NoLegalMove)
        ));
    }
}
