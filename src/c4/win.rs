use super::board::{Board, C4Cell};
use crate::player::PlayerId;

/// The four line directions a run can take: horizontal, vertical, `\` and `/`.
pub const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveResult {
    Win(PlayerId),
    Draw,
    Ongoing,
}

///
/// True when the token at (`row`, `column`) is one of four identical tokens in a row
/// along the line with direction (`row_step`, `column_step`).
///
/// Every window of four covering the cell is tested, so the answer is the same
/// whichever token of the run is asked about, and for a direction or its mirror.
///
pub fn is_aligned(
    board: &Board,
    row: usize,
    column: usize,
    row_step: isize,
    column_step: isize,
) -> bool {
    let owner = board.get(row, column);
    if owner == C4Cell::Empty {
        return false;
    }
    let (row, column) = (row as isize, column as isize);
    (-3..=0).any(|start: isize| {
        (start..start + 4).all(|offset| {
            board.probe(row + offset * row_step, column + offset * column_step) == Some(owner)
        })
    })
}

///
/// Classifies the position after a token landed at (`row`, `column`).
///
/// A four through that token wins for its owner, even on a board the move just filled;
/// several fours at once are still a single win.
///
pub fn check_move(board: &Board, row: usize, column: usize) -> MoveResult {
    if let C4Cell::Filled(mover) = board.get(row, column) {
        if AXES
            .iter()
            .any(|&(row_step, column_step)| is_aligned(board, row, column, row_step, column_step))
        {
            return MoveResult::Win(mover);
        }
    }
    if board.is_full() {
        MoveResult::Draw
    } else {
        MoveResult::Ongoing
    }
}
