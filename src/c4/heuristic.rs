//! Static evaluation used at the search horizon.
//!
//! Every token is scored by its eight surrounding cells: own tokens are worth 2,
//! empty cells 1, and opponent tokens or the outside of the board nothing.
use super::board::{Board, C4Cell};
use crate::player::PlayerId;

pub fn cell_weight(board: &Board, row: isize, column: isize, perspective: PlayerId) -> i32 {
    match board.probe(row, column) {
        None => 0,
        Some(C4Cell::Empty) => 1,
        Some(C4Cell::Filled(owner)) if owner == perspective => 2,
        Some(C4Cell::Filled(_)) => 0,
    }
}

/// Sum of the weights of the Moore neighbourhood around (`row`, `column`).
pub fn neighbourhood_score(
    board: &Board,
    row: usize,
    column: usize,
    perspective: PlayerId,
) -> i32 {
    let (row, column) = (row as isize, column as isize);
    let mut score = 0;
    for row_offset in -1..=1 {
        for column_offset in -1..=1 {
            if row_offset == 0 && column_offset == 0 {
                continue;
            }
            score += cell_weight(board, row + row_offset, column + column_offset, perspective);
        }
    }
    score
}

pub fn player_score(board: &Board, player: PlayerId) -> i32 {
    board
        .cells_of(player)
        .map(|(row, column)| neighbourhood_score(board, row, column, player))
        .sum()
}

///
/// The opponent's score minus `perspective`'s own.
///
/// Lower is better for `perspective`: the search minimises this value for the mover.
///
pub fn evaluate(board: &Board, perspective: PlayerId) -> i32 {
    player_score(board, perspective.other()) - player_score(board, perspective)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX_TOKENS: &str = "
        .......
        .......
        .......
        .......
        ..X....
        .XOOO.X";

    const ELEVEN_TOKENS: &str = "
        .......
        .......
        ..X....
        ..OO...
        ..XX...
        .XOXOOX";

    #[test]
    fn test_cell_weight() {
        let board: Board = SIX_TOKENS.parse().unwrap();
        assert_eq!(cell_weight(&board, 6, 0, PlayerId::One), 0);
        assert_eq!(cell_weight(&board, 2, 7, PlayerId::One), 0);
        assert_eq!(cell_weight(&board, 5, 0, PlayerId::One), 1);
        assert_eq!(cell_weight(&board, 5, 1, PlayerId::One), 2);
        assert_eq!(cell_weight(&board, 4, 2, PlayerId::One), 2);
        assert_eq!(cell_weight(&board, 5, 2, PlayerId::One), 0);

        assert_eq!(cell_weight(&board, 5, 5, PlayerId::Two), 1);
        assert_eq!(cell_weight(&board, 5, 1, PlayerId::Two), 0);
        assert_eq!(cell_weight(&board, 5, 3, PlayerId::Two), 2);
        assert_eq!(cell_weight(&board, 5, 6, PlayerId::Two), 0);
    }

    #[test]
    fn test_neighbourhood_six_tokens() {
        let board: Board = SIX_TOKENS.parse().unwrap();
        assert_eq!(neighbourhood_score(&board, 5, 1, PlayerId::One), 5);
        assert_eq!(neighbourhood_score(&board, 4, 2, PlayerId::One), 7);
        assert_eq!(neighbourhood_score(&board, 5, 6, PlayerId::One), 3);

        assert_eq!(neighbourhood_score(&board, 5, 2, PlayerId::Two), 4);
        assert_eq!(neighbourhood_score(&board, 5, 3, PlayerId::Two), 6);
        assert_eq!(neighbourhood_score(&board, 5, 4, PlayerId::Two), 6);
    }

    #[test]
    fn test_scores_six_tokens() {
        let board: Board = SIX_TOKENS.parse().unwrap();
        assert_eq!(player_score(&board, PlayerId::One), 15);
        assert_eq!(player_score(&board, PlayerId::Two), 16);
        assert_eq!(evaluate(&board, PlayerId::One), 1);
        assert_eq!(evaluate(&board, PlayerId::Two), -1);
    }

    #[test]
    fn test_neighbourhood_eleven_tokens() {
        let board: Board = ELEVEN_TOKENS.parse().unwrap();
        assert_eq!(neighbourhood_score(&board, 5, 1, PlayerId::One), 5);
        assert_eq!(neighbourhood_score(&board, 4, 2, PlayerId::One), 8);
        assert_eq!(neighbourhood_score(&board, 2, 2, PlayerId::One), 6);
        assert_eq!(neighbourhood_score(&board, 5, 3, PlayerId::One), 5);
        assert_eq!(neighbourhood_score(&board, 4, 3, PlayerId::One), 6);
        assert_eq!(neighbourhood_score(&board, 5, 6, PlayerId::One), 2);

        assert_eq!(neighbourhood_score(&board, 5, 2, PlayerId::Two), 1);
        assert_eq!(neighbourhood_score(&board, 3, 2, PlayerId::Two), 6);
        assert_eq!(neighbourhood_score(&board, 3, 3, PlayerId::Two), 6);
        assert_eq!(neighbourhood_score(&board, 5, 4, PlayerId::Two), 4);
        assert_eq!(neighbourhood_score(&board, 5, 5, PlayerId::Two), 5);
    }

    #[test]
    fn test_scores_eleven_tokens() {
        let board: Board = ELEVEN_TOKENS.parse().unwrap();
        assert_eq!(player_score(&board, PlayerId::One), 32);
        assert_eq!(player_score(&board, PlayerId::Two), 22);
        assert_eq!(evaluate(&board, PlayerId::One), -10);
        assert_eq!(evaluate(&board, PlayerId::Two), 10);
    }

    #[test]
    fn test_empty_board_is_even() {
        let board = Board::new();
        assert_eq!(evaluate(&board, PlayerId::One), 0);
        assert_eq!(evaluate(&board, PlayerId::Two), 0);
    }

    #[test]
    fn test_zero_sum() {
        let board: Board = ".......\n.......\n.......\n.......\n...O...\n..XXO.."
            .parse()
            .unwrap();
        assert_eq!(
            evaluate(&board, PlayerId::One),
            -evaluate(&board, PlayerId::Two)
        );
    }
}
