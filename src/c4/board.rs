use std::fmt;
use std::str::FromStr;

use crate::error::C4Error;
use crate::player::PlayerId;

pub const BOARD_WIDTH: usize = 7;
pub const BOARD_HEIGHT: usize = 6;
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum C4Cell {
    Empty,
    Filled(PlayerId),
}

impl C4Cell {
    fn symbol(self) -> char {
        match self {
            C4Cell::Empty => '.',
            C4Cell::Filled(player) => player.symbol(),
        }
    }
}

///
/// The 6x7 grid. Row 0 is the top, row 5 the bottom.
///
/// Tokens never float: a filled cell only ever has filled cells below it.
/// The number of filled cells is kept alongside so fullness is O(1).
///
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [C4Cell; CELL_COUNT],
    tokens: usize,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    pub fn new() -> Board {
        Board {
            cells: [C4Cell::Empty; CELL_COUNT],
            tokens: 0,
        }
    }

    fn index(row: usize, column: usize) -> usize {
        assert!(
            row < BOARD_HEIGHT && column < BOARD_WIDTH,
            "cell ({}, {}) is off the board",
            row,
            column
        );
        row * BOARD_WIDTH + column
    }

    pub fn get(&self, row: usize, column: usize) -> C4Cell {
        self.cells[Board::index(row, column)]
    }

    /// Reads a cell that may lie off the board, as neighbourhood scans do.
    pub fn probe(&self, row: isize, column: isize) -> Option<C4Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row >= BOARD_HEIGHT || column >= BOARD_WIDTH {
            return None;
        }
        Some(self.cells[row * BOARD_WIDTH + column])
    }

    ///
    /// Row a token dropped into `column` would land in, or `None` when the column is full.
    ///
    pub fn lowest_open_row(&self, column: usize) -> Option<usize> {
        (0..BOARD_HEIGHT)
            .rev()
            .find(|&row| self.get(row, column) == C4Cell::Empty)
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.lowest_open_row(column).is_none()
    }

    /// Columns that still accept a token, left to right.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..BOARD_WIDTH)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    ///
    /// Writes a cell directly, keeping the token count in step.
    ///
    /// Callers find the row with `lowest_open_row` first; writing off the board panics.
    ///
    pub fn set_cell(&mut self, row: usize, column: usize, cell: C4Cell) {
        let index = Board::index(row, column);
        match (self.cells[index], cell) {
            (C4Cell::Empty, C4Cell::Filled(_)) => self.tokens += 1,
            (C4Cell::Filled(_), C4Cell::Empty) => self.tokens -= 1,
            _ => {}
        }
        self.cells[index] = cell;
    }

    /// Takes a token back off the board. The cell must hold one.
    pub fn clear_cell(&mut self, row: usize, column: usize) {
        assert!(
            self.get(row, column) != C4Cell::Empty,
            "cell ({}, {}) is already empty",
            row,
            column
        );
        self.set_cell(row, column, C4Cell::Empty);
    }

    pub fn token_count(&self) -> usize {
        self.tokens
    }

    pub fn is_full(&self) -> bool {
        self.tokens == CELL_COUNT
    }

    /// Positions of every token owned by `player`.
    pub fn cells_of(&self, player: PlayerId) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &cell)| cell == C4Cell::Filled(player))
            .map(|(index, _)| (index / BOARD_WIDTH, index % BOARD_WIDTH))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_HEIGHT {
            let line: String = (0..BOARD_WIDTH)
                .map(|column| self.get(row, column).symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = C4Error;

    /// Six lines of seven characters: `.` empty, `X` player one, `O` player two.
    fn from_str(s: &str) -> Result<Board, C4Error> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_HEIGHT {
            return Err(C4Error::BoardParse(format!(
                "expected {} rows, got {}",
                BOARD_HEIGHT,
                rows.len()
            )));
        }

        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != BOARD_WIDTH {
                return Err(C4Error::BoardParse(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    BOARD_WIDTH
                )));
            }
            for (column, symbol) in symbols.into_iter().enumerate() {
                let cell = match symbol {
                    '.' => C4Cell::Empty,
                    'X' => C4Cell::Filled(PlayerId::One),
                    'O' => C4Cell::Filled(PlayerId::Two),
                    other => {
                        return Err(C4Error::BoardParse(format!(
                            "unexpected character '{}' at ({}, {})",
                            other, row, column
                        )))
                    }
                };
                board.set_cell(row, column, cell);
            }
        }

        for column in 0..BOARD_WIDTH {
            for row in 0..BOARD_HEIGHT - 1 {
                if board.get(row, column) != C4Cell::Empty
                    && board.get(row + 1, column) == C4Cell::Empty
                {
                    return Err(C4Error::BoardParse(format!(
                        "token at ({}, {}) is floating",
                        row, column
                    )));
                }
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_drops_to_bottom() {
        let board = Board::new();
        for column in 0..BOARD_WIDTH {
            assert_eq!(board.lowest_open_row(column), Some(BOARD_HEIGHT - 1));
        }
        assert_eq!(board.token_count(), 0);
        assert_eq!(board.legal_columns(), (0..BOARD_WIDTH).collect::<Vec<_>>());
    }

    #[test]
    fn test_place_and_retract_two_tokens() {
        let mut board = Board::new();
        board.set_cell(5, 3, C4Cell::Filled(PlayerId::One));
        assert_eq!(board.lowest_open_row(3), Some(4));
        board.set_cell(4, 3, C4Cell::Filled(PlayerId::Two));
        assert_eq!(board.lowest_open_row(3), Some(3));
        assert_eq!(board.token_count(), 2);

        board.clear_cell(4, 3);
        assert_eq!(board.lowest_open_row(3), Some(4));
        board.clear_cell(5, 3);
        assert_eq!(board.lowest_open_row(3), Some(5));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_overwrite_keeps_count() {
        let mut board = Board::new();
        board.set_cell(5, 0, C4Cell::Filled(PlayerId::One));
        board.set_cell(5, 0, C4Cell::Filled(PlayerId::Two));
        assert_eq!(board.token_count(), 1);
    }

    #[test]
    fn test_full_column() {
        let mut board = Board::new();
        for row in 0..BOARD_HEIGHT {
            board.set_cell(row, 6, C4Cell::Filled(PlayerId::One));
        }
        assert_eq!(board.lowest_open_row(6), None);
        assert!(board.is_column_full(6));
        assert_eq!(board.legal_columns(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic]
    fn test_write_off_board_panics() {
        let mut board = Board::new();
        board.set_cell(BOARD_HEIGHT, 0, C4Cell::Filled(PlayerId::One));
    }

    #[test]
    #[should_panic(expected = "already empty")]
    fn test_clear_empty_cell_panics() {
        let mut board = Board::new();
        board.clear_cell(5, 3);
    }

    #[test]
    fn test_probe_off_board() {
        let board = Board::new();
        assert_eq!(board.probe(-1, 0), None);
        assert_eq!(board.probe(0, BOARD_WIDTH as isize), None);
        assert_eq!(board.probe(5, 6), Some(C4Cell::Empty));
    }

    #[test]
    fn test_parse_and_display() {
        let text = "\
            .......
            .......
            .......
            .......
            ..X....
            .XOOO.X";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.token_count(), 6);
        assert_eq!(board.get(4, 2), C4Cell::Filled(PlayerId::One));
        assert_eq!(board.get(5, 3), C4Cell::Filled(PlayerId::Two));
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_rejects_floating_token() {
        let text = "\
            .......
            .......
            .......
            .......
            ..X....
            .......";
        assert!(matches!(
            text.parse::<Board>(),
            Err(C4Error::BoardParse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!("......".parse::<Board>().is_err());
        let bad_symbol = ".......\n.......\n.......\n.......\n.......\n...Z...";
        assert!(bad_symbol.parse::<Board>().is_err());
    }

    #[test]
    fn test_cells_of() {
        let board: Board = ".......\n.......\n.......\n.......\n..X....\n.XOOO.X"
            .parse()
            .unwrap();
        let ones: Vec<_> = board.cells_of(PlayerId::One).collect();
        assert_eq!(ones, vec![(4, 2), (5, 1), (5, 6)]);
    }
}
