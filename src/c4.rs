pub mod board;
pub mod heuristic;
pub mod win;

pub use board::{Board, C4Cell, BOARD_HEIGHT, BOARD_WIDTH, CELL_COUNT};
pub use heuristic::evaluate;
pub use win::{check_move, is_aligned, MoveResult};
