use crate::player::PlayerId;

/// Errors surfaced by the game engine and its front ends.
#[derive(Debug, thiserror::Error)]
pub enum C4Error {
    #[error("column {column} is out of range")]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("the game is already over")]
    GameOver,

    #[error("no legal move: the board is full")]
    NoLegalMove,

    #[error("unknown difficulty level {level}")]
    InvalidDifficulty { level: u8 },

    #[error("search depth must be at least 1")]
    InvalidDepth,

    #[error("both players were given the identity {0:?}")]
    DuplicatePlayer(PlayerId),

    #[error("a human player cannot take part in a headless match")]
    HumanInHeadlessMatch,

    #[error("invalid board: {0}")]
    BoardParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("window error: {0}")]
    Window(String),
}

impl C4Error {
    /// True for the errors a front end answers by asking for another column.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            C4Error::ColumnOutOfRange { .. } | C4Error::ColumnFull { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = C4Error::ColumnFull { column: 3 };
        assert_eq!(err.to_string(), "column 3 is full");
        assert!(err.is_illegal_move());
    }

    #[test]
    fn test_other_errors_are_not_illegal_moves() {
        assert!(!C4Error::GameOver.is_illegal_move());
        assert!(!C4Error::NoLegalMove.is_illegal_move());
        assert_eq!(
            C4Error::InvalidDifficulty { level: 9 }.to_string(),
            "unknown difficulty level 9"
        );
    }
}
