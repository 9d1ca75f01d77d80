use serde::Deserialize;

use crate::error::C4Error;

/// Which seat a token or a player belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Character used for this player's tokens in the text board.
    pub fn symbol(self) -> char {
        match self {
            PlayerId::One => 'X',
            PlayerId::Two => 'O',
        }
    }
}

/// A computer player's strength: the level a front end offered and the search depth it maps to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Difficulty {
    level: u8,
    depth: usize,
}

impl Difficulty {
    pub fn new(level: u8, depth: usize) -> Result<Difficulty, C4Error> {
        if depth == 0 {
            return Err(C4Error::InvalidDepth);
        }
        Ok(Difficulty { level, depth })
    }

    /// A difficulty given directly as a depth, with no table level attached.
    pub fn from_depth(depth: usize) -> Result<Difficulty, C4Error> {
        Difficulty::new(0, depth)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Strategy {
    /// Moves come from the front end.
    Human,
    /// Moves come from the search engine.
    Computer(Difficulty),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Player {
    id: PlayerId,
    strategy: Strategy,
}

impl Player {
    pub fn human(id: PlayerId) -> Player {
        Player {
            id,
            strategy: Strategy::Human,
        }
    }

    pub fn computer(id: PlayerId, difficulty: Difficulty) -> Player {
        Player {
            id,
            strategy: Strategy::Computer(difficulty),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn is_human(&self) -> bool {
        self.strategy == Strategy::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(Difficulty::new(1, 0), Err(C4Error::InvalidDepth)));
        assert_eq!(Difficulty::from_depth(3).unwrap().depth(), 3);
    }

    #[test]
    fn test_player_strategy() {
        let human = Player::human(PlayerId::One);
        assert!(human.is_human());
        let computer = Player::computer(PlayerId::Two, Difficulty::new(2, 3).unwrap());
        assert!(!computer.is_human());
        assert_eq!(computer.id(), PlayerId::Two);
        match computer.strategy() {
            Strategy::Computer(difficulty) => assert_eq!(difficulty.level(), 2),
            Strategy::Human => panic!("expected a computer strategy"),
        }
    }
}
