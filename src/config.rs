use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::C4Error;
use crate::player::{Difficulty, Player, PlayerId};

///
/// Search depth for each difficulty level a front end offers, level 1 first.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTable {
    depths: Vec<usize>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        DifficultyTable {
            depths: vec![1, 3, 5, 7],
        }
    }
}

impl DifficultyTable {
    /// Reads a JSON list of depths, e.g. `[2, 4, 6]`.
    pub fn from_file(path: &Path) -> Result<Self, C4Error> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn levels(&self) -> u8 {
        self.depths.len().min(u8::MAX as usize) as u8
    }

    pub fn difficulty(&self, level: u8) -> Result<Difficulty, C4Error> {
        let depth = (level as usize)
            .checked_sub(1)
            .and_then(|index| self.depths.get(index))
            .ok_or(C4Error::InvalidDifficulty { level })?;
        Difficulty::new(level, *depth)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PlayerSettings {
    Human,
    Computer { depth: usize },
}

impl PlayerSettings {
    pub fn player(&self, id: PlayerId) -> Result<Player, C4Error> {
        match self {
            PlayerSettings::Human => Ok(Player::human(id)),
            PlayerSettings::Computer { depth } => {
                Ok(Player::computer(id, Difficulty::from_depth(*depth)?))
            }
        }
    }
}

fn first_default() -> PlayerId {
    PlayerId::One
}

/// Settings for a batch of computer matches.
#[derive(Debug, Deserialize, Clone)]
pub struct ArenaSettings {
    pub episodes: usize,
    pub players: [PlayerSettings; 2],
    #[serde(default = "first_default")]
    pub first: PlayerId,
    /// Random moves played before the engines take over, to vary the games.
    #[serde(default)]
    pub random_openings: usize,
}

impl ArenaSettings {
    pub fn from_file(path: &Path) -> Result<Self, C4Error> {
        let text = fs::read_to_string(path)?;
        let settings: ArenaSettings = serde_json::from_str(&text)?;
        if settings.players.contains(&PlayerSettings::Human) {
            return Err(C4Error::HumanInHeadlessMatch);
        }
        Ok(settings)
    }
}
