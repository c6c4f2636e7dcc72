use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 10;

/// Difficulty presets offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
    God,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Easy,
        Level::Medium,
        Level::Hard,
        Level::VeryHard,
        Level::God,
    ];

    pub fn depth(self) -> u8 {
        match self {
            Level::Easy => 2,
            Level::Medium => 3,
            Level::Hard => 4,
            Level::VeryHard => 5,
            Level::God => 6,
        }
    }

    /// Easy picks uniformly among equally scored root moves.
    pub fn randomizes_ties(self) -> bool {
        matches!(self, Level::Easy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
            Level::VeryHard => "very-hard",
            Level::God => "god",
        }
    }
}

impl FromStr for Level {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_depth(depth: u8) -> Result<u8, EngineError> {
    if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(EngineError::InvalidDepth(depth))
    }
}
