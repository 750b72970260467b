//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Highest ball total a count can show before the plate appearance ends
pub const MAX_BALLS: u8 = 3;

/// Highest strike total a count can show before the plate appearance ends
pub const MAX_STRIKES: u8 = 2;

/// Ball-strike state of a plate appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    /// Every reachable count, in the order the result tables display them
    pub const ALL: [Count; 12] = [
        Count { balls: 0, strikes: 2 },
        Count { balls: 1, strikes: 2 },
        Count { balls: 2, strikes: 2 },
        Count { balls: 3, strikes: 2 },
        Count { balls: 0, strikes: 1 },
        Count { balls: 1, strikes: 1 },
        Count { balls: 2, strikes: 1 },
        Count { balls: 3, strikes: 1 },
        Count { balls: 0, strikes: 0 },
        Count { balls: 1, strikes: 0 },
        Count { balls: 2, strikes: 0 },
        Count { balls: 3, strikes: 0 },
    ];

    pub fn new(balls: u8, strikes: u8) -> Result<Self> {
        if balls > MAX_BALLS || strikes > MAX_STRIKES {
            return Err(EngineError::InvalidCount { balls, strikes });
        }
        Ok(Self { balls, strikes })
    }

    /// Label in `(balls-strikes)` form, e.g. `(1-2)`
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Position of this count in [`Count::ALL`]
    pub fn display_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{})", self.balls, self.strikes)
    }
}

impl FromStr for Count {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || EngineError::InvalidCountLabel(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(bad)?;
        let (balls, strikes) = inner.split_once('-').ok_or_else(bad)?;
        let balls: u8 = balls.trim().parse().map_err(|_| bad())?;
        let strikes: u8 = strikes.trim().parse().map_err(|_| bad())?;

        Count::new(balls, strikes)
    }
}

/// Throwing or batting hand of the opposing player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Handedness {
    #[serde(rename = "lefty")]
    Left,
    #[serde(rename = "righty")]
    Right,
}

impl Handedness {
    pub const ALL: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    /// Key used by the source payloads
    pub fn key(&self) -> &'static str {
        match self {
            Handedness::Left => "lefty",
            Handedness::Right => "righty",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => write!(f, "vs LH"),
            Handedness::Right => write!(f, "vs RH"),
        }
    }
}

/// Which participant's card governs the play result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    Pitcher,
    Batter,
}

impl fmt::Display for CardSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSide::Pitcher => write!(f, "pitcher"),
            CardSide::Batter => write!(f, "batter"),
        }
    }
}
