//! In-memory burner board: the live copy of the burner grid that the
//! dashboard reads from, optimistically updated on write intents and
//! reconciled by change notifications.

pub mod analytics;
pub mod listener;
mod state;

pub use state::{BurnerBoard, MergeOutcome};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::burners;

/// Fixed grid geometry of the reformer: 4 walls x 6 rows x 15 burners.
pub const GRID_ROWS: i16 = 6;
pub const BURNERS_PER_ROW: i16 = 15;
pub const TOTAL_BURNERS: usize =
    Wall::ALL.len() * GRID_ROWS as usize * BURNERS_PER_ROW as usize;

/// One of the four reformer walls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Wall {
    A,
    B,
    C,
    D,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::A, Wall::B, Wall::C, Wall::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Wall::A => "A",
            Wall::B => "B",
            Wall::C => "C",
            Wall::D => "D",
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wall {
    type Err = InvalidBurner;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Wall::A),
            "B" | "b" => Ok(Wall::B),
            "C" | "c" => Ok(Wall::C),
            "D" | "d" => Ok(Wall::D),
            other => Err(InvalidBurner::Wall(other.to_string())),
        }
    }
}

/// Operating mode of a single burner. Stored as a one-letter code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnerState {
    /// Dual fuel
    Both,
    /// Natural gas only
    NgOnly,
    /// Off-gas only
    OffGas,
    /// Capped (off)
    Capped,
}

impl BurnerState {
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            BurnerState::Both => "B",
            BurnerState::NgOnly => "N",
            BurnerState::OffGas => "O",
            BurnerState::Capped => "C",
        }
    }
}

impl FromStr for BurnerState {
    type Err = InvalidBurner;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" | "b" => Ok(BurnerState::Both),
            "N" | "n" => Ok(BurnerState::NgOnly),
            "O" | "o" => Ok(BurnerState::OffGas),
            "C" | "c" => Ok(BurnerState::Capped),
            other => Err(InvalidBurner::State(other.to_string())),
        }
    }
}

/// Composite key of a burner position. Ordering matches the canonical
/// listing order: wall, then row, then burner number, all ascending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BurnerKey {
    pub wall: Wall,
    pub row: i16,
    pub burner_num: i16,
}

impl BurnerKey {
    /// Build a key, rejecting positions outside the fixed grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBurner` if the row or burner number is out of range.
    pub fn new(wall: Wall, row: i16, burner_num: i16) -> Result<Self, InvalidBurner> {
        if !(1..=GRID_ROWS).contains(&row) {
            return Err(InvalidBurner::Row(row));
        }
        if !(1..=BURNERS_PER_ROW).contains(&burner_num) {
            return Err(InvalidBurner::BurnerNum(burner_num));
        }
        Ok(Self {
            wall,
            row,
            burner_num,
        })
    }
}

impl fmt::Display for BurnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/R{}/B{}", self.wall, self.row, self.burner_num)
    }
}

impl TryFrom<&burners::Model> for BurnerKey {
    type Error = InvalidBurner;

    fn try_from(row: &burners::Model) -> Result<Self, Self::Error> {
        BurnerKey::new(row.wall.parse()?, row.row, row.burner_num)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidBurner {
    #[error("unknown wall '{0}', expected A-D")]
    Wall(String),
    #[error("row {0} out of range 1-{GRID_ROWS}")]
    Row(i16),
    #[error("burner number {0} out of range 1-{BURNERS_PER_ROW}")]
    BurnerNum(i16),
    #[error("unknown burner state '{0}', expected B, N, O or C")]
    State(String),
}

/// Payload of the change-notification channel: the full post-update row.
#[derive(Clone, Debug)]
pub struct BurnerChange {
    pub row: burners::Model,
}
