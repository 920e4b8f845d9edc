use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::yap::YapId;
use crate::validation::ValidationError;

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Contribution of this vote to a yap's score.
    pub fn weight(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    pub fn is_up(self) -> bool {
        matches!(self, Direction::Up)
    }

    /// Inverse of [`Direction::is_up`], used when reading the ledger's boolean column.
    pub fn from_up(up: bool) -> Self {
        if up { Direction::Up } else { Direction::Down }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(ValidationError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cast opinion on a yap. Votes are appended to the ledger and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub yap_id: YapId,
    pub direction: Direction,
}

impl Vote {
    pub fn new(yap_id: YapId, direction: Direction) -> Self {
        Self { yap_id, direction }
    }
}
