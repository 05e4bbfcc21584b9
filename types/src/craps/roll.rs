use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use super::is_point_number;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("die face must be 1-6 (got {0})")]
    InvalidFace(u8),
}

/// One throw of the two dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub die1: u8,
    pub die2: u8,
    pub total: u8,
    pub is_hard: bool,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl Roll {
    /// Build a roll from two faces, rejecting anything outside 1-6.
    pub fn new(die1: u8, die2: u8) -> Result<Self, RollError> {
        for die in [die1, die2] {
            if !(1..=6).contains(&die) {
                return Err(RollError::InvalidFace(die));
            }
        }
        Ok(Self::from_dice(die1, die2))
    }

    /// Build a roll without validating the faces.
    ///
    /// Used by dice sources, whose output the state machine checks again.
    pub fn from_dice(die1: u8, die2: u8) -> Self {
        Self {
            die1,
            die2,
            total: die1.saturating_add(die2),
            is_hard: die1 == die2,
            timestamp: now_millis(),
        }
    }

    pub fn is_seven(&self) -> bool {
        self.total == 7
    }

    /// 2, 3 or 12
    pub fn is_craps(&self) -> bool {
        matches!(self.total, 2 | 3 | 12)
    }

    /// 7 or 11
    pub fn is_natural(&self) -> bool {
        matches!(self.total, 7 | 11)
    }

    pub fn is_point_number(&self) -> bool {
        is_point_number(self.total)
    }

    /// True if both faces are in range and the derived fields agree with them.
    pub fn is_consistent(&self) -> bool {
        (1..=6).contains(&self.die1)
            && (1..=6).contains(&self.die2)
            && self.total == self.die1 + self.die2
            && self.is_hard == (self.die1 == self.die2)
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.die1, self.die2, self.total)?;
        if self.is_hard && matches!(self.total, 4 | 6 | 8 | 10) {
            write!(f, " hard")?;
        }
        Ok(())
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
