//! Final result of a match.

use super::types::PlayerSlot;
use serde::{Deserialize, Serialize};

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One player finished with the strictly higher score.
    Winner(PlayerSlot),
    /// Both players finished level.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerSlot> {
        match self {
            Outcome::Winner(slot) => Some(*slot),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the match was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(slot) => write!(f, "Player {} wins", slot),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
