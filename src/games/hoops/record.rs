//! In-memory shot log for the current match.

use super::shot_model::ShotRoll;
use super::types::{PlayerSlot, ShotType};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One resolved attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
pub struct ShotRecord {
    /// 1-based turn number across both players.
    pub turn: u32,
    /// Who shot.
    pub shooter: PlayerSlot,
    /// What was attempted.
    pub shot: ShotType,
    /// Power captured from the meter, before clamping.
    pub power: i32,
    /// The roll against the make percentage.
    pub roll: ShotRoll,
    /// Points added to the shooter's score.
    pub points: u32,
}

impl ShotRecord {
    /// Whether the shot went in.
    pub fn made(&self) -> bool {
        self.roll.made
    }
}

impl std::fmt::Display for ShotRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.made() { "made" } else { "missed" };
        write!(
            f,
            "Turn {}: player {} {} a {} shot at power {} ({:.0}%)",
            self.turn, self.shooter, verdict, self.shot, self.power, self.roll.make_percentage
        )
    }
}
