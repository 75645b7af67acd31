//! Core domain types for the shootout.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Distance tier of an attempt, chosen once per turn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ShotType {
    /// Close to the rim.
    Near,
    /// Mid range.
    Mid,
    /// Long range.
    Far,
}

impl ShotType {
    /// Every shot type, nearest first.
    pub const ALL: [ShotType; 3] = [ShotType::Near, ShotType::Mid, ShotType::Far];
}

/// Which of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PlayerSlot {
    /// Shoots first.
    One,
    /// Shoots second.
    Two,
}

impl PlayerSlot {
    /// Returns the other slot.
    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Array index of this slot.
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

/// A shooter and their running tally.
///
/// Scores only change through [`TurnController`](super::TurnController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u32,
    attempts: u32,
    makes: u32,
}

impl Player {
    /// Creates a player with no score.
    #[instrument(skip(name))]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            attempts: 0,
            makes: 0,
        }
    }

    /// Creates a player with a preset score, for finished-match bookkeeping.
    pub fn with_score(name: impl Into<String>, score: u32) -> Self {
        Self {
            score,
            ..Self::new(name)
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Points scored so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Shots taken.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Shots made.
    pub fn makes(&self) -> u32 {
        self.makes
    }

    /// Records one resolved attempt.
    pub(super) fn record_attempt(&mut self, made: bool, points: u32) {
        self.attempts += 1;
        if made {
            self.makes += 1;
            self.score = self.score.saturating_add(points);
        }
    }
}

/// Phase of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TurnState {
    /// Active player picks a shot type.
    AwaitingShotSelection,
    /// Shot chosen; the meter is armed or sweeping.
    ChargingPower,
    /// Power captured; the shot has not been rolled yet.
    Resolving,
    /// Shot rolled; waiting for the handoff.
    AwaitingNextTurn,
    /// End condition met.
    GameOver,
}
