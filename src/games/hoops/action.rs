//! Input events and the actions they map to.
//!
//! Inputs are domain events, not key presses. The presentation layer
//! translates its own keys or clicks into [`InputEvent`]s.

use super::types::{ShotType, TurnState};
use serde::{Deserialize, Serialize};

/// An event from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pick the shot for this turn.
    SelectShotType(ShotType),
    /// Start the meter sweep.
    StartCharging,
    /// Stop the meter and shoot.
    StopCharging,
    /// One frame elapsed.
    AdvanceFrame,
    /// Hand the ball to the other player.
    EndTurn,
}

/// A controller operation, named in rejection errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum TurnAction {
    /// `choose_shot_type`.
    #[display("choose a shot type")]
    ChooseShotType,
    /// `start_charging`.
    #[display("start charging")]
    StartCharging,
    /// `stop_charging`.
    #[display("stop charging")]
    StopCharging,
    /// `check_shot_result`.
    #[display("check the shot result")]
    CheckShotResult,
    /// `set_next_player`.
    #[display("hand over the turn")]
    SetNextPlayer,
    /// `cancel_shot`.
    #[display("cancel the shot")]
    CancelShot,
    /// `rematch`.
    #[display("start a rematch")]
    Rematch,
}

/// Error that can occur when driving a turn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The action is not allowed in the current state. Nothing changed.
    #[display("Cannot {} while {}", action, state)]
    InvalidTransition {
        /// What was attempted.
        action: TurnAction,
        /// State at the time.
        state: TurnState,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for TurnError {}

impl TurnError {
    /// Builds an invalid-transition error.
    pub fn invalid(action: TurnAction, state: TurnState) -> Self {
        TurnError::InvalidTransition { action, state }
    }

    /// True when the call was merely out of order.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, TurnError::InvalidTransition { .. })
    }
}
