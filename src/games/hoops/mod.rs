//! Two-player basketball shootout.
//!
//! Leaves first: [`ShotModel`] turns shot type and power into a make
//! percentage, [`PowerMeter`] produces the power, and [`TurnController`]
//! runs the turn state machine on top of both.

mod action;
mod controller;
pub mod invariants;
mod phases;
mod power_meter;
mod random;
mod record;
mod rules;
mod shot_model;
mod types;

pub use action::{InputEvent, TurnAction, TurnError};
pub use controller::{MatchSnapshot, TurnController};
pub use phases::Outcome;
pub use power_meter::{MeterError, MeterPhase, PowerMeter, Sweep};
pub use random::{RandomSource, ScriptedDraws, SeededRandom};
pub use record::ShotRecord;
pub use rules::{determine_winner, is_match_over};
pub use shot_model::{MAX_PERCENTAGE, OddsRow, ShotModel, ShotRoll};
pub use types::{Player, PlayerSlot, ShotType, TurnState};
