//! Strictly Hoops library - a two-player basketball shootout
//!
//! Players alternate shots. Each turn the shooter picks a shot type, stops a
//! sweeping power meter, and the shot model turns the captured power into a
//! make percentage that is rolled against a random draw.
//!
//! # Architecture
//!
//! - **ShotModel**: shot type and power to make percentage, plus the roll
//! - **PowerMeter**: bounded back-and-forth sweep with start/stop capture
//! - **TurnController**: the turn state machine, scores, and end of match
//! - **MatchConfig**: TOML-loadable tuning for all of the above
//! - **TUI**: hot-seat terminal front end
//!
//! # Example
//!
//! ```
//! use strictly_hoops::{MatchConfig, ScriptedDraws, ShotType, TurnController, TurnState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut game = TurnController::new(
//!     MatchConfig::default(),
//!     "Ada",
//!     "Bo",
//!     ScriptedDraws::constant(0.3),
//! )?;
//! game.choose_shot_type(ShotType::Near)?;
//! game.start_charging()?;
//! game.tick_by(25);
//! game.stop_charging()?;
//! let record = game.check_shot_result()?;
//! assert!(record.made());
//! assert_eq!(game.state(), TurnState::AwaitingNextTurn);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod games;
mod match_config;
mod tui;

// Crate-level exports - Configuration
pub use match_config::{
    ConfigError, EndCondition, MatchConfig, MeterSettings, PowerSettings, ShotProfile, ShotTable,
};

// Crate-level exports - Game types
pub use games::hoops::{
    InputEvent, MAX_PERCENTAGE, MatchSnapshot, MeterError, MeterPhase, OddsRow, Outcome, Player,
    PlayerSlot, PowerMeter, RandomSource, ScriptedDraws, SeededRandom, ShotModel, ShotRecord,
    ShotRoll, ShotType, Sweep, TurnAction, TurnController, TurnError, TurnState,
    determine_winner, is_match_over,
};

// Crate-level exports - Invariants
pub use games::hoops::invariants::{
    HoopsInvariants, Invariant, InvariantSet, InvariantViolation, MeterBoundedInvariant,
    PercentageClampedInvariant, ScoreLedgerInvariant,
};

// Crate-level exports - Terminal UI
pub use tui::{App, KeyCommand, PlayOptions, Theme, draw, map_key, meter_line, run_tui};
