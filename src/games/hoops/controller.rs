//! Turn controller: the state machine that runs a match.
//!
//! ```text
//! AwaitingShotSelection --choose_shot_type--> ChargingPower
//! ChargingPower --start_charging / tick--> ChargingPower
//! ChargingPower --stop_charging--> Resolving
//! Resolving --check_shot_result--> AwaitingNextTurn
//! AwaitingNextTurn --set_next_player--> AwaitingShotSelection | GameOver
//! ```
//!
//! Transitions are the only way scores and the active player change.
//! Out-of-order calls return [`TurnError::InvalidTransition`] and change
//! nothing.

use super::action::{InputEvent, TurnAction, TurnError};
use super::invariants::{HoopsInvariants, InvariantSet};
use super::phases::Outcome;
use super::power_meter::{MeterPhase, PowerMeter};
use super::random::{RandomSource, SeededRandom};
use super::record::ShotRecord;
use super::rules;
use super::shot_model::ShotModel;
use super::types::{Player, PlayerSlot, ShotType, TurnState};
use crate::match_config::{ConfigError, MatchConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Current turn state.
    pub state: TurnState,
    /// Whose turn it is.
    pub active: PlayerSlot,
    /// Both players, slot one first.
    pub players: [Player; 2],
    /// Shot chosen this turn, if any.
    pub shot: Option<ShotType>,
    /// Meter indicator position.
    pub meter_value: i32,
    /// Meter phase.
    pub meter_phase: MeterPhase,
    /// Last computed make percentage.
    pub make_percentage: f64,
    /// Most recent resolved shot.
    pub last_shot: Option<ShotRecord>,
    /// Final result once the match is over.
    pub outcome: Option<Outcome>,
}

/// Orchestrates selection, charging, resolution, scoring, and handoff.
#[derive(Debug, Clone)]
pub struct TurnController<R: RandomSource = SeededRandom> {
    config: MatchConfig,
    pub(crate) players: [Player; 2],
    active: PlayerSlot,
    state: TurnState,
    shot: Option<ShotType>,
    shot_model: ShotModel,
    meter: PowerMeter,
    captured_power: Option<i32>,
    // Every shot of the match; the score ledger invariant audits against it.
    // Both end conditions bound its length, and a rematch clears it.
    pub(crate) history: Vec<ShotRecord>,
    outcome: Option<Outcome>,
    rng: R,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl<R: RandomSource> TurnController<R> {
    /// Creates a match with player one to shoot first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is malformed.
    #[instrument(skip(config, player_one, player_two, rng))]
    pub fn new(
        config: MatchConfig,
        player_one: impl Into<String>,
        player_two: impl Into<String>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let players = [Player::new(player_one), Player::new(player_two)];
        info!(
            player_one = players[0].name(),
            player_two = players[1].name(),
            end_condition = ?config.end_condition(),
            "Starting match"
        );

        Ok(Self {
            shot_model: ShotModel::new(config.shots().clone(), config.power().clone()),
            meter: PowerMeter::new(config.meter()),
            config,
            players,
            active: PlayerSlot::One,
            state: TurnState::AwaitingShotSelection,
            shot: None,
            captured_power: None,
            history: Vec::new(),
            outcome: None,
            rng,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Transitions
// ─────────────────────────────────────────────────────────────

impl<R: RandomSource> TurnController<R> {
    /// Picks the shot for this turn and arms the meter.
    #[instrument(skip(self), fields(state = %self.state, active = %self.active))]
    pub fn choose_shot_type(&mut self, shot: ShotType) -> Result<(), TurnError> {
        if self.state != TurnState::AwaitingShotSelection {
            return Err(self.reject(TurnAction::ChooseShotType));
        }

        self.shot_model.select_shot(shot);
        self.meter.reset();
        self.captured_power = None;
        self.shot = Some(shot);
        self.state = TurnState::ChargingPower;
        info!(%shot, shooter = self.active_player().name(), "Shot selected");
        Ok(())
    }

    /// Starts the meter sweep.
    #[instrument(skip(self), fields(state = %self.state, meter = %self.meter.phase()))]
    pub fn start_charging(&mut self) -> Result<(), TurnError> {
        if self.state != TurnState::ChargingPower {
            return Err(self.reject(TurnAction::StartCharging));
        }
        self.meter
            .start()
            .map_err(|_| self.reject(TurnAction::StartCharging))?;
        debug!("Charging started");
        Ok(())
    }

    /// Advances the meter one tick while charging. No-op in other states.
    pub fn tick(&mut self) {
        self.tick_by(1);
    }

    /// Advances the meter `ticks` ticks while charging. No-op in other states.
    pub fn tick_by(&mut self, ticks: u32) {
        if self.state == TurnState::ChargingPower {
            self.meter.advance(ticks);
        }
    }

    /// Stops the meter and captures the power for this shot.
    #[instrument(skip(self), fields(state = %self.state, meter = %self.meter.phase()))]
    pub fn stop_charging(&mut self) -> Result<i32, TurnError> {
        if self.state != TurnState::ChargingPower {
            return Err(self.reject(TurnAction::StopCharging));
        }
        let Some(power) = self.meter.stop() else {
            return Err(self.reject(TurnAction::StopCharging));
        };

        self.captured_power = Some(power);
        self.state = TurnState::Resolving;
        info!(power, "Power captured");
        Ok(power)
    }

    /// Abandons the charge and returns to shot selection. Scores are untouched.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn cancel_shot(&mut self) -> Result<(), TurnError> {
        if self.state != TurnState::ChargingPower {
            return Err(self.reject(TurnAction::CancelShot));
        }
        self.meter.reset();
        self.shot = None;
        self.state = TurnState::AwaitingShotSelection;
        debug!("Shot cancelled");
        Ok(())
    }

    /// Rolls the captured shot, scores it, and logs it.
    ///
    /// The captured power is consumed, so a shot is scored exactly once.
    #[instrument(skip(self), fields(state = %self.state, active = %self.active))]
    pub fn check_shot_result(&mut self) -> Result<ShotRecord, TurnError> {
        if self.state != TurnState::Resolving {
            return Err(self.reject(TurnAction::CheckShotResult));
        }
        let Some(power) = self.captured_power.take() else {
            return Err(self.reject(TurnAction::CheckShotResult));
        };

        let shot = self.shot_model.selected_shot();
        self.shot_model.calculate_make_percentage(power);
        let shooter = self.active.index();
        let roll = self.shot_model.resolve(&self.players[shooter], &mut self.rng);
        let worth = self.shot_model.points_for(shot);
        let points = if roll.made { worth } else { 0 };

        self.players[shooter].record_attempt(roll.made, worth);
        let record = ShotRecord::new(
            self.history.len() as u32 + 1,
            self.active,
            shot,
            power,
            roll,
            points,
        );
        self.history.push(record);
        self.state = TurnState::AwaitingNextTurn;

        info!(
            made = roll.made,
            make_percentage = roll.make_percentage,
            score = self.players[shooter].score(),
            "{}",
            record
        );

        #[cfg(debug_assertions)]
        self.verify_invariants()?;

        Ok(record)
    }

    /// Hands over the turn (or keeps the shooter when `advance` is false).
    ///
    /// Resets the meter, then moves to [`TurnState::GameOver`] if the end
    /// condition holds, otherwise to [`TurnState::AwaitingShotSelection`].
    #[instrument(skip(self), fields(state = %self.state, active = %self.active))]
    pub fn set_next_player(&mut self, advance: bool) -> Result<TurnState, TurnError> {
        if self.state != TurnState::AwaitingNextTurn {
            return Err(self.reject(TurnAction::SetNextPlayer));
        }

        if advance {
            self.active = self.active.opponent();
        }
        self.meter.reset();
        self.shot = None;

        if rules::is_match_over(self.config.end_condition(), &self.players) {
            let outcome = self.determine_winner();
            self.outcome = Some(outcome);
            self.state = TurnState::GameOver;
            info!(
                %outcome,
                one = self.players[0].score(),
                two = self.players[1].score(),
                "Match over"
            );
        } else {
            self.state = TurnState::AwaitingShotSelection;
            debug!(next = self.active_player().name(), "Turn handed over");
        }
        Ok(self.state)
    }

    /// Starts a fresh match with the same players and configuration.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn rematch(&mut self) -> Result<(), TurnError> {
        if self.state != TurnState::GameOver {
            return Err(self.reject(TurnAction::Rematch));
        }
        let names = [
            self.players[0].name().to_string(),
            self.players[1].name().to_string(),
        ];
        self.players = names.map(Player::new);
        self.active = PlayerSlot::One;
        self.state = TurnState::AwaitingShotSelection;
        self.shot = None;
        self.captured_power = None;
        self.history.clear();
        self.outcome = None;
        self.meter.reset();
        self.shot_model = ShotModel::new(self.config.shots().clone(), self.config.power().clone());
        info!("Rematch started");
        Ok(())
    }

    /// Dispatches a presentation-layer event.
    ///
    /// [`InputEvent::StopCharging`] captures the power and resolves the shot
    /// in one step. Returns the state after the event.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn handle_input(&mut self, event: InputEvent) -> Result<TurnState, TurnError> {
        match event {
            InputEvent::SelectShotType(shot) => self.choose_shot_type(shot)?,
            InputEvent::StartCharging => self.start_charging()?,
            InputEvent::StopCharging => {
                self.stop_charging()?;
                self.check_shot_result()?;
            }
            InputEvent::AdvanceFrame => self.tick(),
            InputEvent::EndTurn => {
                self.set_next_player(true)?;
            }
        }
        Ok(self.state)
    }

    fn reject(&self, action: TurnAction) -> TurnError {
        warn!(%action, state = %self.state, "Rejected out-of-order action");
        TurnError::invalid(action, self.state)
    }

    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    fn verify_invariants(&self) -> Result<(), TurnError> {
        HoopsInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description)
                .collect::<Vec<_>>()
                .join("; ");
            TurnError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Observers
// ─────────────────────────────────────────────────────────────

impl<R: RandomSource> TurnController<R> {
    /// Current turn state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Configuration in force.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Both players, slot one first.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player in a slot.
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    /// Slot whose turn it is.
    pub fn active_slot(&self) -> PlayerSlot {
        self.active
    }

    /// Player whose turn it is.
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    /// The power meter.
    pub fn meter(&self) -> &PowerMeter {
        &self.meter
    }

    /// Meter indicator position.
    pub fn meter_value(&self) -> i32 {
        self.meter.value()
    }

    /// Last computed make percentage.
    pub fn make_percentage(&self) -> f64 {
        self.shot_model.make_percentage()
    }

    /// The shot model, for previewing odds.
    pub fn shot_model(&self) -> &ShotModel {
        &self.shot_model
    }

    /// Shot chosen this turn.
    pub fn selected_shot(&self) -> Option<ShotType> {
        self.shot
    }

    /// Power captured but not yet resolved.
    pub fn captured_power(&self) -> Option<i32> {
        self.captured_power
    }

    /// Most recent resolved shot.
    pub fn last_shot(&self) -> Option<&ShotRecord> {
        self.history.last()
    }

    /// Every resolved shot this match.
    pub fn history(&self) -> &[ShotRecord] {
        &self.history
    }

    /// The last `limit` shots, oldest first.
    pub fn recent_shots(&self, limit: usize) -> &[ShotRecord] {
        &self.history[self.history.len().saturating_sub(limit)..]
    }

    /// Compares the current scores. Ties are a draw.
    pub fn determine_winner(&self) -> Outcome {
        rules::determine_winner(&self.players[0], &self.players[1])
    }

    /// Final result, once the match is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Winning player, once the match is over and not drawn.
    pub fn winner(&self) -> Option<&Player> {
        self.outcome?.winner().map(|slot| self.player(slot))
    }

    /// Copies the observable state.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state,
            active: self.active,
            players: self.players.clone(),
            shot: self.shot,
            meter_value: self.meter.value(),
            meter_phase: self.meter.phase(),
            make_percentage: self.make_percentage(),
            last_shot: self.last_shot().copied(),
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hoops::ScriptedDraws;
    use crate::match_config::{EndCondition, MeterSettings};

    fn game_with(draw: f64) -> TurnController<ScriptedDraws> {
        let config = MatchConfig::default().with_meter(MeterSettings::new(0, 100, 5));
        TurnController::new(config, "Ada", "Bo", ScriptedDraws::constant(draw)).unwrap()
    }

    fn shoot(game: &mut TurnController<ScriptedDraws>, shot: ShotType, ticks: u32) -> ShotRecord {
        game.choose_shot_type(shot).unwrap();
        game.start_charging().unwrap();
        game.tick_by(ticks);
        game.stop_charging().unwrap();
        game.check_shot_result().unwrap()
    }

    #[test]
    fn test_stop_before_start_is_rejected() {
        let mut game = game_with(0.0);
        game.choose_shot_type(ShotType::Near).unwrap();
        let err = game.stop_charging().unwrap_err();
        assert_eq!(
            err,
            TurnError::invalid(TurnAction::StopCharging, TurnState::ChargingPower)
        );
        assert_eq!(game.state(), TurnState::ChargingPower);
    }

    #[test]
    fn test_tick_outside_charging_is_noop() {
        let mut game = game_with(0.0);
        game.tick_by(10);
        assert_eq!(game.meter_value(), 0);

        game.choose_shot_type(ShotType::Near).unwrap();
        game.tick_by(10);
        assert_eq!(game.meter_value(), 0, "armed meter waits for start");
    }

    #[test]
    fn test_double_check_scores_once() {
        let mut game = game_with(0.0);
        shoot(&mut game, ShotType::Near, 10);
        assert_eq!(game.player(PlayerSlot::One).score(), 1);
        assert!(game.check_shot_result().is_err());
        assert_eq!(game.player(PlayerSlot::One).score(), 1);
    }

    #[test]
    fn test_cancel_returns_to_selection() {
        let mut game = game_with(0.0);
        game.choose_shot_type(ShotType::Far).unwrap();
        game.start_charging().unwrap();
        game.tick_by(4);
        game.cancel_shot().unwrap();
        assert_eq!(game.state(), TurnState::AwaitingShotSelection);
        assert_eq!(game.meter_value(), 0);
        assert_eq!(game.selected_shot(), None);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_keep_shooter_when_not_advancing() {
        let mut game = game_with(0.99);
        shoot(&mut game, ShotType::Mid, 3);
        game.set_next_player(false).unwrap();
        assert_eq!(game.active_slot(), PlayerSlot::One);
        shoot(&mut game, ShotType::Mid, 3);
        game.set_next_player(true).unwrap();
        assert_eq!(game.active_slot(), PlayerSlot::Two);
    }

    #[test]
    fn test_turn_limit_ends_match_with_draw() {
        let config = MatchConfig::default()
            .with_end_condition(EndCondition::TurnLimit { turns_per_player: 2 });
        let mut game = TurnController::new(config, "Ada", "Bo", ScriptedDraws::constant(0.99))
            .unwrap();
        for _ in 0..3 {
            shoot(&mut game, ShotType::Near, 20);
            assert_eq!(game.set_next_player(true).unwrap(), TurnState::AwaitingShotSelection);
        }
        shoot(&mut game, ShotType::Near, 20);
        assert_eq!(game.set_next_player(true).unwrap(), TurnState::GameOver);
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_rematch_clears_match() {
        let config = MatchConfig::default()
            .with_end_condition(EndCondition::ScoreTarget { points: 1 });
        let mut game =
            TurnController::new(config, "Ada", "Bo", ScriptedDraws::constant(0.0)).unwrap();
        assert!(game.rematch().is_err());
        shoot(&mut game, ShotType::Near, 10);
        game.set_next_player(true).unwrap();
        assert_eq!(game.winner().map(Player::name), Some("Ada"));

        assert!(game.make_percentage() > 0.0);

        game.rematch().unwrap();
        assert_eq!(game.make_percentage(), 0.0);
        assert_eq!(game.snapshot().make_percentage, 0.0);
        assert_eq!(game.state(), TurnState::AwaitingShotSelection);
        assert_eq!(game.active_slot(), PlayerSlot::One);
        assert_eq!(game.players()[0].score(), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_recent_shots_keeps_newest() {
        let mut game = game_with(0.0);
        assert!(game.recent_shots(20).is_empty());
        for _ in 0..3 {
            shoot(&mut game, ShotType::Near, 10);
            game.set_next_player(true).unwrap();
        }
        let recent = game.recent_shots(2);
        assert_eq!(recent.len(), 2);
        assert_eq!((recent[0].turn, recent[1].turn), (2, 3));
        assert_eq!(game.recent_shots(20).len(), 3);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game_with(0.0);
        game.choose_shot_type(ShotType::Mid).unwrap();
        game.start_charging().unwrap();
        game.tick_by(2);
        let snap = game.snapshot();
        assert_eq!(snap.state, TurnState::ChargingPower);
        assert_eq!(snap.shot, Some(ShotType::Mid));
        assert_eq!(snap.meter_value, 10);
        assert_eq!(snap.meter_phase, MeterPhase::Charging);
        assert!(snap.last_shot.is_none());
    }
}
