//! Match configuration: shot profiles, the power model, the meter, and the end condition.
//!
//! Every tunable constant of a match lives here so that tests can inject
//! deterministic bounds and players can tune the game from a TOML file.

use crate::games::hoops::ShotType;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Shot profiles
// ─────────────────────────────────────────────────────────────

/// Difficulty profile for a single shot type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct ShotProfile {
    /// Make percentage before distance and power are applied.
    baseline: f64,
    /// Flat percentage subtracted for the distance of the shot.
    distance_penalty: f64,
    /// Lowest power inside the optimal window (inclusive).
    optimal_low: i32,
    /// Highest power inside the optimal window (inclusive).
    optimal_high: i32,
    /// Points awarded when the shot is made.
    points: u32,
}

impl ShotProfile {
    /// Creates a profile.
    #[instrument]
    pub fn new(
        baseline: f64,
        distance_penalty: f64,
        optimal_low: i32,
        optimal_high: i32,
        points: u32,
    ) -> Self {
        Self {
            baseline,
            distance_penalty,
            optimal_low,
            optimal_high,
            points,
        }
    }

    /// Midpoint of the optimal window.
    pub fn optimal_center(&self) -> i32 {
        let center = (i64::from(self.optimal_low) + i64::from(self.optimal_high)) / 2;
        center as i32
    }
}

/// Profiles for every shot type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct ShotTable {
    /// Close range.
    near: ShotProfile,
    /// Mid range.
    mid: ShotProfile,
    /// Long range.
    far: ShotProfile,
}

impl ShotTable {
    /// Returns the profile for a shot type.
    pub fn profile(&self, shot: ShotType) -> &ShotProfile {
        match shot {
            ShotType::Near => &self.near,
            ShotType::Mid => &self.mid,
            ShotType::Far => &self.far,
        }
    }
}

impl Default for ShotTable {
    fn default() -> Self {
        Self {
            near: ShotProfile::new(70.0, 0.0, 40, 60, 1),
            mid: ShotProfile::new(60.0, 10.0, 50, 70, 1),
            far: ShotProfile::new(50.0, 20.0, 60, 80, 1),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Power model
// ─────────────────────────────────────────────────────────────

fn default_min_power() -> i32 {
    10
}
fn default_max_power() -> i32 {
    90
}
fn default_power_bonus() -> f64 {
    20.0
}
fn default_power_falloff() -> f64 {
    1.0
}
fn default_minimum_percentage() -> f64 {
    0.0
}

/// How captured power shapes the make percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct PowerSettings {
    /// Lowest usable power; weaker shots are clamped up to it.
    #[serde(default = "default_min_power")]
    min_power: i32,
    /// Highest usable power; stronger shots are clamped down to it.
    #[serde(default = "default_max_power")]
    max_power: i32,
    /// Bonus added when power lands inside the optimal window.
    #[serde(default = "default_power_bonus")]
    power_bonus: f64,
    /// Percentage lost per unit of power outside the optimal window.
    #[serde(default = "default_power_falloff")]
    power_falloff: f64,
    /// Floor for the computed make percentage.
    #[serde(default = "default_minimum_percentage")]
    minimum_percentage: f64,
}

impl Default for PowerSettings {
    fn default() -> Self {
        Self {
            min_power: default_min_power(),
            max_power: default_max_power(),
            power_bonus: default_power_bonus(),
            power_falloff: default_power_falloff(),
            minimum_percentage: default_minimum_percentage(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Meter
// ─────────────────────────────────────────────────────────────

fn default_meter_start() -> i32 {
    0
}
fn default_meter_end() -> i32 {
    100
}
fn default_meter_step() -> i32 {
    2
}

/// Bounds and speed of the oscillating power meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct MeterSettings {
    /// Position the meter starts from (and resets to).
    #[serde(default = "default_meter_start")]
    start: i32,
    /// Position where the meter turns back.
    #[serde(default = "default_meter_end")]
    end: i32,
    /// Distance travelled per tick.
    #[serde(default = "default_meter_step")]
    step: i32,
}

impl MeterSettings {
    /// Creates meter settings.
    #[instrument]
    pub fn new(start: i32, end: i32, step: i32) -> Self {
        Self { start, end, step }
    }
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            start: default_meter_start(),
            end: default_meter_end(),
            step: default_meter_step(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  End condition
// ─────────────────────────────────────────────────────────────

/// When a match is over. Checked at every turn handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndCondition {
    /// First player to reach `points` ends the match.
    ScoreTarget {
        /// Score that ends the match.
        points: u32,
    },
    /// The match ends once both players have taken `turns_per_player` shots.
    TurnLimit {
        /// Shots each player takes.
        turns_per_player: u32,
    },
}

impl Default for EndCondition {
    fn default() -> Self {
        EndCondition::ScoreTarget { points: 10 }
    }
}

// ─────────────────────────────────────────────────────────────
//  MatchConfig
// ─────────────────────────────────────────────────────────────

/// Complete, injectable configuration for a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct MatchConfig {
    /// Shot difficulty profiles.
    shots: ShotTable,
    /// Power model.
    power: PowerSettings,
    /// Meter bounds and speed.
    meter: MeterSettings,
    /// When the match is over.
    end_condition: EndCondition,
}

impl MatchConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(end_condition = ?config.end_condition, "Match config loaded");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects malformed constants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first inconsistent setting.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let power = &self.power;
        if power.min_power > power.max_power {
            return Err(ConfigError::new(format!(
                "min_power ({}) exceeds max_power ({})",
                power.min_power, power.max_power
            )));
        }
        if !power.power_bonus.is_finite() || power.power_bonus < 0.0 {
            return Err(ConfigError::new(format!(
                "power_bonus must be a non-negative number, got {}",
                power.power_bonus
            )));
        }
        if !power.power_falloff.is_finite() || power.power_falloff < 0.0 {
            return Err(ConfigError::new(format!(
                "power_falloff must be a non-negative number, got {}",
                power.power_falloff
            )));
        }
        if !(0.0..=100.0).contains(&power.minimum_percentage) {
            return Err(ConfigError::new(format!(
                "minimum_percentage must lie in [0, 100], got {}",
                power.minimum_percentage
            )));
        }

        for shot in ShotType::ALL {
            let profile = self.shots.profile(shot);
            if !profile.baseline.is_finite() || !profile.distance_penalty.is_finite() {
                return Err(ConfigError::new(format!(
                    "{} shot has a non-finite baseline or distance penalty",
                    shot
                )));
            }
            if profile.optimal_low > profile.optimal_high {
                return Err(ConfigError::new(format!(
                    "{} shot optimal window is inverted ({} > {})",
                    shot, profile.optimal_low, profile.optimal_high
                )));
            }
            if profile.optimal_low < power.min_power || profile.optimal_high > power.max_power {
                return Err(ConfigError::new(format!(
                    "{} shot optimal window [{}, {}] lies outside the power range [{}, {}]",
                    shot, profile.optimal_low, profile.optimal_high, power.min_power, power.max_power
                )));
            }
        }

        let meter = &self.meter;
        if meter.start >= meter.end {
            return Err(ConfigError::new(format!(
                "meter start ({}) must be below meter end ({})",
                meter.start, meter.end
            )));
        }
        if meter.end.checked_sub(meter.start).is_none() {
            return Err(ConfigError::new(format!(
                "meter span from {} to {} is too wide",
                meter.start, meter.end
            )));
        }
        if meter.step <= 0 {
            return Err(ConfigError::new(format!(
                "meter step must be positive, got {}",
                meter.step
            )));
        }

        match self.end_condition {
            EndCondition::ScoreTarget { points: 0 } => {
                return Err(ConfigError::new("score target must be at least 1 point"));
            }
            EndCondition::TurnLimit {
                turns_per_player: 0,
            } => {
                return Err(ConfigError::new("turn limit must be at least 1 turn"));
            }
            _ => {}
        }

        debug!("Match config validated");
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
