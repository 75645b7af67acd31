//! Power-dependent make probability and shot resolution.

use super::random::RandomSource;
use super::types::{Player, ShotType};
use crate::match_config::{PowerSettings, ShotTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Upper bound of every make percentage.
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Result of one roll against the current make percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRoll {
    /// Draw scaled to `[0, 100)`.
    pub draw: f64,
    /// Percentage the draw was compared against.
    pub make_percentage: f64,
    /// `draw < make_percentage`.
    pub made: bool,
}

/// One row of the odds table: every shot type at one power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsRow {
    /// Power before clamping.
    pub power: i32,
    /// Near, Mid, Far make percentages in that order.
    pub percentages: [f64; 3],
}

/// Maps shot type and power to a make percentage and rolls the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotModel {
    shots: ShotTable,
    power: PowerSettings,
    selected: ShotType,
    make_percentage: f64,
}

impl ShotModel {
    /// Creates a model with `Near` selected and a zero percentage.
    #[instrument(skip_all)]
    pub fn new(shots: ShotTable, power: PowerSettings) -> Self {
        Self {
            shots,
            power,
            selected: ShotType::Near,
            make_percentage: 0.0,
        }
    }

    /// Records the shot type used for the next calculation.
    #[instrument(skip(self))]
    pub fn select_shot(&mut self, shot: ShotType) {
        self.selected = shot;
    }

    /// Currently selected shot type.
    pub fn selected_shot(&self) -> ShotType {
        self.selected
    }

    /// Clamps power into the usable range.
    pub fn clamp_power(&self, power: i32) -> i32 {
        let (low, high) = (*self.power.min_power(), *self.power.max_power());
        power.clamp(low.min(high), high.max(low))
    }

    /// Computes, stores, and returns the make percentage for `power`.
    ///
    /// `baseline - distance_penalty + adjustment`, where the adjustment is the
    /// power bonus inside the optimal window and a linear falloff outside it.
    /// Clamped to `[minimum_percentage, 100]`.
    #[instrument(skip(self), fields(shot = %self.selected))]
    pub fn calculate_make_percentage(&mut self, power: i32) -> f64 {
        self.make_percentage = self.percentage_for(self.selected, power);
        debug!(make_percentage = self.make_percentage, "Make percentage computed");
        self.make_percentage
    }

    /// Make percentage for any shot type without touching the stored value.
    pub fn percentage_for(&self, shot: ShotType, power: i32) -> f64 {
        let profile = self.shots.profile(shot);
        let power = self.clamp_power(power);

        let (low, high) = (*profile.optimal_low(), *profile.optimal_high());
        let adjustment = if (low..=high).contains(&power) {
            *self.power.power_bonus()
        } else {
            let miss = if power < low { low.abs_diff(power) } else { power.abs_diff(high) };
            -(*self.power.power_falloff()) * f64::from(miss)
        };

        let raw = profile.baseline() - profile.distance_penalty() + adjustment;
        let floor = self.power.minimum_percentage().clamp(0.0, MAX_PERCENTAGE);
        if raw.is_nan() {
            return floor;
        }
        raw.clamp(floor, MAX_PERCENTAGE)
    }

    /// Last computed make percentage.
    pub fn make_percentage(&self) -> f64 {
        self.make_percentage
    }

    /// Draws uniformly in `[0, 100)` and compares against the stored percentage.
    #[instrument(skip(self, rng), fields(shooter = %shooter.name(), shot = %self.selected))]
    pub fn resolve<R: RandomSource + ?Sized>(&self, shooter: &Player, rng: &mut R) -> ShotRoll {
        let unit = rng.next_unit();
        let unit = if unit.is_nan() { 0.0 } else { unit.clamp(0.0, 1.0) };
        let draw = unit * MAX_PERCENTAGE;
        let made = draw < self.make_percentage;
        debug!(draw, make_percentage = self.make_percentage, made, "Shot rolled");
        ShotRoll {
            draw,
            make_percentage: self.make_percentage,
            made,
        }
    }

    /// Returns whether the shot was made. Does not touch any score.
    pub fn determine_shot_result<R: RandomSource + ?Sized>(
        &self,
        shooter: &Player,
        rng: &mut R,
    ) -> bool {
        self.resolve(shooter, rng).made
    }

    /// Shot table in force.
    pub fn shots(&self) -> &ShotTable {
        &self.shots
    }

    /// Points a made shot of this type is worth.
    pub fn points_for(&self, shot: ShotType) -> u32 {
        *self.shots.profile(shot).points()
    }

    /// Make percentages for every shot type from `min_power` to `max_power`.
    ///
    /// The last row is always `max_power`. A zero step is treated as one.
    pub fn odds_table(&self, step: u32) -> Vec<OddsRow> {
        let (low, high) = (*self.power.min_power(), *self.power.max_power());
        let step = i64::from(step.max(1));
        let mut rows = Vec::new();
        let mut power = i64::from(low);
        while power < i64::from(high) {
            rows.push(self.odds_row(power as i32));
            power += step;
        }
        rows.push(self.odds_row(high));
        rows
    }

    fn odds_row(&self, power: i32) -> OddsRow {
        OddsRow {
            power,
            percentages: ShotType::ALL.map(|shot| self.percentage_for(shot, power)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hoops::ScriptedDraws;
    use crate::match_config::ShotProfile;

    fn model() -> ShotModel {
        ShotModel::new(ShotTable::default(), PowerSettings::default())
    }

    #[test]
    fn test_odds_table_spans_power_range() {
        let rows = model().odds_table(20);
        let powers: Vec<i32> = rows.iter().map(|r| r.power).collect();
        assert_eq!(powers, vec![10, 30, 50, 70, 90]);
        // Near and Mid are in their windows at 50; Far is 10 short of its window
        assert_eq!(rows[2].percentages, [90.0, 70.0, 20.0]);
    }

    #[test]
    fn test_extreme_window_does_not_overflow() {
        let table = ShotTable::default().with_near(ShotProfile::new(70.0, 0.0, i32::MIN, i32::MIN, 1));
        let mut model = ShotModel::new(table, PowerSettings::default());
        model.select_shot(ShotType::Near);
        assert_eq!(model.calculate_make_percentage(50), 0.0);
        assert_eq!(model.shots().near().optimal_center(), i32::MIN);
    }

    #[test]
    fn test_near_in_window_gets_bonus() {
        let mut model = model();
        model.select_shot(ShotType::Near);
        assert_eq!(model.calculate_make_percentage(50), 90.0);
        assert_eq!(model.make_percentage(), 90.0);
    }

    #[test]
    fn test_falloff_below_and_above_window() {
        let mut model = model();
        model.select_shot(ShotType::Near);
        // 30 below window by 10: 70 - 10
        assert_eq!(model.calculate_make_percentage(30), 60.0);
        // 75 above window by 15: 70 - 15
        assert_eq!(model.calculate_make_percentage(75), 55.0);
    }

    #[test]
    fn test_out_of_range_power_is_clamped() {
        let model = model();
        assert_eq!(
            model.percentage_for(ShotType::Far, 500),
            model.percentage_for(ShotType::Far, 90)
        );
        assert_eq!(
            model.percentage_for(ShotType::Near, -40),
            model.percentage_for(ShotType::Near, 10)
        );
    }

    #[test]
    fn test_percentage_never_negative() {
        let power = PowerSettings::default().with_power_falloff(50.0);
        let model = ShotModel::new(ShotTable::default(), power);
        assert_eq!(model.percentage_for(ShotType::Far, 10), 0.0);
    }

    #[test]
    fn test_zero_percentage_always_misses() {
        let power = PowerSettings::default().with_power_falloff(50.0);
        let mut model = ShotModel::new(ShotTable::default(), power);
        model.select_shot(ShotType::Far);
        model.calculate_make_percentage(10);
        let shooter = Player::new("Ada");
        let mut rng = ScriptedDraws::constant(0.0);
        assert!(!model.determine_shot_result(&shooter, &mut rng));
    }

    #[test]
    fn test_draw_below_percentage_is_made() {
        let mut model = model();
        model.select_shot(ShotType::Near);
        model.calculate_make_percentage(50);
        let shooter = Player::new("Ada");

        let roll = model.resolve(&shooter, &mut ScriptedDraws::constant(0.3));
        assert!(roll.made);
        assert!((roll.draw - 30.0).abs() < 1e-9);

        let roll = model.resolve(&shooter, &mut ScriptedDraws::constant(0.95));
        assert!(!roll.made);
    }
}
