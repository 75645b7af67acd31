//! Match invariants, audited after every resolved shot.
//!
//! Each invariant is a zero-sized type naming one property of a running
//! match. [`HoopsInvariants`] groups the three the controller audits in
//! debug builds; tests can also check any of them on its own.

use derive_more::Display;

/// A property of a match that holds between transitions.
pub trait Invariant<S> {
    /// True when the property holds for `state`.
    fn holds(state: &S) -> bool;

    /// What the property promises, reported when it breaks.
    fn description() -> &'static str;
}

/// A broken invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the invariant that failed.
    pub description: &'static str,
}

/// Invariants audited together, reporting every failure rather than the first.
pub trait InvariantSet<S> {
    /// Audits every member of the set.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn audit<S, I: Invariant<S>>(state: &S) -> Option<InvariantViolation> {
    (!I::holds(state)).then(|| InvariantViolation {
        description: I::description(),
    })
}

impl<S, Meter, Odds, Ledger> InvariantSet<S> for (Meter, Odds, Ledger)
where
    Meter: Invariant<S>,
    Odds: Invariant<S>,
    Ledger: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            audit::<S, Meter>(state),
            audit::<S, Odds>(state),
            audit::<S, Ledger>(state),
        ]
        .into_iter()
        .flatten()
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod meter_bounded;
pub mod percentage_clamped;
pub mod score_ledger;

pub use meter_bounded::MeterBoundedInvariant;
pub use percentage_clamped::PercentageClampedInvariant;
pub use score_ledger::ScoreLedgerInvariant;

/// All match invariants as a composable set.
pub type HoopsInvariants = (
    MeterBoundedInvariant,
    PercentageClampedInvariant,
    ScoreLedgerInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hoops::{ScriptedDraws, ShotType, TurnController};
    use crate::match_config::MatchConfig;

    fn controller() -> TurnController<ScriptedDraws> {
        TurnController::new(
            MatchConfig::default(),
            "Ada",
            "Bo",
            ScriptedDraws::constant(0.1),
        )
        .expect("default config is valid")
    }

    #[test]
    fn test_invariant_set_holds_for_new_match() {
        assert!(HoopsInvariants::check_all(&controller()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_shots() {
        let mut game = controller();
        for shot in [ShotType::Near, ShotType::Far, ShotType::Mid] {
            game.choose_shot_type(shot).unwrap();
            game.start_charging().unwrap();
            game.tick_by(7);
            game.stop_charging().unwrap();
            game.check_shot_result().unwrap();
            game.set_next_player(true).unwrap();
        }
        assert!(HoopsInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_score_corruption() {
        let mut game = controller();
        game.players[0].record_attempt(true, 5);
        game.history.clear();

        let violations = HoopsInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, ScoreLedgerInvariant::DESCRIPTION);
    }

    #[test]
    fn test_violation_displays_description() {
        let mut game = controller();
        game.players[1].record_attempt(false, 1);

        let violations = HoopsInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations[0].to_string(), ScoreLedgerInvariant::DESCRIPTION);
    }
}
