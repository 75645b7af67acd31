//! Make percentages stay in range.

use super::Invariant;
use crate::games::hoops::{MAX_PERCENTAGE, RandomSource, TurnController};
use tracing::{instrument, warn};

/// Invariant: the last make percentage, and every logged one, lies in `[0, 100]`.
pub struct PercentageClampedInvariant;

impl<R: RandomSource> Invariant<TurnController<R>> for PercentageClampedInvariant {
    #[instrument(skip(game))]
    fn holds(game: &TurnController<R>) -> bool {
        let in_range = |p: f64| (0.0..=MAX_PERCENTAGE).contains(&p);
        let valid = in_range(game.make_percentage())
            && game
                .history()
                .iter()
                .all(|record| in_range(record.roll.make_percentage));
        if !valid {
            warn!(
                make_percentage = game.make_percentage(),
                "Make percentage out of range"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Make percentage stays within [0, 100]"
    }
}
