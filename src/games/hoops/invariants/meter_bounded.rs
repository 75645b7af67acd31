//! Meter position never leaves its bounds.

use super::Invariant;
use crate::games::hoops::{RandomSource, TurnController};
use tracing::{instrument, warn};

/// Invariant: the meter indicator lies within `[start, end]`.
pub struct MeterBoundedInvariant;

impl<R: RandomSource> Invariant<TurnController<R>> for MeterBoundedInvariant {
    #[instrument(skip(game))]
    fn holds(game: &TurnController<R>) -> bool {
        let meter = game.meter();
        let value = meter.value();
        let valid = (meter.start_bound()..=meter.end_bound()).contains(&value);
        if !valid {
            warn!(
                value,
                start = meter.start_bound(),
                end = meter.end_bound(),
                "Meter left its bounds"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Meter position stays within its configured bounds"
    }
}
