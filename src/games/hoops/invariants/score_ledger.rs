//! Scores are exactly the sum of made shots.
//!
//! Since the shot log is append-only, agreement between the log and the
//! scores also means scores never decrease and each shot counted once.

use super::Invariant;
use crate::games::hoops::{PlayerSlot, RandomSource, TurnController};
use tracing::{instrument, warn};

/// Invariant: each player's score and attempt count match the shot log.
pub struct ScoreLedgerInvariant;

impl ScoreLedgerInvariant {
    /// Description reported on violation.
    pub const DESCRIPTION: &'static str = "Scores and attempts match the shot log";
}

impl<R: RandomSource> Invariant<TurnController<R>> for ScoreLedgerInvariant {
    #[instrument(skip(game))]
    fn holds(game: &TurnController<R>) -> bool {
        [PlayerSlot::One, PlayerSlot::Two].into_iter().all(|slot| {
            let player = game.player(slot);
            let (attempts, score) = game
                .history()
                .iter()
                .filter(|record| record.shooter == slot)
                .fold((0u32, 0u32), |(attempts, score), record| {
                    (attempts + 1, score + record.points)
                });

            let valid = player.attempts() == attempts && player.score() == score;
            if !valid {
                warn!(
                    %slot,
                    score = player.score(),
                    logged_score = score,
                    attempts = player.attempts(),
                    logged_attempts = attempts,
                    "Score ledger mismatch"
                );
            }
            valid
        })
    }

    fn description() -> &'static str {
        Self::DESCRIPTION
    }
}
