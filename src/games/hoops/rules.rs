//! Winner and end-of-match rules.

use super::phases::Outcome;
use super::types::{Player, PlayerSlot};
use crate::match_config::EndCondition;
use tracing::instrument;

/// Compares two final scores. Equal scores are a [`Outcome::Draw`].
#[instrument(skip_all, fields(one = player_one.score(), two = player_two.score()))]
pub fn determine_winner(player_one: &Player, player_two: &Player) -> Outcome {
    use std::cmp::Ordering;

    match player_one.score().cmp(&player_two.score()) {
        Ordering::Greater => Outcome::Winner(PlayerSlot::One),
        Ordering::Less => Outcome::Winner(PlayerSlot::Two),
        Ordering::Equal => Outcome::Draw,
    }
}

/// Whether the end condition holds for these players.
pub fn is_match_over(condition: &EndCondition, players: &[Player; 2]) -> bool {
    match *condition {
        EndCondition::ScoreTarget { points } => players.iter().any(|p| p.score() >= points),
        EndCondition::TurnLimit { turns_per_player } => {
            players.iter().all(|p| p.attempts() >= turns_per_player)
        }
    }
}
