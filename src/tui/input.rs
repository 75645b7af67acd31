//! Key bindings.

use crate::games::hoops::{InputEvent, MatchSnapshot, MeterPhase, ShotType, TurnState};
use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forward to the controller.
    Game(InputEvent),
    /// Abandon the charge.
    Cancel,
    /// Start over after the final whistle.
    Rematch,
    /// Leave the game.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key to a command given what is on screen.
///
/// Space is context dependent: it starts an idle meter and stops a running one.
pub fn map_key(key: KeyCode, snapshot: &MatchSnapshot) -> KeyCommand {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
        KeyCode::Char('1') => KeyCommand::Game(InputEvent::SelectShotType(ShotType::Near)),
        KeyCode::Char('2') => KeyCommand::Game(InputEvent::SelectShotType(ShotType::Mid)),
        KeyCode::Char('3') => KeyCommand::Game(InputEvent::SelectShotType(ShotType::Far)),
        KeyCode::Char(' ') => match snapshot.meter_phase {
            MeterPhase::Charging => KeyCommand::Game(InputEvent::StopCharging),
            _ => KeyCommand::Game(InputEvent::StartCharging),
        },
        KeyCode::Enter | KeyCode::Char('n') => KeyCommand::Game(InputEvent::EndTurn),
        KeyCode::Esc => KeyCommand::Cancel,
        KeyCode::Char('r') if snapshot.state == TurnState::GameOver => KeyCommand::Rematch,
        _ => KeyCommand::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hoops::{ScriptedDraws, TurnController};
    use crate::match_config::MatchConfig;

    fn controller() -> TurnController<ScriptedDraws> {
        TurnController::new(MatchConfig::default(), "Ada", "Bo", ScriptedDraws::default())
            .unwrap()
    }

    #[test]
    fn test_space_toggles_with_meter() {
        let mut game = controller();
        game.choose_shot_type(ShotType::Near).unwrap();
        assert_eq!(
            map_key(KeyCode::Char(' '), &game.snapshot()),
            KeyCommand::Game(InputEvent::StartCharging)
        );
        game.start_charging().unwrap();
        assert_eq!(
            map_key(KeyCode::Char(' '), &game.snapshot()),
            KeyCommand::Game(InputEvent::StopCharging)
        );
    }

    #[test]
    fn test_rematch_only_after_game_over() {
        let game = controller();
        assert_eq!(map_key(KeyCode::Char('r'), &game.snapshot()), KeyCommand::Ignore);
    }

    #[test]
    fn test_digits_select_shots() {
        let snapshot = controller().snapshot();
        assert_eq!(
            map_key(KeyCode::Char('3'), &snapshot),
            KeyCommand::Game(InputEvent::SelectShotType(ShotType::Far))
        );
        assert_eq!(map_key(KeyCode::Char('9'), &snapshot), KeyCommand::Ignore);
    }
}
