//! Application state and logic.

use super::input::{KeyCommand, map_key};
use crate::games::hoops::{
    InputEvent, MatchSnapshot, MeterPhase, RandomSource, TurnController, TurnState,
};
use crossterm::event::KeyCode;
use tracing::{debug, info};

/// Main application state: the controller plus the status line.
pub struct App<R: RandomSource> {
    game: TurnController<R>,
    status_message: String,
    should_quit: bool,
}

impl<R: RandomSource> App<R> {
    /// Wraps a controller.
    pub fn new(game: TurnController<R>) -> Self {
        let status_message = format!("{} to shoot. Pick a shot (1-3).", game.active_player().name());
        Self {
            game,
            status_message,
            should_quit: false,
        }
    }

    /// The controller.
    pub fn game(&self) -> &TurnController<R> {
        &self.game
    }

    /// What to draw this frame.
    pub fn snapshot(&self) -> MatchSnapshot {
        self.game.snapshot()
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// One animation frame.
    pub fn on_frame(&mut self) {
        if self.game.state() == TurnState::ChargingPower {
            // AdvanceFrame cannot fail.
            let _ = self.game.handle_input(InputEvent::AdvanceFrame);
        }
    }

    /// Handles a key press.
    pub fn on_key(&mut self, key: KeyCode) {
        let command = map_key(key, &self.game.snapshot());
        debug!(?key, ?command, "Key pressed");

        let result = match command {
            KeyCommand::Quit => {
                info!("Quit requested");
                self.should_quit = true;
                return;
            }
            KeyCommand::Ignore => return,
            KeyCommand::Cancel => self.game.cancel_shot().map(|_| self.game.state()),
            KeyCommand::Rematch => self.game.rematch().map(|_| self.game.state()),
            KeyCommand::Game(event) => self.game.handle_input(event),
        };

        self.status_message = match result {
            Ok(state) => self.describe(state),
            Err(e) => format!("{}", e),
        };
    }

    fn describe(&self, state: TurnState) -> String {
        let shooter = self.game.active_player().name();
        match state {
            TurnState::AwaitingShotSelection => {
                format!("{} to shoot. Pick a shot (1-3).", shooter)
            }
            TurnState::ChargingPower => match self.game.meter().phase() {
                MeterPhase::Charging => {
                    "Charging... press space to shoot.".to_string()
                }
                _ => "Press space to start the meter.".to_string(),
            },
            TurnState::Resolving => "Shooting...".to_string(),
            TurnState::AwaitingNextTurn => match self.game.last_shot() {
                Some(record) if record.made() => {
                    format!("{} scores! Press enter to pass the ball.", shooter)
                }
                _ => format!("{} misses. Press enter to pass the ball.", shooter),
            },
            TurnState::GameOver => match self.game.winner() {
                Some(player) => {
                    format!("{} wins! Press 'r' for a rematch or 'q' to quit.", player.name())
                }
                None => "Match drawn! Press 'r' for a rematch or 'q' to quit.".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hoops::{PlayerSlot, ScriptedDraws};
    use crate::match_config::MatchConfig;

    fn app(draw: f64) -> App<ScriptedDraws> {
        let game = TurnController::new(
            MatchConfig::default(),
            "Ada",
            "Bo",
            ScriptedDraws::constant(draw),
        )
        .unwrap();
        App::new(game)
    }

    #[test]
    fn test_full_turn_by_keys() {
        let mut app = app(0.0);
        app.on_key(KeyCode::Char('1'));
        app.on_key(KeyCode::Char(' '));
        for _ in 0..20 {
            app.on_frame();
        }
        app.on_key(KeyCode::Char(' '));
        assert_eq!(app.game().state(), TurnState::AwaitingNextTurn);
        assert_eq!(app.game().player(PlayerSlot::One).score(), 1);
        assert!(app.status_message().contains("scores"));

        app.on_key(KeyCode::Enter);
        assert_eq!(app.game().active_slot(), PlayerSlot::Two);
        assert!(app.status_message().starts_with("Bo"));
    }

    #[test]
    fn test_rejected_key_sets_status() {
        let mut app = app(0.0);
        app.on_key(KeyCode::Enter);
        assert!(app.status_message().starts_with("Cannot"));
        assert_eq!(app.game().state(), TurnState::AwaitingShotSelection);
    }

    #[test]
    fn test_quit() {
        let mut app = app(0.0);
        assert!(!app.should_quit());
        app.on_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
