//! Colors and geometry for the terminal presentation.

use ratatui::style::Color;

/// Presentation constants. None of these affect the match itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Body text.
    pub text: Color,
    /// Titles and the active player.
    pub accent: Color,
    /// Shot choices.
    pub button: Color,
    /// Meter cells outside the optimal window.
    pub meter: Color,
    /// Meter cells inside the optimal window.
    pub sweet_spot: Color,
    /// Made-shot messages.
    pub made: Color,
    /// Missed-shot and rejection messages.
    pub missed: Color,
    /// Help line.
    pub muted: Color,
    /// Width of the meter bar in cells.
    pub meter_width: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            accent: Color::Cyan,
            button: Color::Blue,
            meter: Color::DarkGray,
            sweet_spot: Color::Green,
            made: Color::Green,
            missed: Color::Red,
            muted: Color::DarkGray,
            meter_width: 50,
        }
    }
}
