//! Stateless UI rendering for the shootout.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use super::theme::Theme;
use crate::games::hoops::{
    MatchSnapshot, PlayerSlot, RandomSource, ShotModel, ShotType, TurnController, TurnState,
};

/// Renders one frame.
pub fn draw<R: RandomSource>(frame: &mut Frame, app: &App<R>, theme: &Theme) {
    let area = frame.area();
    let snapshot = app.snapshot();
    let game = app.game();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Scoreboard
            Constraint::Length(5), // Shots
            Constraint::Length(4), // Meter
            Constraint::Length(3), // Last shot
            Constraint::Length(3), // Status
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Strictly Hoops - Shootout")
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_scoreboard(frame, chunks[1], &snapshot, theme);
    draw_shots(frame, chunks[2], game.shot_model(), &snapshot, theme);
    draw_meter(frame, chunks[3], game, &snapshot, theme);
    draw_last_shot(frame, chunks[4], &snapshot, theme);

    let status_style = if app.status_message().starts_with("Cannot") {
        Style::default().fg(theme.missed)
    } else {
        Style::default().fg(theme.text)
    };
    let status = Paragraph::new(app.status_message())
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[5]);

    let help = help_line(snapshot.state);
    let help = Paragraph::new(help)
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[7]);
}

fn help_line(state: TurnState) -> &'static str {
    match state {
        TurnState::GameOver => "R: Rematch | Q: Quit",
        _ => "1-3: Shot | Space: Start/Stop meter | Enter: Next turn | Esc: Cancel | Q: Quit",
    }
}

fn draw_scoreboard(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (slot, col) in [PlayerSlot::One, PlayerSlot::Two].into_iter().zip(cols.iter()) {
        let player = &snapshot.players[slot.index()];
        let active = snapshot.active == slot && snapshot.state != TurnState::GameOver;
        let style = if active {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let marker = if active { "> " } else { "" };
        let text = format!(
            "{}{}: {}  ({}/{})",
            marker,
            player.name(),
            player.score(),
            player.makes(),
            player.attempts()
        );
        let widget = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(format!("Player {}", slot)));
        frame.render_widget(widget, *col);
    }
}

fn draw_shots(
    frame: &mut Frame,
    area: Rect,
    model: &ShotModel,
    snapshot: &MatchSnapshot,
    theme: &Theme,
) {
    let lines: Vec<Line> = ShotType::ALL
        .iter()
        .enumerate()
        .map(|(i, &shot)| {
            let center = model.shots().profile(shot).optimal_center();
            let odds = model.percentage_for(shot, center);
            let chosen = snapshot.shot == Some(shot);
            let style = if chosen {
                Style::default().fg(theme.accent).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(theme.button)
            };
            Line::from(vec![
                Span::styled(format!(" [{}] {:<5}", i + 1, shot), style),
                Span::styled(
                    format!(
                        "  best {:>3.0}%  {} pt",
                        odds,
                        model.points_for(shot)
                    ),
                    Style::default().fg(theme.text),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Shots"));
    frame.render_widget(widget, area);
}

/// Builds the meter bar as styled cells.
///
/// Cells covering the selected shot's optimal window use the sweet-spot
/// color. The cell nearest the indicator is drawn solid.
pub fn meter_line<R: RandomSource>(
    game: &TurnController<R>,
    snapshot: &MatchSnapshot,
    width: u16,
    theme: &Theme,
) -> Line<'static> {
    let meter = game.meter();
    let (start, end) = (meter.start_bound(), meter.end_bound());
    let width = i64::from(width.max(2));
    let span = i64::from(end) - i64::from(start);
    let window = snapshot.shot.map(|shot| {
        let profile = game.config().shots().profile(shot);
        (*profile.optimal_low(), *profile.optimal_high())
    });
    let offset = i64::from(snapshot.meter_value) - i64::from(start);
    let indicator = (offset * (width - 1) + span / 2) / span.max(1);

    let cells = (0..width)
        .map(|i| {
            let value = (i64::from(start) + i * span / (width - 1)) as i32;
            let in_window = window.is_some_and(|(low, high)| (low..=high).contains(&value));
            let color = if in_window { theme.sweet_spot } else { theme.meter };
            let glyph = if i == indicator { "█" } else { "░" };
            let style = if i == indicator {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Span::styled(glyph, style)
        })
        .collect::<Vec<_>>();
    Line::from(cells)
}

fn draw_meter<R: RandomSource>(
    frame: &mut Frame,
    area: Rect,
    game: &TurnController<R>,
    snapshot: &MatchSnapshot,
    theme: &Theme,
) {
    let width = theme.meter_width.min(area.width.saturating_sub(2)).max(2);
    let lines = vec![
        meter_line(game, snapshot, width, theme),
        Line::from(Span::styled(
            format!("Power {:>3} ({})", snapshot.meter_value, snapshot.meter_phase),
            Style::default().fg(theme.text),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Meter"));
    frame.render_widget(widget, area);
}

fn draw_last_shot(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot, theme: &Theme) {
    let (text, style) = match (&snapshot.outcome, &snapshot.last_shot) {
        (Some(outcome), _) => (
            format!("Final: {}", outcome),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        (None, Some(record)) => {
            let color = if record.made() { theme.made } else { theme.missed };
            (format!("{}", record), Style::default().fg(color))
        }
        (None, None) => ("No shots yet".to_string(), Style::default().fg(theme.muted)),
    };
    let widget = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Last shot"));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hoops::ScriptedDraws;
    use crate::match_config::{MatchConfig, MeterSettings};
    use ratatui::{Terminal, backend::TestBackend};

    fn controller() -> TurnController<ScriptedDraws> {
        let config = MatchConfig::default().with_meter(MeterSettings::new(0, 100, 10));
        TurnController::new(config, "Ada", "Bo", ScriptedDraws::constant(0.0)).unwrap()
    }

    fn rendered(app: &App<ScriptedDraws>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| draw(frame, app, &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_shows_players_and_shots() {
        let app = App::new(controller());
        let screen = rendered(&app);
        assert!(screen.contains("Ada"));
        assert!(screen.contains("Bo"));
        assert!(screen.contains("Near"));
        assert!(screen.contains("Far"));
        assert!(screen.contains("No shots yet"));
    }

    #[test]
    fn test_meter_indicator_tracks_value() {
        let mut game = controller();
        game.choose_shot_type(ShotType::Near).unwrap();
        game.start_charging().unwrap();
        game.tick_by(5);

        let line = meter_line(&game, &game.snapshot(), 11, &Theme::default());
        let glyphs: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(glyphs.len(), 11);
        assert_eq!(glyphs.iter().position(|g| *g == "█"), Some(5));
    }

    #[test]
    fn test_widest_meter_renders() {
        let config = MatchConfig::default()
            .with_meter(MeterSettings::new(-1_000_000, i32::MAX - 1_000_000, 1));
        let mut game = TurnController::new(config, "Ada", "Bo", ScriptedDraws::default()).unwrap();
        game.choose_shot_type(ShotType::Far).unwrap();

        let line = meter_line(&game, &game.snapshot(), 20, &Theme::default());
        assert_eq!(line.spans.len(), 20);
        assert_eq!(line.spans[0].content.as_ref(), "█");
    }

    #[test]
    fn test_meter_highlights_window() {
        let mut game = controller();
        game.choose_shot_type(ShotType::Near).unwrap();
        let theme = Theme::default();
        let line = meter_line(&game, &game.snapshot(), 11, &theme);
        // Near window is [40, 60]: cells 4, 5, 6.
        let sweet: Vec<usize> = line
            .spans
            .iter()
            .enumerate()
            .filter(|(_, s)| s.style.fg == Some(theme.sweet_spot))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(sweet, vec![4, 5, 6]);
    }
}
