//! Terminal UI for Strictly Hoops.
//!
//! A thin presentation layer: keys become [`InputEvent`]s, a fixed frame
//! cadence becomes [`InputEvent::AdvanceFrame`], and every frame is drawn
//! from a [`MatchSnapshot`].
//!
//! [`InputEvent`]: crate::InputEvent
//! [`InputEvent::AdvanceFrame`]: crate::InputEvent::AdvanceFrame
//! [`MatchSnapshot`]: crate::MatchSnapshot

mod app;
mod input;
mod theme;
mod ui;

pub use app::App;
pub use input::{KeyCommand, map_key};
pub use theme::Theme;
pub use ui::{draw, meter_line};

use crate::games::hoops::{RandomSource, SeededRandom, TurnController};
use crate::match_config::MatchConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Options for an interactive match.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Match rules.
    pub config: MatchConfig,
    /// Name shown for player one.
    pub player_one: String,
    /// Name shown for player two.
    pub player_two: String,
    /// Fixed seed for reproducible matches.
    pub seed: Option<u64>,
    /// Milliseconds per meter tick.
    pub frame_ms: u64,
}

/// Runs an interactive hot-seat match in the terminal.
pub async fn run_tui(options: PlayOptions) -> Result<()> {
    // Log to a file so output does not tear the screen
    let log_file = std::fs::File::create("strictly_hoops.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(seed = ?options.seed, frame_ms = options.frame_ms, "Starting Strictly Hoops TUI");

    let rng = match options.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let game = TurnController::new(options.config, options.player_one, options.player_two, rng)?;
    let mut app = App::new(game);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(
        &mut terminal,
        &mut app,
        &Theme::default(),
        Duration::from_millis(options.frame_ms.max(1)),
    )
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(
        shots = app.game().history().len(),
        outcome = ?app.game().outcome(),
        "Leaving Strictly Hoops TUI"
    );
    res
}

/// Draws, drains pending keys, and ticks the meter once per frame.
#[instrument(skip_all, fields(frame = ?frame))]
async fn run_loop<R: RandomSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<R>,
    theme: &Theme,
    frame: Duration,
) -> Result<()> {
    let mut interval = tokio::time::interval(frame);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| draw(f, app, theme))?;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                app.on_key(key.code);
            }
        }
        if app.should_quit() {
            return Ok(());
        }

        interval.tick().await;
        app.on_frame();
    }
}
