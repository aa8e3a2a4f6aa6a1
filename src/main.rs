//! Streamline - terminal grid puzzle
//!
//! Loads one level, a directory of levels, or a random default level, then
//! runs the game in the terminal until the last level is passed or the
//! player quits.

use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};

use streamline::application::App;
use streamline::domain::GameError;
use streamline::infrastructure::{Cli, LevelRepository, init_logger};
use streamline::presentation::{InputHandler, TerminalGuard, render_ui, scene_size};

/// Redraw interval while the win animation plays.
const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    init_logger(&settings.logging).context("failed to set up logging")?;
    tracing::info!(path = ?cli.path, "starting streamline");

    let levels = match LevelRepository::load_levels(cli.path.as_deref(), &settings.game, cli.seed) {
        Ok(levels) => levels,
        Err(GameError::NotFound(path)) => {
            tracing::error!(path = %path.display(), "level path does not exist");
            println!("File {} does not exist. Exiting...", path.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load levels");
            println!("{}. Exiting...", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let mut app = App::from_levels(levels, settings.animation)
        .context("no levels to play")?;

    let mut guard = TerminalGuard::enter(io::stdout()).context("failed to set up terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    guard.restore().context("failed to restore terminal")?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal error");
        println!("{err:?}");
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!(level = app.level_number, of = app.level_count, "exiting");
    Ok(ExitCode::SUCCESS)
}

/// Main event loop.
///
/// Blocks on input while idle. While the win animation plays, input is
/// polled with a frame timeout and the animation advances by the measured
/// time between frames.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let size = terminal.size()?;
        let (width, height) = scene_size(Rect::new(0, 0, size.width, size.height));
        app.resize(width, height);

        terminal.draw(|f| render_ui(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        if app.is_animating() {
            if event::poll(FRAME_TIME)? {
                handle_event(app, event::read()?);
            }
            let now = Instant::now();
            app.tick(now - last_frame);
            last_frame = now;
        } else {
            handle_event(app, event::read()?);
            last_frame = Instant::now();
        }
    }
}

fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            InputHandler::handle_key_event(app, key.code, key.modifiers);
        }
    }
}
