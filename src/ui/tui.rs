//! Terminal setup and the main event loop.

use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{app::App, config::Settings};

/// Roughly 60 frames per second.
const FRAME_TIME: Duration = Duration::from_millis(16);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run(settings: &Settings, start_dir: PathBuf) -> Result<()> {
    // Build the app before touching the terminal so errors print normally.
    let mut app = App::new(settings, start_dir)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        app.process_metadata();
        app.update_visualizer(dt);
        terminal.draw(|f| app.draw(f))?;

        let timeout = FRAME_TIME.saturating_sub(now.elapsed());
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key) {
                    log::info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}
