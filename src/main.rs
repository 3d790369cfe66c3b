use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use fruitswap::constants::POLL_MS;
use fruitswap::GameConfig;

mod app;
mod input;
mod logging;
mod ui;

use app::{App, AppSettings};
use input::handle_input;
use ui::ui;

fn main() -> anyhow::Result<()> {
    let settings = AppSettings::from_env();
    if let Some(path) = &settings.log_path {
        logging::init_log_file(path)?;
    }
    let config = GameConfig::from_env();

    // Setup terminal
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, settings);
    let result = run(&mut terminal, &mut app);

    // Cleanup, even if the game loop failed
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(POLL_MS))? {
            if let Event::Key(KeyEvent {
                code, kind, modifiers, ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        if kind == KeyEventKind::Press {
                            return Ok(());
                        }
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        if kind == KeyEventKind::Press {
                            app.reset();
                        }
                    }
                    _ => {
                        handle_input(app, code, kind, modifiers);
                    }
                }
            }
        }

        app.update(Instant::now());
    }
}
