pub mod app;
pub mod ui;

use std::{io, path::PathBuf};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use crate::config::Settings;
use crate::storage::TaskStore;
use app::{App, InputMode, ViewMode};
use ui::ui;

pub fn run_tui(store: TaskStore, settings: Settings, settings_path: PathBuf) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(store, settings, Some(settings_path));

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char('v') => app.cycle_view(),
                KeyCode::Char('t') => app.toggle_theme(),
                _ => match app.view_mode {
                    ViewMode::Tasks => match key.code {
                        KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('a') => app.start_add(),
                        KeyCode::Char('c') => app.toggle_completed_visible(),
                        _ => {}
                    },
                    ViewMode::Templates => {
                        if key.code == KeyCode::Enter {
                            app.start_add_from_template();
                        }
                    }
                    ViewMode::Rewards => {
                        if key.code == KeyCode::Enter {
                            app.claim_selected();
                        }
                    }
                    ViewMode::Memories => match key.code {
                        KeyCode::Right | KeyCode::Char('l') => app.slideshow.next_image(),
                        KeyCode::Left | KeyCode::Char('h') => app.slideshow.prev_image(),
                        KeyCode::Char('n') => app.slideshow.next_memory(),
                        KeyCode::Char('p') => app.slideshow.prev_memory(),
                        _ => {}
                    },
                },
            },
            InputMode::Adding => match key.code {
                KeyCode::Enter => app.handle_input(),
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                _ => {}
            },
        }
    }
}
