//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and mints friend ids for the registry.
//!
//! A key reader thread feeds an mpsc channel; the event loop consumes
//! it and runs each action to completion before reading the next.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::registry::RegistryState;
use crate::types::FriendId;

use super::state::{Action, App, AppEvent, InputMode};
use super::update::dispatch;
use super::view::render;

/// What the interactive session starts with.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Start with an empty roster instead of the seed friends.
    pub empty_roster: bool,
}

impl RunConfig {
    /// Registry the session opens with.
    pub fn initial_registry(&self) -> RegistryState {
        if self.empty_roster {
            RegistryState::default()
        } else {
            RegistryState::seeded()
        }
    }
}

/// Fresh app state for a session described by `config`.
pub fn initial_app(config: &RunConfig) -> App {
    App::with_registry(config.initial_registry())
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// The same key means different things depending on whether a text
/// field has focus. Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Navigate => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
            KeyCode::Char('a') => Some(Action::ToggleAddFriend),
            KeyCode::Tab => Some(Action::CycleFocus),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left | KeyCode::Right => Some(Action::CyclePayer),
            KeyCode::Tab => Some(Action::CycleFocus),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let app_event = match event::read() {
                // Windows reports releases too; only presses are input
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive session until the user quits.
///
/// State lives only for the duration of this call.
pub fn run(config: RunConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let mut app = initial_app(&config);
    info!(friends = app.registry.friends.len(), "session started");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Block on next event
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // key reader gone
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, app.ui.focus.input_mode()) {
                    debug!(?action, focus = ?app.ui.focus, "action");
                    dispatch(&mut app, &action, FriendId::random);
                }
            }
            AppEvent::Resize => {}
        }
    }

    info!(friends = app.registry.friends.len(), "session ended");
    restore_terminal()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
