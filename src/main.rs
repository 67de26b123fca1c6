//! STAFFDESK - Terminal Employee Registry
//!
//! A terminal-based employee registry, built in Rust. The user signs in,
//! adds employees through a validated entry form, and each accepted record
//! is announced by a transactional email before being saved to a local
//! roster file and shown in a sortable, filterable table.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dotenv::dotenv;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::{EmailJsGateway, IdentityProvider, RosterStore, Services};
use presentation::{InputHandler, render_ui};

/// Entry point for the staffdesk terminal application.
///
/// Loads configuration, sets up the terminal interface, and runs the main
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the identity key is missing, if terminal setup
/// fails, or if the stored roster cannot be read on sign-in.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    // The identity key is required up front; missing email settings only
    // surface as a configuration error at submission time.
    let identity = IdentityProvider::from_env()?;
    let gateway = EmailJsGateway::from_env();
    let store = RosterStore::from_env();
    let services = Services {
        identity: &identity,
        gateway: &gateway,
        store: &store,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, &services);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing. Continues
/// running until the user presses 'q' on the sign-in screen or in the
/// roster view.
///
/// # Errors
///
/// Returns an error if terminal operations fail or if the stored roster
/// is unreadable when hydrating on sign-in.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    services: &Services,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q')
                        if matches!(
                            app.mode,
                            application::AppMode::Roster | application::AppMode::SignedOut
                        ) =>
                    {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers, services)?,
                }
            }
        }
    }
}
