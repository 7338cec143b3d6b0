//! Skycast - view current weather for a city in your terminal
//!
//! A terminal UI widget that fetches geocoding and current-weather data
//! from a configurable proxy and renders a color-coded temperature
//! reading, an emoji landscape scene, and a selectable sky scene.

mod app;
mod cli;
mod data;
mod scheme;
mod ui;

use std::io;
use std::panic;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{App, FetchOutcome};
use cli::{Cli, StartupConfig};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments before touching the terminal so argument errors
    // print normally
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli)?;

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance; the initial fetch is already requested
    let mut app = App::new(config);

    // Channel carrying fetch completions back onto the main loop, so all
    // state mutation happens from this one thread of control
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<FetchOutcome>(8);

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Drain completed fetches
        while let Ok(outcome) = outcome_rx.try_recv() {
            app.handle_fetch_outcome(outcome);
        }

        // Expire the error banner when its dismissal time passes
        app.tick(Instant::now());

        // Spawn a fetch task if one was requested
        if app.take_fetch_request() {
            let token = app.begin_fetch();
            let client = app.proxy_client();
            let city = app.display.city.clone();
            let tx = outcome_tx.clone();
            tokio::spawn(async move {
                let result = client.fetch_weather(&city).await;
                let _ = tx.send(FetchOutcome { token, result }).await;
            });
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
