//! Application state management for Skycast
//!
//! This module contains the display state, the single update entry point
//! all mutations funnel through, keyboard handling, the transient error
//! banner, and the request-token fencing that keeps overlapping fetches
//! from overwriting newer results with older ones.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::StartupConfig;
use crate::data::{FetchError, ProxyClient, WeatherReport};
use crate::scheme::{classify, Category, SkySelection, DEFAULT_CITY, DEFAULT_SKY};

/// How long the error banner stays visible.
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

/// How many diagnostic entries to keep for the session.
const MAX_DIAGNOSTICS: usize = 20;

/// Whether keystrokes drive the widget or edit the city input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys trigger widget operations
    Normal,
    /// Keys edit the city name, updating the header label live
    EditingCity,
}

/// The in-memory snapshot of what the widget currently shows.
///
/// Owned by [`App`] and mutated only through [`App::apply`], so the
/// derived category can never drift from the temperature reading.
#[derive(Debug, Clone)]
pub struct DisplayState {
    /// City name shown in the header and used for fetches
    pub city: String,
    /// User-selected sky scene
    pub sky: SkySelection,
    /// Current temperature reading, unset until the first fetch or adjustment
    pub temperature_f: Option<i32>,
    /// Temperature band derived from the reading
    pub category: Option<Category>,
}

/// A partial update merged into [`DisplayState`] through [`App::apply`].
///
/// Only the fields that are present are applied.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    /// New city label
    pub city: Option<String>,
    /// New sky selection
    pub sky: Option<SkySelection>,
    /// New temperature reading
    pub temperature_f: Option<i32>,
}

impl StatePatch {
    /// Patch that only changes the city label.
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the sky selection.
    pub fn sky(sky: SkySelection) -> Self {
        Self {
            sky: Some(sky),
            ..Self::default()
        }
    }

    /// Patch that only changes the temperature reading.
    pub fn temperature(temp_f: i32) -> Self {
        Self {
            temperature_f: Some(temp_f),
            ..Self::default()
        }
    }
}

/// Transient error banner with its scheduled dismissal time.
///
/// Arming a new banner replaces the old one and its deadline, so an
/// earlier banner's expiry can never hide a newer message early.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    /// Message shown to the user
    pub message: String,
    expires_at: Instant,
}

/// Completion of a spawned fetch task, delivered over the main loop's
/// channel.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Token handed out by [`App::begin_fetch`] for this request
    pub token: u64,
    /// The pipeline's result
    pub result: Result<WeatherReport, FetchError>,
}

/// Main application struct managing state and input
pub struct App {
    /// What the widget currently shows
    pub display: DisplayState,
    /// Current input mode
    pub input_mode: InputMode,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a fetch has been requested; consumed by the event loop
    pub fetch_requested: bool,
    /// Whether a fetch task is currently in flight
    pub fetch_in_flight: bool,
    /// Timestamp of the last successful fetch
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Active error banner, if any
    banner: Option<ErrorBanner>,
    /// Bounded in-memory diagnostics log (newest last)
    diagnostics: Vec<String>,
    /// Token of the most recently issued fetch; older completions are stale
    latest_token: u64,
    /// Weather proxy client
    client: ProxyClient,
}

impl App {
    /// Creates a new App from the startup configuration.
    ///
    /// The initial fetch for the configured city is requested immediately,
    /// matching the widget's load-time behavior.
    pub fn new(config: StartupConfig) -> Self {
        Self {
            display: DisplayState {
                city: config.city,
                sky: config.sky,
                temperature_f: None,
                category: None,
            },
            input_mode: InputMode::Normal,
            should_quit: false,
            fetch_requested: true,
            fetch_in_flight: false,
            last_refresh: None,
            show_help: false,
            banner: None,
            diagnostics: Vec::new(),
            latest_token: 0,
            client: ProxyClient::new().with_base_url(config.base_url),
        }
    }

    /// Returns a clone of the proxy client for a spawned fetch task.
    pub fn proxy_client(&self) -> ProxyClient {
        self.client.clone()
    }

    /// Merges a patch into the display state.
    ///
    /// This is the single entry point for all state mutation: a
    /// temperature change recomputes the category here, so every caller
    /// (fetch completion, increment, decrement, reset, city editing, sky
    /// selection) gets consistent derived values for free.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(city) = patch.city {
            self.display.city = city;
        }
        if let Some(sky) = patch.sky {
            self.display.sky = sky;
        }
        if let Some(temp_f) = patch.temperature_f {
            self.display.temperature_f = Some(temp_f);
            self.display.category = Some(classify(temp_f));
        }
    }

    /// Increments the temperature reading by one degree.
    pub fn increment_temp(&mut self) {
        self.adjust_temp(1);
    }

    /// Decrements the temperature reading by one degree.
    pub fn decrement_temp(&mut self) {
        self.adjust_temp(-1);
    }

    /// Adjusts the reading by `delta`, routing the result through
    /// [`App::apply`]. An unset reading is treated as 0 with a notice,
    /// as the widget always did.
    fn adjust_temp(&mut self, delta: i32) {
        let current = match self.display.temperature_f {
            Some(temp_f) => temp_f,
            None => {
                self.report("Invalid temperature value detected, defaulting to 0", None);
                0
            }
        };
        self.apply(StatePatch::temperature(current + delta));
    }

    /// Issues a new fetch token and marks a fetch in flight.
    ///
    /// Completions carrying anything but the most recent token are
    /// discarded in [`App::handle_fetch_outcome`].
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_token += 1;
        self.fetch_in_flight = true;
        self.latest_token
    }

    /// Consumes the pending fetch request flag.
    pub fn take_fetch_request(&mut self) -> bool {
        std::mem::take(&mut self.fetch_requested)
    }

    /// Applies a completed fetch, or reports its failure.
    ///
    /// Stale completions (an older request finishing after a newer one was
    /// issued) are logged and dropped; the display state never moves
    /// backwards. Failures leave the display state untouched.
    pub fn handle_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.token != self.latest_token {
            self.log_diagnostic(format!(
                "discarded stale fetch completion (token {} < {})",
                outcome.token, self.latest_token
            ));
            return;
        }
        self.fetch_in_flight = false;

        match outcome.result {
            Ok(report) => {
                // Success only moves the reading; the city label belongs to
                // the user and may have been edited while the fetch was in
                // flight
                self.apply(StatePatch::temperature(report.temperature_f));
                self.last_refresh = Some(report.fetched_at.with_timezone(&Local));
            }
            Err(err) => {
                let detail = err.detail();
                self.report(&err.to_string(), detail);
            }
        }
    }

    /// Reports an error: logs it to the diagnostics sink and arms the
    /// transient banner.
    pub fn report(&mut self, message: &str, detail: Option<String>) {
        self.report_at(message, detail, Instant::now());
    }

    /// [`App::report`] with an explicit clock, for timer simulation in tests.
    pub fn report_at(&mut self, message: &str, detail: Option<String>, now: Instant) {
        match &detail {
            Some(detail) => self.log_diagnostic(format!("{message} — {detail}")),
            None => self.log_diagnostic(message.to_string()),
        }
        // Replaces any pending banner and its dismissal deadline.
        self.banner = Some(ErrorBanner {
            message: message.to_string(),
            expires_at: now + BANNER_DURATION,
        });
    }

    /// Clears the banner once its dismissal time has passed.
    ///
    /// Called every event-loop iteration.
    pub fn tick(&mut self, now: Instant) {
        if let Some(banner) = &self.banner {
            if now >= banner.expires_at {
                self.banner = None;
            }
        }
    }

    /// Returns the currently visible banner message, if any.
    pub fn banner_message(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.message.as_str())
    }

    /// Returns the session diagnostics log, newest entry last.
    #[allow(dead_code)]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    fn log_diagnostic(&mut self, entry: String) {
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.remove(0);
        }
        self.diagnostics.push(entry);
    }

    /// Resets the widget to its defaults and refetches.
    fn reset(&mut self) {
        self.apply(StatePatch {
            city: Some(DEFAULT_CITY.to_string()),
            sky: Some(DEFAULT_SKY),
            temperature_f: None,
        });
        self.fetch_requested = true;
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: Quit the application
    /// - `+`/`=`/`Up`: Increment temperature
    /// - `-`/`Down`: Decrement temperature
    /// - `e`: Edit the city name (chars/Backspace edit, `Enter`/`Esc` finish)
    /// - `g` or `Enter`: Get current weather for the city
    /// - `1`-`4`: Select sky scene
    /// - `r`: Reset to defaults and refetch
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::EditingCity => match key_event.code {
                KeyCode::Char(c) => {
                    let mut city = self.display.city.clone();
                    city.push(c);
                    self.apply(StatePatch::city(city));
                }
                KeyCode::Backspace => {
                    let mut city = self.display.city.clone();
                    city.pop();
                    self.apply(StatePatch::city(city));
                }
                KeyCode::Enter | KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                }
                _ => {}
            },
            InputMode::Normal => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                    self.increment_temp();
                }
                KeyCode::Char('-') | KeyCode::Down => {
                    self.decrement_temp();
                }
                KeyCode::Char('e') => {
                    self.input_mode = InputMode::EditingCity;
                }
                KeyCode::Char('g') | KeyCode::Enter => {
                    self.fetch_requested = true;
                }
                KeyCode::Char('1') => {
                    self.apply(StatePatch::sky(SkySelection::Sunny));
                }
                KeyCode::Char('2') => {
                    self.apply(StatePatch::sky(SkySelection::Cloudy));
                }
                KeyCode::Char('3') => {
                    self.apply(StatePatch::sky(SkySelection::Rainy));
                }
                KeyCode::Char('4') => {
                    self.apply(StatePatch::sky(SkySelection::Snowy));
                }
                KeyCode::Char('r') => {
                    self.reset();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(StartupConfig::default())
    }
}
