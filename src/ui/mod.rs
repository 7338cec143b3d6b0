//! Widget rendering for Skycast
//!
//! Renders the single-screen weather widget: header with the city name,
//! sky panel with its selector, landscape panel, colored temperature
//! panel, error banner, and footer key hints.

pub mod help_overlay;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::scheme::{color_for, landscape_for, sky_scene_for, ColorToken, SkySelection};

/// Maps a scheme color token to a terminal color.
fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Teal => Color::Cyan,
        ColorToken::Green => Color::Green,
        ColorToken::Yellow => Color::Yellow,
        ColorToken::Orange => Color::LightRed,
        ColorToken::Red => Color::Red,
    }
}

/// Renders the whole widget.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header: city name
            Constraint::Length(3), // sky scene
            Constraint::Length(3), // landscape scene
            Constraint::Length(5), // temperature
            Constraint::Length(1), // error banner
            Constraint::Length(3), // footer hints
            Constraint::Min(0),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_sky(frame, app, chunks[1]);
    render_landscape(frame, app, chunks[2]);
    render_temperature(frame, app, chunks[3]);
    render_banner(frame, app, chunks[4]);
    render_footer(frame, app, chunks[5]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders the header with the city name, updated live while editing.
fn render_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let editing = app.input_mode == InputMode::EditingCity;

    let mut spans = vec![Span::styled(
        format!("Weather in {}", app.display.city),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if editing {
        spans.push(Span::styled(
            "  (editing — Enter to finish)",
            Style::default().fg(Color::Yellow),
        ));
    }

    let border_color = if editing { Color::Yellow } else { Color::Cyan };
    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(header, area);
}

/// Renders the sky scene with the selector labels, current choice bold.
fn render_sky(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mut title_spans = vec![Span::raw(" Sky ")];
    for (i, sky) in SkySelection::all().iter().enumerate() {
        let style = if *sky == app.display.sky {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        title_spans.push(Span::styled(format!("{}:{} ", i + 1, sky.label()), style));
    }

    let scene = Paragraph::new(sky_scene_for(app.display.sky))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(title_spans)),
        );
    frame.render_widget(scene, area);
}

/// Renders the landscape derived from the temperature category.
///
/// Before the first reading arrives there is no category yet, so the
/// panel stays blank rather than guessing a scene.
fn render_landscape(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let scene = app.display.category.map(landscape_for).unwrap_or("");
    let landscape = Paragraph::new(scene)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Landscape "));
    frame.render_widget(landscape, area);
}

/// Renders the temperature reading in its category color.
fn render_temperature(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let lines = match (app.display.temperature_f, app.display.category) {
        (Some(temp_f), Some(category)) => {
            let color = token_color(color_for(category));
            vec![
                Line::from(Span::styled(
                    format!("{temp_f}°F"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{category:?}"),
                    Style::default().fg(color),
                )),
            ]
        }
        _ => {
            let label = if app.fetch_in_flight {
                "fetching…"
            } else {
                "--"
            };
            vec![Line::from(Span::styled(
                label,
                Style::default().fg(Color::DarkGray),
            ))]
        }
    };

    let temperature = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Temperature (+/-) "),
        );
    frame.render_widget(temperature, area);
}

/// Renders the transient error banner line, empty when no banner is armed.
fn render_banner(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if let Some(message) = app.banner_message() {
        let banner = Paragraph::new(Span::styled(
            message,
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(banner, area);
    }
}

/// Renders the footer with key hints and the last refresh time.
fn render_footer(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let refreshed = app
        .last_refresh
        .map(|t| format!("updated {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "not yet updated".to_string());

    let hints = Line::from(vec![
        Span::styled("g", Style::default().fg(Color::Yellow)),
        Span::raw(" fetch  "),
        Span::styled("e", Style::default().fg(Color::Yellow)),
        Span::raw(" city  "),
        Span::styled("1-4", Style::default().fg(Color::Yellow)),
        Span::raw(" sky  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" reset  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled(refreshed, Style::default().fg(Color::DarkGray)),
    ]);

    let footer = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StatePatch;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_content(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_city_and_placeholder_reading() {
        let app = App::default();
        let content = buffer_content(&app);

        assert!(content.contains("Seattle"), "Should show the default city");
        assert!(
            content.contains("--") || content.contains("fetching"),
            "Should show a placeholder before the first reading"
        );
    }

    #[test]
    fn test_render_shows_reading_and_category() {
        let mut app = App::default();
        app.apply(StatePatch::temperature(72));
        let content = buffer_content(&app);

        assert!(content.contains("72"), "Should show the reading");
        assert!(content.contains("Hot"), "Should show the category label");
    }

    #[test]
    fn test_render_shows_banner_message() {
        let mut app = App::default();
        app.report("Please enter a city name.", None);
        let content = buffer_content(&app);

        assert!(content.contains("Please enter a city name."));
    }

    #[test]
    fn test_render_help_overlay_when_toggled() {
        let mut app = App::default();
        app.show_help = true;
        let content = buffer_content(&app);

        assert!(content.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_token_color_mapping_is_total() {
        for token in [
            ColorToken::Teal,
            ColorToken::Green,
            ColorToken::Yellow,
            ColorToken::Orange,
            ColorToken::Red,
        ] {
            // Just exercising the exhaustive match
            let _ = token_color(token);
        }
    }
}
