//! Transport bar rendering.
//!
//! Displays the playback status, current speed and frequency, and the
//! latest status message.

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Renders the transport bar at the top of the screen.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `area` - The area to render in
/// * `app` - Application state
pub fn render_transport(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" morsetui ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Playback status
            Constraint::Length(12), // Speed
            Constraint::Length(12), // Frequency
            Constraint::Min(20),    // Status message
        ])
        .split(inner);

    let play_status = if app.audio_error.is_some() {
        Span::styled(
            " [x] NO AUDIO ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if app.is_playing() {
        Span::styled(
            " [>] PLAYING ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " [.] READY ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(play_status)), chunks[0]);

    let wpm_widget = Paragraph::new(Line::from(vec![
        Span::styled("WPM: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}", app.settings.wpm),
            Style::default().fg(Color::White),
        ),
    ]));
    frame.render_widget(wpm_widget, chunks[1]);

    let freq_widget = Paragraph::new(Line::from(vec![
        Span::styled("Hz: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}", app.settings.frequency),
            Style::default().fg(Color::White),
        ),
    ]));
    frame.render_widget(freq_widget, chunks[2]);

    let status_line = if let Some((msg, _)) = &app.status_message {
        Line::from(Span::styled(
            msg.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
    } else if let Some(err) = &app.audio_error {
        Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled(
            "F1 for help",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}
