//! Terminal user interface components.
//!
//! This module provides the visual components for the Morse player:
//! the transport bar, text entry, glyph output, controls and character
//! palette.

mod controls;
mod editor;
mod help;
mod palette;
mod transport;

use crate::app::{App, FocusedPanel};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub use controls::render_controls;
pub use editor::{render_glyphs, render_text_input};
pub use help::render_help;
pub use palette::render_palette;
pub use transport::render_transport;

/// Renders the complete UI layout.
///
/// The layout is divided into:
/// - Top: Transport bar with playback status and settings
/// - Text entry and its Morse rendering
/// - Speed and frequency controls
/// - Character palette
/// - Bottom: Key hints for the focused panel
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport
            Constraint::Length(3), // Text input
            Constraint::Min(3),    // Glyphs
            Constraint::Length(4), // Controls
            Constraint::Length(7), // Palette
            Constraint::Length(1), // Hints
        ])
        .split(frame.area());

    render_transport(frame, chunks[0], app);
    render_text_input(
        frame,
        chunks[1],
        app,
        app.focused_panel == FocusedPanel::Text,
    );
    render_glyphs(frame, chunks[2], app);
    render_controls(
        frame,
        chunks[3],
        app,
        app.focused_panel == FocusedPanel::Controls,
    );
    render_palette(
        frame,
        chunks[4],
        app,
        app.focused_panel == FocusedPanel::Palette,
    );
    render_hints(frame, chunks[5], app);

    if app.show_help {
        render_help(frame, app.help_scroll);
    }
}

/// Renders a one-line key hint bar for the focused panel.
fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.focused_panel {
        FocusedPanel::Text => &[("[Enter]", " Play  "), ("[Tab]", " Next  "), ("[Esc]", " Quit")],
        FocusedPanel::Controls => &[
            ("[Up/Down]", " Select  "),
            ("[Left/Right]", " Adjust  "),
            ("[.-]", " Key  "),
            ("[Tab]", " Next"),
        ],
        FocusedPanel::Palette => &[
            ("[Arrows]", " Select  "),
            ("[Enter]", " Play  "),
            ("[.-]", " Key  "),
            ("[Tab]", " Next"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|&(key, desc)| {
            [
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::styled(desc, Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
