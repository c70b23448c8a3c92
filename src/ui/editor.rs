//! Text entry and glyph output panels.

use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Renders the text entry field.
///
/// A block cursor is drawn after the text while the field has focus.
pub fn render_text_input(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let block = Block::default()
        .title(" Text (Enter to play) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let mut spans = vec![Span::styled(
        app.text.as_str(),
        Style::default().fg(Color::White),
    )];
    if focused {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    } else if app.text.is_empty() {
        spans.push(Span::styled(
            "Type a message...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let input = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(input, area);
}

/// Renders the Morse glyph rendering of the current text.
pub fn render_glyphs(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Morse ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let output = Paragraph::new(Line::from(Span::styled(
        app.glyphs.as_str(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(output, area);
}
