//! Character button palette.
//!
//! Shows one button per table character. The selected button is
//! highlighted and its pattern is shown in the title.

use crate::app::{App, PALETTE_COLUMNS};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Builds one row of palette buttons.
fn build_palette_row(
    chars: &[char],
    first_index: usize,
    app: &App,
    focused: bool,
) -> Vec<Span<'static>> {
    chars
        .iter()
        .enumerate()
        .map(|(offset, &ch)| {
            let is_selected = first_index + offset == app.palette_index;

            let style = if is_selected && focused {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else if ch.is_ascii_alphanumeric() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            };

            Span::styled(format!(" {} ", ch), style)
        })
        .flat_map(|button| [button, Span::raw(" ")])
        .collect()
}

/// Renders the character palette.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `area` - The area to render in
/// * `app` - Application state
/// * `focused` - Whether this panel is focused
pub fn render_palette(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let selected = app.palette.get(app.palette_index).copied();
    let title = match selected {
        Some(ch) if focused => format!(
            " Characters: {} {} ",
            ch,
            app.glyph_for(ch).unwrap_or_default()
        ),
        _ => " Characters ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let lines: Vec<Line> = app
        .palette
        .chunks(PALETTE_COLUMNS)
        .enumerate()
        .map(|(row, chars)| {
            Line::from(build_palette_row(
                chars,
                row * PALETTE_COLUMNS,
                app,
                focused,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
