//! Speed and frequency controls.

use crate::app::{App, Control};
use crate::morse::{MAX_FREQUENCY, MAX_WPM, MIN_FREQUENCY, MIN_WPM};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Fraction of a control's range covered by `value`.
fn ratio(value: u32, min: u32, max: u32) -> f64 {
    if max <= min {
        return 0.0;
    }
    (value.saturating_sub(min) as f64 / (max - min) as f64).clamp(0.0, 1.0)
}

/// Width reserved for the control label.
const LABEL_WIDTH: usize = 16;

/// Builds one slider row: label then a filled/empty bar.
fn slider_line(label: String, ratio: f64, width: u16, selected: bool) -> Line<'static> {
    let bar_width = (width as usize).saturating_sub(LABEL_WIDTH);
    let filled = (ratio * bar_width as f64).round() as usize;

    let (label_style, bar_color) = if selected {
        (
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Color::Cyan,
        )
    } else {
        (Style::default().fg(Color::White), Color::Blue)
    };

    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled("\u{2588}".repeat(filled), Style::default().fg(bar_color)),
        Span::styled(
            "\u{2591}".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Renders the speed and frequency sliders.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `area` - The area to render in
/// * `app` - Application state
/// * `focused` - Whether this panel is focused
pub fn render_controls(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = |control: Control| focused && app.selected_control == control;

    let lines = vec![
        slider_line(
            format!("Speed {} WPM", app.settings.wpm),
            ratio(app.settings.wpm, MIN_WPM, MAX_WPM),
            inner.width,
            selected(Control::Speed),
        ),
        slider_line(
            format!("Tone {} Hz", app.settings.frequency),
            ratio(app.settings.frequency, MIN_FREQUENCY, MAX_FREQUENCY),
            inner.width,
            selected(Control::Frequency),
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_bounds() {
        assert_eq!(ratio(MIN_WPM, MIN_WPM, MAX_WPM), 0.0);
        assert_eq!(ratio(MAX_WPM, MIN_WPM, MAX_WPM), 1.0);
        assert_eq!(ratio(0, MIN_WPM, MAX_WPM), 0.0);
        assert_eq!(ratio(600, 200, 1000), 0.5);
        assert_eq!(ratio(5, 5, 5), 0.0);
    }

    #[test]
    fn test_slider_line_fills_bar() {
        let line = slider_line("Speed 20 WPM".to_string(), 0.5, 36, false);
        assert_eq!(line.spans[0].content.chars().count(), LABEL_WIDTH);
        assert_eq!(line.spans[1].content.chars().count(), 10);
        assert_eq!(line.spans[2].content.chars().count(), 10);

        let narrow = slider_line("Tone 600 Hz".to_string(), 1.0, 4, true);
        assert!(narrow.spans[1].content.is_empty());
        assert!(narrow.spans[2].content.is_empty());
    }
}
