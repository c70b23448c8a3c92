//! Help overlay rendering.
//!
//! Displays keyboard shortcuts in a modal overlay.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Key binding entry for the help display.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const GENERAL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "F1",
        description: "Toggle this help",
    },
    KeyBinding {
        key: "Esc",
        description: "Quit",
    },
    KeyBinding {
        key: "Ctrl+C",
        description: "Force quit",
    },
    KeyBinding {
        key: "Tab",
        description: "Cycle focus between panels",
    },
];

const TEXT_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Any character",
        description: "Type into the text field",
    },
    KeyBinding {
        key: "Backspace",
        description: "Delete last character",
    },
    KeyBinding {
        key: "Ctrl+U",
        description: "Clear the text",
    },
    KeyBinding {
        key: "Enter",
        description: "Play the text",
    },
];

const CONTROL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Up / Down",
        description: "Select speed or frequency",
    },
    KeyBinding {
        key: "Left / Right",
        description: "Adjust the selected control",
    },
    KeyBinding {
        key: "Enter",
        description: "Play the text",
    },
];

const PALETTE_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Arrows",
        description: "Select a character",
    },
    KeyBinding {
        key: "Enter / Space",
        description: "Play the selected character",
    },
];

const KEYING_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: ". (not in text)",
        description: "Key a dit",
    },
    KeyBinding {
        key: "- (not in text)",
        description: "Key a dah",
    },
];

/// Renders the help overlay.
///
/// # Arguments
///
/// * `frame` - The frame to render to
/// * `scroll` - Vertical scroll offset
pub fn render_help(frame: &mut Frame, scroll: u16) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Scrollable content
            Constraint::Length(1), // Fixed footer
        ])
        .split(inner);

    let mut lines: Vec<Line<'static>> = Vec::new();

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let sections: [(&'static str, &[KeyBinding]); 5] = [
        ("General", GENERAL_BINDINGS),
        ("Text", TEXT_BINDINGS),
        ("Controls", CONTROL_BINDINGS),
        ("Characters", PALETTE_BINDINGS),
        ("Keying", KEYING_BINDINGS),
    ];

    for (title, bindings) in sections {
        lines.push(Line::from(Span::styled(title, section_style)));
        for binding in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("{:17}", binding.key), key_style),
                Span::styled(binding.description, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }

    let help_text = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(help_text, chunks[0]);

    // Render fixed footer (always visible at bottom)
    let footer = Paragraph::new(Line::from(Span::styled(
        "Scroll: Up/Down  |  Close: F1/Esc",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(footer, chunks[1]);
}
