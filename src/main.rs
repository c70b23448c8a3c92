//! morsetui - A terminal Morse code player.
//!
//! Type text and hear it as precisely timed Morse code tones, with a live
//! dot/dash rendering of what you typed.
//!
//! # Features
//!
//! - Sample-accurate tone scheduling with correct symbol, letter and word gaps
//! - Adjustable speed (5-60 WPM) and tone frequency (200-1000 Hz)
//! - Character palette and manual dit/dah keying
//! - WAV export
//!
//! # Usage
//!
//! ```bash
//! cargo run                                  # Start the player
//! cargo run -- --wpm 25 --frequency 700      # Start with custom settings
//! cargo run -- --export cq.wav "CQ CQ DE K1ABC"  # Render to WAV and exit
//! ```
//!
//! Press `F1` for help with keyboard shortcuts.

use morsetui::app::{App, FocusedPanel};
use morsetui::audio;
use morsetui::config::Settings;
use morsetui::morse::Symbol;
use morsetui::ui;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line options for the application.
#[derive(Debug, Default)]
struct CliOptions {
    /// Speed override.
    wpm: Option<u32>,
    /// Frequency override.
    frequency: Option<u32>,
    /// Path to a JSON settings file.
    config: Option<PathBuf>,
    /// Render text to this WAV file instead of starting the UI.
    export: Option<(PathBuf, String)>,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `--wpm <n>` or `-w <n>`: Speed in words per minute
    /// - `--frequency <hz>` or `-f <hz>`: Tone frequency
    /// - `--config <path>` or `-c <path>`: Load settings from a JSON file
    /// - `--export <path> <text...>` or `-e <path> <text...>`: Write WAV and exit
    /// - `--help` or `-h`: Print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut options = Self::default();
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "--wpm" | "-w" => {
                    i += 1;
                    let value = args.get(i).context("--wpm requires a number")?;
                    options.wpm = Some(value.parse().context("Invalid --wpm value")?);
                }
                "--frequency" | "-f" => {
                    i += 1;
                    let value = args.get(i).context("--frequency requires a number")?;
                    options.frequency = Some(value.parse().context("Invalid --frequency value")?);
                }
                "--config" | "-c" => {
                    i += 1;
                    let value = args.get(i).context("--config requires a path")?;
                    options.config = Some(PathBuf::from(value));
                }
                "--export" | "-e" => {
                    let path = args
                        .get(i + 1)
                        .context("--export requires an output path")?;
                    let text = args[(i + 2).min(args.len())..].join(" ");
                    if text.trim().is_empty() {
                        anyhow::bail!("--export requires text to render");
                    }
                    options.export = Some((PathBuf::from(path), text));
                    break;
                }
                "--help" | "-h" => {
                    print_help(args.first().map(String::as_str).unwrap_or("morsetui"));
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        Ok(options)
    }

    /// Builds settings from the config file (if any) and CLI overrides.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(wpm) = self.wpm {
            settings.wpm = wpm;
        }
        if let Some(frequency) = self.frequency {
            settings.frequency = frequency;
        }
        Ok(settings.clamped())
    }
}

fn print_help(program: &str) {
    eprintln!("morsetui - Terminal Morse code player");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -w, --wpm N               Speed in words per minute (5-60)");
    eprintln!("  -f, --frequency HZ        Tone frequency in Hz (200-1000)");
    eprintln!("  -c, --config PATH         Load settings from a JSON file");
    eprintln!("  -e, --export PATH TEXT    Render TEXT to a WAV file and exit");
    eprintln!("  -h, --help                Print this help message");
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    // Initialize logging (optional, for debugging)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings()?;

    if let Some((path, text)) = &cli.export {
        let schedule = audio::export_text_to_wav(text, &settings, path)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        println!(
            "Wrote {} ({} tones, {:.2}s at {} WPM, {} Hz)",
            path.display(),
            schedule.tones.len(),
            schedule.total_duration,
            settings.wpm,
            settings.frequency
        );
        if !schedule.skipped.is_empty() {
            let skipped: String = schedule.skipped.iter().collect();
            println!("Skipped unknown characters: {}", skipped);
        }
        return Ok(());
    }

    let mut app = App::new(settings);
    let mut terminal = setup_terminal().context("Failed to setup terminal")?;

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    result
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.update();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events with a short timeout so completion notices show promptly
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Dispatches a key press.
fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.show_help {
        match key.code {
            KeyCode::F(1) | KeyCode::Esc => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::F(1) => {
            app.show_help = true;
            return;
        }
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.cycle_focus();
            return;
        }
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Text => handle_text_key(app, key, ctrl),
        FocusedPanel::Controls => handle_controls_key(app, key),
        FocusedPanel::Palette => handle_palette_key(app, key),
    }
}

fn handle_text_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Enter => app.play_text(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char('u') if ctrl => app.clear_text(),
        KeyCode::Char(c) if !ctrl => app.push_char(c),
        _ => {}
    }
}

fn handle_controls_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Down => app.toggle_control(),
        KeyCode::Left => app.adjust_selected_control(-1),
        KeyCode::Right => app.adjust_selected_control(1),
        KeyCode::Enter => app.play_text(),
        KeyCode::Char('.') => app.key_symbol(Symbol::Dot),
        KeyCode::Char('-') => app.key_symbol(Symbol::Dash),
        _ => {}
    }
}

fn handle_palette_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.move_palette(-1, 0),
        KeyCode::Right => app.move_palette(1, 0),
        KeyCode::Up => app.move_palette(0, -1),
        KeyCode::Down => app.move_palette(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => app.play_selected_char(),
        KeyCode::Char('.') => app.key_symbol(Symbol::Dot),
        KeyCode::Char('-') => app.key_symbol(Symbol::Dash),
        _ => {}
    }
}
