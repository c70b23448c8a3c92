//! Application state and event handling.
//!
//! This module defines the application state that ties the text being
//! edited, the speed and frequency controls, the player and the audio
//! output together for the TUI.

use crate::audio::{AudioEngine, ToneSink};
use crate::config::{clamp_frequency, clamp_wpm, Settings};
use crate::error::PlaybackError;
use crate::morse::{to_glyphs, Symbol};
use crate::player::Player;
use std::time::{Duration, Instant};

/// How long status messages stay visible.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Frequency step for one press of the frequency control.
pub const FREQUENCY_STEP: i32 = 10;

/// Number of palette buttons per row.
pub const PALETTE_COLUMNS: usize = 13;

/// Opens the audio output on demand.
///
/// Boxed so tests can stand in a recording sink for the real device.
pub type AudioOpener = Box<dyn Fn(u32) -> Result<Box<dyn ToneSink>, PlaybackError>>;

/// The currently focused UI panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    /// Text entry field.
    #[default]
    Text,
    /// Speed and frequency controls.
    Controls,
    /// Character button palette.
    Palette,
}

impl FocusedPanel {
    /// Returns the next panel in Tab order.
    pub fn next(self) -> Self {
        match self {
            FocusedPanel::Text => FocusedPanel::Controls,
            FocusedPanel::Controls => FocusedPanel::Palette,
            FocusedPanel::Palette => FocusedPanel::Text,
        }
    }
}

/// The control selected in the Controls panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Speed,
    Frequency,
}

/// Main application state.
pub struct App {
    /// Current speed and frequency settings.
    pub settings: Settings,
    /// Session coordinator.
    player: Player,
    /// Audio output, opened on first use.
    audio: Option<Box<dyn ToneSink>>,
    /// Opens the audio output.
    open_audio: AudioOpener,
    /// Last capability error, shown until audio opens successfully.
    pub audio_error: Option<String>,
    /// Text entered by the user.
    pub text: String,
    /// Glyph rendering of `text`, kept in sync on every edit.
    pub glyphs: String,
    /// Currently focused UI panel.
    pub focused_panel: FocusedPanel,
    /// Selected control in the Controls panel.
    pub selected_control: Control,
    /// Characters offered in the palette, in display order.
    pub palette: Vec<char>,
    /// Index of the selected palette button.
    pub palette_index: usize,
    /// Status message with timestamp (for auto-clear).
    pub status_message: Option<(String, Instant)>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Help overlay scroll position.
    pub help_scroll: u16,
    /// Set when the user asks to quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the application using the default audio device.
    pub fn new(settings: Settings) -> Self {
        Self::with_audio_opener(
            settings,
            Box::new(|rate| {
                AudioEngine::new(rate).map(|engine| Box::new(engine) as Box<dyn ToneSink>)
            }),
        )
    }

    /// Creates the application with a custom audio opener.
    pub fn with_audio_opener(settings: Settings, open_audio: AudioOpener) -> Self {
        let settings = settings.clamped();
        let player = Player::new(settings.completion_margin());
        let palette = player.table().characters();

        Self {
            settings,
            player,
            audio: None,
            open_audio,
            audio_error: None,
            text: String::new(),
            glyphs: String::new(),
            focused_panel: FocusedPanel::default(),
            selected_control: Control::default(),
            palette,
            palette_index: 0,
            status_message: None,
            show_help: false,
            help_scroll: 0,
            should_quit: false,
        }
    }

    /// Returns whether a playback session is active.
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Returns whether audio output is open.
    pub fn audio_ready(&self) -> bool {
        self.audio.is_some()
    }

    /// Per-frame housekeeping: completion notifications and status expiry.
    pub fn update(&mut self) {
        if let Some(finished) = self.player.poll_finished() {
            self.set_status(format!(
                "Playback finished ({:.1}s)",
                finished.total_duration
            ));
        }
        self.clear_expired_status();
    }

    /// Sets a status message to display temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clears expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    /// Opens the audio output if it is not open yet.
    ///
    /// Safe to call repeatedly. On failure the error is shown and every
    /// audio action stays inert; the next action tries again.
    fn ensure_audio(&mut self) -> bool {
        if self.audio.is_none() {
            match (self.open_audio)(self.settings.sample_rate) {
                Ok(sink) => {
                    self.audio = Some(sink);
                    self.audio_error = None;
                }
                Err(e) => {
                    tracing::error!("Failed to open audio output: {}", e);
                    self.set_status(e.to_string());
                    self.audio_error = Some(e.to_string());
                    return false;
                }
            }
        }
        true
    }

    /// Replaces the text and refreshes the glyph rendering.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.refresh_glyphs();
    }

    /// Appends a typed character.
    pub fn push_char(&mut self, ch: char) {
        self.text.push(ch);
        self.refresh_glyphs();
    }

    /// Removes the last character.
    pub fn pop_char(&mut self) {
        self.text.pop();
        self.refresh_glyphs();
    }

    /// Clears the text.
    pub fn clear_text(&mut self) {
        self.text.clear();
        self.refresh_glyphs();
    }

    /// Returns the '.'/'-' pattern for a character.
    pub fn glyph_for(&self, ch: char) -> Option<String> {
        self.player.table().pattern_string(ch)
    }

    fn refresh_glyphs(&mut self) {
        self.glyphs = to_glyphs(self.player.table(), &self.text);
    }

    /// Plays the entered text.
    pub fn play_text(&mut self) {
        let text = self.text.clone();
        self.play(&text);
    }

    /// Plays the selected palette character.
    pub fn play_selected_char(&mut self) {
        if let Some(&ch) = self.palette.get(self.palette_index) {
            let pattern = self.glyph_for(ch).unwrap_or_default();
            if self.play(&ch.to_string()) {
                self.set_status(format!("{}  {}", ch, pattern));
            }
        }
    }

    /// Starts a session for `text`. Returns true if one was started.
    fn play(&mut self, text: &str) -> bool {
        if !self.ensure_audio() {
            return false;
        }
        let Some(sink) = self.audio.as_deref() else {
            return false;
        };

        match self.player.play_text(
            sink,
            text,
            self.settings.wpm,
            self.settings.frequency as f64,
        ) {
            Ok(started) => {
                if started.schedule.skipped.is_empty() {
                    self.set_status(format!(
                        "Playing {:.1}s at {} WPM",
                        started.schedule.total_duration, self.settings.wpm
                    ));
                } else {
                    let skipped: String = started.schedule.skipped.iter().collect();
                    self.set_status(format!("Skipped unknown characters: {}", skipped));
                }
                true
            }
            // Refused silently: the session in flight keeps going
            Err(PlaybackError::AlreadyPlaying) => false,
            Err(e) => {
                self.set_status(e.to_string());
                false
            }
        }
    }

    /// Keys a single dot or dash immediately.
    pub fn key_symbol(&mut self, symbol: Symbol) {
        if !self.ensure_audio() {
            return;
        }
        if let Some(sink) = self.audio.as_deref() {
            self.player.key_symbol(
                sink,
                symbol,
                self.settings.wpm,
                self.settings.frequency as f64,
            );
        }
    }

    /// Changes the speed by `delta` WPM, within the control's range.
    pub fn adjust_wpm(&mut self, delta: i32) {
        let wpm = (self.settings.wpm as i32 + delta).max(0) as u32;
        self.settings.wpm = clamp_wpm(wpm);
    }

    /// Changes the frequency by `delta` Hz, within the control's range.
    pub fn adjust_frequency(&mut self, delta: i32) {
        let frequency = (self.settings.frequency as i32 + delta).max(0) as u32;
        self.settings.frequency = clamp_frequency(frequency);
    }

    /// Adjusts whichever control is selected by `steps`.
    pub fn adjust_selected_control(&mut self, steps: i32) {
        match self.selected_control {
            Control::Speed => self.adjust_wpm(steps),
            Control::Frequency => self.adjust_frequency(steps * FREQUENCY_STEP),
        }
    }

    /// Toggles between the speed and frequency controls.
    pub fn toggle_control(&mut self) {
        self.selected_control = match self.selected_control {
            Control::Speed => Control::Frequency,
            Control::Frequency => Control::Speed,
        };
    }

    /// Moves focus to the next panel.
    pub fn cycle_focus(&mut self) {
        self.focused_panel = self.focused_panel.next();
    }

    /// Moves the palette selection by a column and row offset.
    pub fn move_palette(&mut self, dx: i32, dy: i32) {
        if self.palette.is_empty() {
            return;
        }
        let last = self.palette.len() as i32 - 1;
        let index = self.palette_index as i32 + dx + dy * PALETTE_COLUMNS as i32;
        self.palette_index = index.clamp(0, last) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morse::{ScheduledTone, MAX_FREQUENCY, MAX_WPM, MIN_WPM};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Recording sink whose tone list is shared with the test.
    struct SharedSink(Rc<RefCell<Vec<ScheduledTone>>>);

    impl ToneSink for SharedSink {
        fn current_time(&self) -> f64 {
            0.0
        }

        fn play_tone(&self, start_time: f64, duration: f64, frequency: f64) {
            self.0.borrow_mut().push(ScheduledTone {
                start_time,
                duration,
                frequency,
            });
        }
    }

    fn app_with_sink() -> (App, Rc<RefCell<Vec<ScheduledTone>>>) {
        let tones = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::clone(&tones);
        let app = App::with_audio_opener(
            Settings {
                completion_margin_ms: 60_000,
                ..Settings::default()
            },
            Box::new(move |_| Ok(Box::new(SharedSink(Rc::clone(&shared))) as Box<dyn ToneSink>)),
        );
        (app, tones)
    }

    #[test]
    fn test_text_edits_refresh_glyphs() {
        let (mut app, _) = app_with_sink();
        app.push_char('s');
        app.push_char('o');
        assert_eq!(app.glyphs, "... ---");
        app.pop_char();
        assert_eq!(app.glyphs, "...");
        app.set_text("a b");
        assert_eq!(app.glyphs, ".- / -...");
        app.clear_text();
        assert!(app.glyphs.is_empty());
    }

    #[test]
    fn test_play_text_schedules_tones() {
        let (mut app, tones) = app_with_sink();
        app.set_text("SOS");
        app.play_text();
        assert_eq!(tones.borrow().len(), 9);
        assert!(app.is_playing());
        assert!(app.audio_ready());
    }

    #[test]
    fn test_second_play_ignored() {
        let (mut app, tones) = app_with_sink();
        app.set_text("E");
        app.play_text();
        app.set_text("TEST");
        app.play_text();
        assert_eq!(tones.borrow().len(), 1);
    }

    #[test]
    fn test_empty_text_reports_status() {
        let (mut app, tones) = app_with_sink();
        app.set_text("   ");
        app.play_text();
        assert!(tones.borrow().is_empty());
        let (msg, _) = app.status_message.clone().unwrap();
        assert_eq!(msg, "Text input is empty");
    }

    #[test]
    fn test_capability_error_then_retry() {
        let attempts = Rc::new(Cell::new(0));
        let counter = Rc::clone(&attempts);
        let mut app = App::with_audio_opener(
            Settings::default(),
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                if counter.get() == 1 {
                    Err(PlaybackError::CapabilityUnavailable("no device".into()))
                } else {
                    Ok(Box::new(SharedSink(Rc::new(RefCell::new(Vec::new())))) as Box<dyn ToneSink>)
                }
            }),
        );

        app.set_text("E");
        app.play_text();
        assert!(!app.audio_ready());
        assert!(!app.is_playing());
        assert!(app.audio_error.as_deref().unwrap().contains("no device"));

        app.play_text();
        assert_eq!(attempts.get(), 2);
        assert!(app.audio_ready());
        assert!(app.audio_error.is_none());
        assert!(app.is_playing());
    }

    #[test]
    fn test_key_symbol_uses_current_settings() {
        let (mut app, tones) = app_with_sink();
        app.settings.frequency = 800;
        app.key_symbol(Symbol::Dot);
        app.key_symbol(Symbol::Dash);
        let tones = tones.borrow();
        assert_eq!(tones.len(), 2);
        assert!((tones[1].duration - 3.0 * tones[0].duration).abs() < 1e-12);
        assert_eq!(tones[0].frequency, 800.0);
        assert!(!app.is_playing());
    }

    #[test]
    fn test_controls_clamp() {
        let (mut app, _) = app_with_sink();
        app.adjust_wpm(-100);
        assert_eq!(app.settings.wpm, MIN_WPM);
        app.adjust_wpm(1000);
        assert_eq!(app.settings.wpm, MAX_WPM);

        app.toggle_control();
        assert_eq!(app.selected_control, Control::Frequency);
        app.adjust_selected_control(1000);
        assert_eq!(app.settings.frequency, MAX_FREQUENCY);
    }

    #[test]
    fn test_palette_navigation() {
        let (mut app, tones) = app_with_sink();
        assert_eq!(app.palette[0], 'A');
        app.move_palette(-1, 0);
        assert_eq!(app.palette_index, 0);
        app.move_palette(4, 0);
        assert_eq!(app.palette[app.palette_index], 'E');
        app.move_palette(0, 1);
        assert_eq!(app.palette[app.palette_index], 'R');
        app.move_palette(0, 100);
        assert_eq!(app.palette_index, app.palette.len() - 1);

        app.palette_index = 4;
        app.play_selected_char();
        assert_eq!(tones.borrow().len(), 1);
    }

    #[test]
    fn test_focus_cycle() {
        let (mut app, _) = app_with_sink();
        assert_eq!(app.focused_panel, FocusedPanel::Text);
        app.cycle_focus();
        app.cycle_focus();
        assert_eq!(app.focused_panel, FocusedPanel::Palette);
        app.cycle_focus();
        assert_eq!(app.focused_panel, FocusedPanel::Text);
    }
}
