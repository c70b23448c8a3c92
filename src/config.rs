//! User settings.
//!
//! Settings can be loaded from a JSON file and are always clamped to the
//! ranges the speed and frequency controls accept.

use crate::morse::{MAX_FREQUENCY, MAX_WPM, MIN_FREQUENCY, MIN_WPM};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default speed in words per minute.
pub const DEFAULT_WPM: u32 = 20;

/// Default tone frequency in Hz.
pub const DEFAULT_FREQUENCY: u32 = 600;

/// Default slack added to the scheduled span before playback is
/// considered finished.
pub const DEFAULT_COMPLETION_MARGIN_MS: u64 = 100;

/// Default output sample rate (44.1 kHz standard).
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speed in words per minute.
    pub wpm: u32,

    /// Tone frequency in Hz.
    pub frequency: u32,

    /// Extra time after the last scheduled tone before the session ends.
    /// The completion timer is a heuristic and is not tied to the device
    /// actually draining its buffers.
    pub completion_margin_ms: u64,

    /// Sample rate for live output and WAV export.
    pub sample_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            frequency: DEFAULT_FREQUENCY,
            completion_margin_ms: DEFAULT_COMPLETION_MARGIN_MS,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file.
    ///
    /// Missing fields take their defaults and out-of-range values are clamped.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(settings.clamped())
    }

    /// Returns a copy with every field inside its accepted range.
    pub fn clamped(mut self) -> Self {
        self.wpm = clamp_wpm(self.wpm);
        self.frequency = clamp_frequency(self.frequency);
        if self.sample_rate == 0 {
            self.sample_rate = DEFAULT_SAMPLE_RATE;
        }
        self
    }

    /// The completion margin as a Duration.
    pub fn completion_margin(&self) -> Duration {
        Duration::from_millis(self.completion_margin_ms)
    }
}

/// Clamps a speed to the range of the speed control.
pub fn clamp_wpm(wpm: u32) -> u32 {
    wpm.clamp(MIN_WPM, MAX_WPM)
}

/// Clamps a frequency to the range of the frequency control.
pub fn clamp_frequency(frequency: u32) -> u32 {
    frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY)
}
