//! Morse code data and timing.
//!
//! This module provides the character table, the WPM-derived timing
//! profile, the playback scheduler that turns text into timed tone
//! requests, and the visual glyph formatter.

mod glyph;
mod table;
mod timing;

pub use glyph::to_glyphs;
pub use table::{MorseTable, Symbol};
pub use timing::{
    compute_profile, schedule_playback, PlaybackSession, Schedule, ScheduledTone, TimingProfile,
};

/// Dots per word in the PARIS timing standard.
pub const UNITS_PER_WORD: f64 = 50.0;

/// Lowest speed accepted by the speed control.
pub const MIN_WPM: u32 = 5;

/// Highest speed accepted by the speed control.
pub const MAX_WPM: u32 = 60;

/// Lowest tone frequency accepted by the frequency control.
pub const MIN_FREQUENCY: u32 = 200;

/// Highest tone frequency accepted by the frequency control.
pub const MAX_FREQUENCY: u32 = 1000;
