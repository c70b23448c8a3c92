//! morsetui - A terminal Morse code player.
//!
//! This library provides the Morse timing engine, the tone scheduler and
//! audio output, and the terminal front end built on them.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod morse;
pub mod player;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use audio::{AudioEngine, ToneSink};
pub use config::Settings;
pub use error::PlaybackError;
pub use morse::{compute_profile, schedule_playback, MorseTable, Schedule, ScheduledTone, TimingProfile};
pub use player::{PlaybackFinished, Player, StartedPlayback};
