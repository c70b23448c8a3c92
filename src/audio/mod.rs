//! Audio output for Morse playback.
//!
//! This module turns scheduled tones into sound. It provides:
//! - The click-free attack/sustain/release envelope
//! - A sample-accurate tone mixer driven by its own frame clock
//! - Live output through rodio
//! - WAV export of a whole schedule

pub mod engine;
pub mod envelope;
pub mod export;
pub mod mixer;

pub use engine::AudioEngine;
pub use export::{export_text_to_wav, export_to_wav};

/// Something that can schedule tones against an audio clock.
///
/// Scheduling never blocks: the tone is queued and the call returns
/// immediately. Sound is produced later, on the device's own thread.
pub trait ToneSink {
    /// Current time on the sink's clock, in seconds: the earliest time a
    /// tone queued now will play in full.
    fn current_time(&self) -> f64;

    /// Queues a tone starting at an absolute clock time.
    fn play_tone(&self, start_time: f64, duration: f64, frequency: f64);

    /// Wakes the sink if it is suspended. Safe to call repeatedly.
    fn resume(&self) {}
}
