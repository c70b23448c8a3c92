//! Live audio output.
//!
//! Plays the tone mixer through the default output device using rodio.
//! The mixer's frame counter doubles as the clock that tones are scheduled
//! against, so "now" always means "the next frame the device will pull".

use super::mixer::ToneMixer;
use super::ToneSink;
use crate::error::PlaybackError;
use crate::morse::ScheduledTone;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Audio buffer size for low-latency playback.
/// Smaller = lower latency but higher CPU usage.
const BUFFER_SIZE: usize = 256;

/// Earliest clock time a newly queued tone can start without being clipped.
///
/// The audio thread may render another buffer between reading the clock and
/// queuing a tone, so "now" is pushed one buffer ahead.
fn scheduling_time(frames: u64, sample_rate: u32) -> f64 {
    (frames + BUFFER_SIZE as u64) as f64 / sample_rate as f64
}

/// Audio source that pulls samples from the shared mixer.
/// Implements rodio's Source trait for playback.
struct MixerSource {
    /// The mixer instance.
    mixer: Arc<Mutex<ToneMixer>>,
    /// Frames rendered, published for lock-free clock reads.
    clock: Arc<AtomicU64>,
    /// Rendered mono samples.
    buf: Vec<f32>,
    /// Current position in the buffer.
    buf_pos: usize,
    sample_rate: u32,
}

impl MixerSource {
    fn new(mixer: Arc<Mutex<ToneMixer>>, clock: Arc<AtomicU64>, sample_rate: u32) -> Self {
        Self {
            mixer,
            clock,
            buf: vec![0.0; BUFFER_SIZE],
            buf_pos: BUFFER_SIZE, // Start at end to trigger first render
            sample_rate,
        }
    }
}

impl Iterator for MixerSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.buf_pos >= BUFFER_SIZE {
            if let Ok(mut mixer) = self.mixer.lock() {
                mixer.render(&mut self.buf);
                self.clock.store(mixer.frame(), Ordering::Release);
            } else {
                // Only fill with silence if we can't get the lock
                self.buf.fill(0.0);
            }
            self.buf_pos = 0;
        }

        let sample = self.buf[self.buf_pos];
        self.buf_pos += 1;
        Some(sample)
    }
}

impl Source for MixerSource {
    fn current_frame_len(&self) -> Option<usize> {
        None // Continuous stream
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None // Infinite stream
    }
}

/// Tone output through the default audio device.
///
/// Creating the engine opens the device; failure is reported as
/// [`PlaybackError::CapabilityUnavailable`] and callers keep audio-dependent
/// controls inert until a later attempt succeeds.
pub struct AudioEngine {
    /// The mixer (wrapped for sharing with the audio thread).
    mixer: Arc<Mutex<ToneMixer>>,
    /// Frames rendered by the audio thread.
    clock: Arc<AtomicU64>,
    sample_rate: u32,
    /// Playback control for the mixer source.
    sink: Sink,
    /// Audio output stream (must be kept alive).
    _stream: OutputStream,
    /// Audio output handle (must be kept alive).
    _stream_handle: OutputStreamHandle,
}

impl AudioEngine {
    /// Opens the default output device and starts the mixer stream.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` if no output device can be opened
    pub fn new(sample_rate: u32) -> Result<Self, PlaybackError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::CapabilityUnavailable(e.to_string()))?;
        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| PlaybackError::CapabilityUnavailable(e.to_string()))?;

        let mixer = Arc::new(Mutex::new(ToneMixer::new(sample_rate)));
        let clock = Arc::new(AtomicU64::new(0));
        sink.append(MixerSource::new(
            Arc::clone(&mixer),
            Arc::clone(&clock),
            sample_rate,
        ));

        tracing::info!("Audio output initialized at {} Hz", sample_rate);

        Ok(Self {
            mixer,
            clock,
            sample_rate,
            sink,
            _stream: stream,
            _stream_handle: stream_handle,
        })
    }

    /// Returns true if output is suspended.
    pub fn is_suspended(&self) -> bool {
        self.sink.is_paused()
    }
}

impl ToneSink for AudioEngine {
    fn current_time(&self) -> f64 {
        scheduling_time(self.clock.load(Ordering::Acquire), self.sample_rate)
    }

    fn play_tone(&self, start_time: f64, duration: f64, frequency: f64) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.schedule(&ScheduledTone {
                start_time,
                duration,
                frequency,
            });
        }
    }

    fn resume(&self) {
        if self.is_suspended() {
            self.sink.play();
            tracing::info!("Audio output resumed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_renders_from_mixer() {
        let mixer = Arc::new(Mutex::new(ToneMixer::new(8000)));
        let clock = Arc::new(AtomicU64::new(0));
        mixer.lock().unwrap().schedule(&ScheduledTone {
            start_time: 0.0,
            duration: 0.02,
            frequency: 500.0,
        });

        let mut source = MixerSource::new(Arc::clone(&mixer), Arc::clone(&clock), 8000);
        let samples: Vec<f32> = source.by_ref().take(BUFFER_SIZE).collect();

        assert_eq!(clock.load(Ordering::Acquire), BUFFER_SIZE as u64);
        assert!(samples.iter().any(|s| s.abs() > 0.1));
        assert_eq!(source.channels(), 1);
        assert_eq!(source.total_duration(), None);
    }

    #[test]
    fn test_tone_queued_after_render_keeps_attack() {
        let mixer = Arc::new(Mutex::new(ToneMixer::new(8000)));
        let clock = Arc::new(AtomicU64::new(0));
        let mut source = MixerSource::new(Arc::clone(&mixer), Arc::clone(&clock), 8000);

        let start_time = scheduling_time(clock.load(Ordering::Acquire), 8000);

        // The audio thread renders a buffer before the tone is queued
        let silence: Vec<f32> = source.by_ref().take(BUFFER_SIZE).collect();
        assert!(silence.iter().all(|&s| s == 0.0));

        mixer.lock().unwrap().schedule(&ScheduledTone {
            start_time,
            duration: 0.02,
            frequency: 500.0,
        });
        assert_eq!(mixer.lock().unwrap().pending(), 1);

        let samples: Vec<f32> = source.by_ref().take(BUFFER_SIZE).collect();
        // Starts on the first frame of the next buffer, from silence
        assert_eq!(samples[0], 0.0);
        assert!(samples[1].abs() < 0.05);
        assert!(samples.iter().any(|s| s.abs() > 0.5));
    }

    #[test]
    #[ignore] // Requires an audio output device
    fn test_engine_clock_advances() {
        let engine = AudioEngine::new(44100).unwrap();
        engine.resume();
        std::thread::sleep(Duration::from_millis(200));
        assert!(engine.current_time() > 0.0);
        assert!(!engine.is_suspended());
    }
}
