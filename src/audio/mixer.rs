//! Sample-accurate tone mixer.
//!
//! The mixer owns the audio clock: a count of frames rendered so far.
//! Tones are placed on that clock by frame index, so a tone scheduled at
//! time `t` starts on the frame nearest `t * sample_rate` no matter how the
//! output is chunked into buffers.

use super::envelope::Envelope;
use crate::morse::ScheduledTone;
use std::f64::consts::TAU;

/// A queued or sounding tone.
#[derive(Debug, Clone)]
struct Voice {
    start_frame: u64,
    end_frame: u64,
    start_time: f64,
    frequency: f64,
    envelope: Envelope,
}

/// Mixes scheduled sine tones into a mono sample stream.
#[derive(Debug)]
pub struct ToneMixer {
    sample_rate: u32,
    /// Frames rendered so far. This is the audio clock.
    frame: u64,
    voices: Vec<Voice>,
}

impl ToneMixer {
    /// Creates a mixer whose clock starts at zero.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            frame: 0,
            voices: Vec::new(),
        }
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current clock time in seconds.
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate as f64
    }

    /// Number of tones waiting or sounding.
    pub fn pending(&self) -> usize {
        self.voices.len()
    }

    /// Queues a tone.
    ///
    /// Tones that end before the current frame are dropped. Tones that
    /// started in the past are joined partway through.
    pub fn schedule(&mut self, tone: &ScheduledTone) {
        if tone.duration.is_nan() || tone.duration <= 0.0 || !tone.frequency.is_finite() {
            return;
        }

        let rate = self.sample_rate as f64;
        let start_frame = (tone.start_time * rate).round().max(0.0) as u64;
        let end_frame = (tone.end_time() * rate).round().max(0.0) as u64;
        if end_frame <= self.frame {
            tracing::debug!("Dropping tone that ended before the clock: {:?}", tone);
            return;
        }

        self.voices.push(Voice {
            start_frame,
            end_frame,
            start_time: tone.start_time,
            frequency: tone.frequency,
            envelope: Envelope::for_tone(tone.start_time, tone.duration),
        });
    }

    /// Renders the next `out.len()` frames and advances the clock.
    pub fn render(&mut self, out: &mut [f32]) {
        let rate = self.sample_rate as f64;

        for sample in out.iter_mut() {
            let t = self.frame as f64 / rate;
            let mut acc = 0.0f32;

            for voice in &self.voices {
                if self.frame >= voice.start_frame && self.frame < voice.end_frame {
                    let phase = TAU * voice.frequency * (t - voice.start_time);
                    acc += phase.sin() as f32 * voice.envelope.gain_at(t);
                }
            }

            *sample = acc.clamp(-1.0, 1.0);
            self.frame += 1;
        }

        let frame = self.frame;
        self.voices.retain(|v| v.end_frame > frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 8000;

    fn tone(start_time: f64, duration: f64) -> ScheduledTone {
        ScheduledTone {
            start_time,
            duration,
            frequency: 500.0,
        }
    }

    #[test]
    fn test_clock_advances_by_frames() {
        let mut mixer = ToneMixer::new(RATE);
        let mut buf = vec![0.0; 400];
        mixer.render(&mut buf);
        assert_eq!(mixer.frame(), 400);
        assert!((mixer.current_time() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_tone_placed_at_exact_frame() {
        let mut mixer = ToneMixer::new(RATE);
        // 10ms in, 50ms long
        mixer.schedule(&tone(0.01, 0.05));

        let mut buf = vec![0.0; 800];
        mixer.render(&mut buf);

        assert!(buf[..81].iter().all(|&s| s == 0.0));
        let peak = buf[80..480].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.5);
        assert!(buf[480..].iter().all(|&s| s == 0.0));
        assert_eq!(mixer.pending(), 0);
    }

    #[test]
    fn test_tone_spanning_buffers() {
        let mut mixer = ToneMixer::new(RATE);
        mixer.schedule(&tone(0.0, 0.1));

        let mut first = vec![0.0; 256];
        mixer.render(&mut first);
        assert_eq!(mixer.pending(), 1);

        let mut rest = vec![0.0; 1024];
        mixer.render(&mut rest);
        assert_eq!(mixer.pending(), 0);
        assert!(rest[600..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_past_tones_dropped() {
        let mut mixer = ToneMixer::new(RATE);
        let mut buf = vec![0.0; 800];
        mixer.render(&mut buf);

        mixer.schedule(&tone(0.0, 0.05));
        assert_eq!(mixer.pending(), 0);

        mixer.schedule(&tone(0.09, 0.05));
        assert_eq!(mixer.pending(), 1);
    }

    #[test]
    fn test_invalid_tones_ignored() {
        let mut mixer = ToneMixer::new(RATE);
        mixer.schedule(&tone(0.0, 0.0));
        mixer.schedule(&tone(0.0, -1.0));
        mixer.schedule(&ScheduledTone {
            start_time: 0.0,
            duration: 0.1,
            frequency: f64::NAN,
        });
        assert_eq!(mixer.pending(), 0);
    }
}
