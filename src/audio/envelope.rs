//! Tone amplitude envelope.
//!
//! Every tone ramps linearly from silence to the sustain level, holds, then
//! ramps back to silence so that it ends exactly at `start + duration`.
//! Short tones shrink the attack and release windows instead of letting
//! them overlap.

/// Length of the attack ramp in seconds.
pub const ATTACK_TIME: f64 = 0.005;

/// Length of the release ramp in seconds.
pub const RELEASE_TIME: f64 = 0.005;

/// Peak amplitude held between attack and release.
pub const SUSTAIN_LEVEL: f32 = 0.7;

/// Breakpoints of one tone's envelope, in absolute seconds.
///
/// Always ordered: `start <= attack_end <= sustain_start <= release_start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub start: f64,
    pub attack_end: f64,
    pub sustain_start: f64,
    pub release_start: f64,
    pub end: f64,
}

impl Envelope {
    /// Computes the envelope for a tone.
    pub fn for_tone(start: f64, duration: f64) -> Self {
        let end = start + duration.max(0.0);
        let attack_end = (start + ATTACK_TIME).min(end - RELEASE_TIME).max(start);
        let sustain_start = attack_end.max(start);
        let release_start = sustain_start.max(end - RELEASE_TIME);

        Self {
            start,
            attack_end,
            sustain_start,
            release_start,
            end,
        }
    }

    /// Amplitude at absolute time `t`.
    pub fn gain_at(&self, t: f64) -> f32 {
        if t < self.start || t >= self.end {
            0.0
        } else if t < self.attack_end {
            let progress = (t - self.start) / (self.attack_end - self.start);
            SUSTAIN_LEVEL * progress as f32
        } else if t < self.release_start {
            SUSTAIN_LEVEL
        } else {
            let remaining = (self.end - t) / (self.end - self.release_start);
            SUSTAIN_LEVEL * remaining as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ordered(env: &Envelope) {
        assert!(env.start <= env.attack_end);
        assert!(env.attack_end <= env.sustain_start);
        assert!(env.sustain_start <= env.release_start);
        assert!(env.release_start <= env.end);
    }

    #[test]
    fn test_long_tone_windows() {
        let env = Envelope::for_tone(1.0, 0.06);
        assert_eq!(env.attack_end, 1.0 + ATTACK_TIME);
        assert!((env.end - 1.06).abs() < 1e-12);
        assert!((env.release_start - (1.06 - RELEASE_TIME)).abs() < 1e-12);
        assert_ordered(&env);
    }

    #[test]
    fn test_long_tone_gain() {
        let env = Envelope::for_tone(2.0, 0.1);
        assert_eq!(env.gain_at(1.999), 0.0);
        assert_eq!(env.gain_at(2.0), 0.0);
        assert!((env.gain_at(2.0025) - SUSTAIN_LEVEL / 2.0).abs() < 1e-4);
        assert_eq!(env.gain_at(2.0 + ATTACK_TIME), SUSTAIN_LEVEL);
        assert_eq!(env.gain_at(2.05), SUSTAIN_LEVEL);
        assert!(env.gain_at(2.099) < 0.2);
        assert_eq!(env.gain_at(env.end), 0.0);
    }

    #[test]
    fn test_short_tones_stay_ordered() {
        for duration in [0.0, 0.001, 0.004, 0.005, 0.007, 0.0099, 0.01] {
            let env = Envelope::for_tone(0.5, duration);
            assert_ordered(&env);
            assert_eq!(env.end, 0.5 + duration);
        }
    }

    #[test]
    fn test_short_tone_peaks_then_releases() {
        // 8ms: 3ms attack, then the full 5ms release
        let env = Envelope::for_tone(0.0, 0.008);
        assert!((env.attack_end - 0.003).abs() < 1e-12);
        assert_eq!(env.sustain_start, env.attack_end);
        assert_eq!(env.release_start, env.attack_end);
        assert!(env.gain_at(0.0015) > 0.0);
        assert!(env.gain_at(0.0079) < 0.02);
    }

    #[test]
    fn test_gain_never_exceeds_sustain() {
        let env = Envelope::for_tone(0.0, 0.003);
        let mut t = 0.0;
        while t < 0.004 {
            let g = env.gain_at(t);
            assert!((0.0..=SUSTAIN_LEVEL).contains(&g));
            t += 0.0001;
        }
    }
}
