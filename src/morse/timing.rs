//! Morse timing and playback scheduling.
//!
//! Converts a words-per-minute speed into symbol and gap durations, then
//! walks a piece of text and lays out one tone request per symbol against
//! an advancing schedule cursor. Nothing here touches the audio device:
//! the result is a plain list of [`ScheduledTone`]s plus the total span,
//! which the caller hands to a tone sink.

use super::table::{MorseTable, Symbol};
use super::UNITS_PER_WORD;

/// Symbol and gap durations derived from a single speed setting.
///
/// All durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingProfile {
    /// Effective speed after clamping.
    pub wpm: u32,
    /// Length of a dot (one unit).
    pub dot_duration: f64,
    /// Length of a dash (three units).
    pub dash_duration: f64,
    /// Silence between symbols of one character (one unit).
    pub intra_symbol_gap: f64,
    /// Silence between characters of one word (three units).
    pub inter_letter_gap: f64,
    /// Silence between words (seven units).
    pub inter_word_gap: f64,
}

impl TimingProfile {
    /// Returns the tone duration for a symbol.
    pub fn symbol_duration(&self, symbol: Symbol) -> f64 {
        self.dot_duration * symbol.units() as f64
    }
}

/// Computes the timing profile for a speed in words per minute.
///
/// Uses the PARIS standard of 50 units per word, so one dot lasts
/// `60 / (50 * wpm)` seconds. A speed of zero is treated as 1 WPM, so
/// durations are always positive and finite.
///
/// # Examples
///
/// ```
/// use morsetui::morse::compute_profile;
///
/// let profile = compute_profile(20);
/// assert!((profile.dot_duration - 0.06).abs() < 1e-12);
/// ```
pub fn compute_profile(wpm: u32) -> TimingProfile {
    let wpm = wpm.max(1);
    let dot = 60.0 / (UNITS_PER_WORD * wpm as f64);

    let profile = TimingProfile {
        wpm,
        dot_duration: dot,
        dash_duration: dot * 3.0,
        intra_symbol_gap: dot,
        inter_letter_gap: dot * 3.0,
        inter_word_gap: dot * 7.0,
    };

    tracing::debug!(
        "WPM: {}, dot: {:.3}s, letter gap: {:.3}s, word gap: {:.3}s",
        wpm,
        profile.dot_duration,
        profile.inter_letter_gap,
        profile.inter_word_gap
    );

    profile
}

/// A single tone instruction for the tone sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    /// Absolute start time on the audio clock, in seconds.
    pub start_time: f64,
    /// Tone length in seconds.
    pub duration: f64,
    /// Tone frequency in Hz.
    pub frequency: f64,
}

impl ScheduledTone {
    /// Absolute time at which the tone has fully decayed.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// One invocation of "play this text".
///
/// Holds the timing and frequency snapshot taken when playback starts and
/// the schedule cursor: the next free slot on the audio clock. The cursor
/// only ever moves forward.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    profile: TimingProfile,
    frequency: f64,
    origin: f64,
    cursor: f64,
}

impl PlaybackSession {
    /// Starts a session whose cursor begins at `origin` on the audio clock.
    pub fn new(profile: TimingProfile, frequency: f64, origin: f64) -> Self {
        Self {
            profile,
            frequency,
            origin,
            cursor: origin,
        }
    }

    /// The timing snapshot for this session.
    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    /// The frequency snapshot for this session.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Current cursor position (absolute seconds).
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Time laid out so far, relative to the session start.
    pub fn elapsed(&self) -> f64 {
        (self.cursor - self.origin).max(0.0)
    }

    /// Moves the cursor forward by a gap.
    pub fn advance(&mut self, seconds: f64) {
        debug_assert!(seconds >= 0.0, "schedule cursor cannot move backwards");
        self.cursor += seconds.max(0.0);
    }

    /// Emits a tone for `symbol` at the cursor and moves past it.
    pub fn emit(&mut self, symbol: Symbol) -> ScheduledTone {
        let duration = self.profile.symbol_duration(symbol);
        let tone = ScheduledTone {
            start_time: self.cursor,
            duration,
            frequency: self.frequency,
        };
        self.cursor += duration;
        tone
    }
}

/// The laid-out result of scheduling a piece of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    /// Tones in playback order.
    pub tones: Vec<ScheduledTone>,
    /// Span from the clock origin to the final cursor position, in seconds.
    pub total_duration: f64,
    /// Characters that had no table entry and were skipped.
    pub skipped: Vec<char>,
}

impl Schedule {
    /// Returns true if no tone was scheduled.
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

/// Lays out the tones for `text` starting at `clock_now`.
///
/// The text is uppercased but otherwise taken as-is. Gaps follow the usual
/// rules:
///
/// - symbols of one character are separated by one unit of silence
/// - a known character is followed by a word gap when the next character is
///   whitespace, otherwise by a letter gap
/// - whitespace itself adds nothing, so runs of spaces cost one word gap
/// - an unknown character is skipped; it adds a letter gap only when the
///   character right before it was known
///
/// No gap is charged after the last non-whitespace character, so leading and
/// trailing whitespace never change the total duration.
pub fn schedule_playback(
    table: &MorseTable,
    text: &str,
    profile: &TimingProfile,
    frequency: f64,
    clock_now: f64,
) -> Schedule {
    let chars: Vec<char> = text.to_uppercase().chars().collect();
    let last_audible = chars.iter().rposition(|c| !c.is_whitespace());

    let mut session = PlaybackSession::new(*profile, frequency, clock_now);
    let mut tones = Vec::new();
    let mut skipped = Vec::new();

    for (i, &ch) in chars.iter().enumerate() {
        if let Some(pattern) = table.lookup(ch) {
            for (j, &symbol) in pattern.iter().enumerate() {
                tones.push(session.emit(symbol));
                if j + 1 < pattern.len() {
                    session.advance(profile.intra_symbol_gap);
                }
            }

            let more_follows = last_audible.is_some_and(|last| i < last);
            if more_follows {
                let next = chars[i + 1];
                if next.is_whitespace() {
                    session.advance(profile.inter_word_gap);
                } else {
                    // Known or not, the next character ends this letter.
                    session.advance(profile.inter_letter_gap);
                }
            }
        } else if ch.is_whitespace() {
            // Charged by the preceding character's lookahead.
        } else {
            tracing::warn!("Skipping unknown character: {:?}", ch);
            skipped.push(ch);
            if i > 0 && table.contains(chars[i - 1]) {
                session.advance(profile.inter_letter_gap);
            }
        }
    }

    Schedule {
        tones,
        total_duration: session.elapsed(),
        skipped,
    }
}
