//! Playback sessions.
//!
//! The player is the single entry point for "play this text". It owns the
//! mutual-exclusion flag: at most one session is active, and requests that
//! arrive while one is running are refused rather than queued. Sessions end
//! when a one-shot timer fires after the scheduled span plus a margin. The
//! timer only approximates the device finishing; it is not synchronized to
//! the hardware.

use crate::audio::ToneSink;
use crate::error::PlaybackError;
use crate::morse::{
    compute_profile, schedule_playback, MorseTable, Schedule, ScheduledTone, Symbol, TimingProfile,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Notification sent when a session's completion timer fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackFinished {
    /// Scheduled span of the finished session, in seconds.
    pub total_duration: f64,
}

/// Details of a session that was started.
#[derive(Debug, Clone)]
pub struct StartedPlayback {
    /// The tones that were handed to the sink.
    pub schedule: Schedule,
    /// Timing snapshot used for the session.
    pub profile: TimingProfile,
    /// Frequency snapshot used for the session.
    pub frequency: f64,
    /// Clock time of the first tone slot.
    pub started_at: f64,
    /// Wall-clock delay until the session is marked finished.
    pub finishes_in: Duration,
}

/// Coordinates playback sessions against a tone sink.
pub struct Player {
    table: MorseTable,
    /// Set while a session is active; cleared only by the completion timer.
    is_playing: Arc<AtomicBool>,
    completion_margin: Duration,
    finished_tx: Sender<PlaybackFinished>,
    finished_rx: Receiver<PlaybackFinished>,
}

impl Player {
    /// Creates an idle player.
    ///
    /// # Arguments
    ///
    /// * `completion_margin` - Slack added after the scheduled span before
    ///   the session is considered finished
    pub fn new(completion_margin: Duration) -> Self {
        let (finished_tx, finished_rx) = mpsc::channel();
        Self {
            table: MorseTable::standard(),
            is_playing: Arc::new(AtomicBool::new(false)),
            completion_margin,
            finished_tx,
            finished_rx,
        }
    }

    /// The character table used for scheduling.
    pub fn table(&self) -> &MorseTable {
        &self.table
    }

    /// Returns whether a session is active.
    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Acquire)
    }

    /// Starts a session playing `text`.
    ///
    /// The timing profile and frequency are captured now; later changes to
    /// either do not affect this session. All tones are queued on the sink
    /// before returning.
    ///
    /// # Errors
    ///
    /// - `AlreadyPlaying` if a session is active (nothing is scheduled)
    /// - `EmptyInput` if the text is blank
    /// - `CompletionTimer` if the timer thread could not be started
    pub fn play_text<S: ToneSink + ?Sized>(
        &self,
        sink: &S,
        text: &str,
        wpm: u32,
        frequency: f64,
    ) -> Result<StartedPlayback, PlaybackError> {
        if self.is_playing() {
            tracing::warn!("Already playing, ignoring request");
            return Err(PlaybackError::AlreadyPlaying);
        }
        if text.trim().is_empty() {
            return Err(PlaybackError::EmptyInput);
        }
        if self
            .is_playing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PlaybackError::AlreadyPlaying);
        }

        sink.resume();

        let profile = compute_profile(wpm);
        let started_at = sink.current_time();
        let schedule = schedule_playback(&self.table, text, &profile, frequency, started_at);
        let finishes_in = completion_delay(schedule.total_duration, self.completion_margin);

        if let Err(e) = self.spawn_completion_timer(finishes_in, schedule.total_duration) {
            self.is_playing.store(false, Ordering::Release);
            tracing::error!("Failed to start completion timer: {}", e);
            return Err(e.into());
        }

        for tone in &schedule.tones {
            sink.play_tone(tone.start_time, tone.duration, tone.frequency);
        }

        tracing::info!(
            "Playing {:?} at {} WPM, {} Hz ({} tones, {:.2}s)",
            text,
            profile.wpm,
            frequency,
            schedule.tones.len(),
            schedule.total_duration
        );

        Ok(StartedPlayback {
            schedule,
            profile,
            frequency,
            started_at,
            finishes_in,
        })
    }

    /// Sounds a single dot or dash right now.
    ///
    /// Manual keying does not open a session and is not blocked by one.
    pub fn key_symbol<S: ToneSink + ?Sized>(
        &self,
        sink: &S,
        symbol: Symbol,
        wpm: u32,
        frequency: f64,
    ) -> ScheduledTone {
        sink.resume();

        let profile = compute_profile(wpm);
        let tone = ScheduledTone {
            start_time: sink.current_time(),
            duration: profile.symbol_duration(symbol),
            frequency,
        };
        sink.play_tone(tone.start_time, tone.duration, tone.frequency);
        tone
    }

    /// Returns a completion notification if one has arrived.
    pub fn poll_finished(&self) -> Option<PlaybackFinished> {
        self.finished_rx.try_recv().ok()
    }

    /// Blocks until a completion notification arrives or `timeout` passes.
    pub fn wait_finished(&self, timeout: Duration) -> Option<PlaybackFinished> {
        self.finished_rx.recv_timeout(timeout).ok()
    }

    fn spawn_completion_timer(&self, wait: Duration, total_duration: f64) -> std::io::Result<()> {
        let is_playing = Arc::clone(&self.is_playing);
        let finished_tx = self.finished_tx.clone();

        thread::Builder::new()
            .name("morse-completion".to_string())
            .spawn(move || {
                thread::sleep(wait);
                is_playing.store(false, Ordering::Release);
                tracing::info!("Playback finished");
                // The receiver is gone once the player is dropped
                let _ = finished_tx.send(PlaybackFinished { total_duration });
            })?;

        Ok(())
    }
}

/// Wall-clock delay from session start until it is marked finished.
///
/// Spans that do not fit in a `Duration` saturate instead of panicking.
fn completion_delay(total_duration: f64, margin: Duration) -> Duration {
    let span = Duration::try_from_secs_f64(total_duration.max(0.0)).unwrap_or_else(|e| {
        tracing::warn!("Schedule span {} out of range: {}", total_duration, e);
        Duration::MAX
    });
    span.saturating_add(margin)
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_COMPLETION_MARGIN_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Tone sink with a hand-set clock that records every request.
    #[derive(Default)]
    struct RecordingSink {
        now: Cell<f64>,
        tones: RefCell<Vec<ScheduledTone>>,
        resumes: Cell<u32>,
    }

    impl ToneSink for RecordingSink {
        fn current_time(&self) -> f64 {
            self.now.get()
        }

        fn play_tone(&self, start_time: f64, duration: f64, frequency: f64) {
            self.tones.borrow_mut().push(ScheduledTone {
                start_time,
                duration,
                frequency,
            });
        }

        fn resume(&self) {
            self.resumes.set(self.resumes.get() + 1);
        }
    }

    #[test]
    fn test_play_schedules_at_clock_time() {
        let player = Player::new(Duration::from_secs(60));
        let sink = RecordingSink::default();
        sink.now.set(3.25);

        let started = player.play_text(&sink, "SOS", 20, 700.0).unwrap();

        let tones = sink.tones.borrow();
        assert_eq!(tones.len(), 9);
        assert_eq!(tones[0].start_time, 3.25);
        assert!(tones.iter().all(|t| t.frequency == 700.0));
        assert_eq!(*tones, started.schedule.tones);
        assert_eq!(started.started_at, 3.25);
        assert_eq!(sink.resumes.get(), 1);
        assert!(player.is_playing());
    }

    #[test]
    fn test_second_request_rejected_while_playing() {
        let player = Player::new(Duration::from_secs(60));
        let sink = RecordingSink::default();

        player.play_text(&sink, "E", 20, 600.0).unwrap();
        let before = sink.tones.borrow().clone();

        let err = player.play_text(&sink, "TEST", 20, 600.0).unwrap_err();
        assert!(matches!(err, PlaybackError::AlreadyPlaying));
        assert_eq!(*sink.tones.borrow(), before);
        assert!(player.is_playing());
    }

    #[test]
    fn test_empty_input_rejected() {
        let player = Player::default();
        let sink = RecordingSink::default();

        for text in ["", "   "] {
            let err = player.play_text(&sink, text, 20, 600.0).unwrap_err();
            assert!(matches!(err, PlaybackError::EmptyInput));
        }
        assert!(!player.is_playing());
        assert!(sink.tones.borrow().is_empty());
    }

    #[test]
    fn test_completion_clears_flag() {
        let player = Player::new(Duration::ZERO);
        let sink = RecordingSink::default();

        // 60 WPM: one dot is 20ms
        let started = player.play_text(&sink, "E", 60, 600.0).unwrap();
        assert_eq!(started.finishes_in, Duration::from_secs_f64(0.02));

        let finished = player.wait_finished(Duration::from_secs(5)).unwrap();
        assert_eq!(finished.total_duration, started.schedule.total_duration);
        assert!(!player.is_playing());

        assert!(player.play_text(&sink, "T", 60, 600.0).is_ok());
    }

    #[test]
    fn test_completion_delay_saturates() {
        let margin = Duration::from_millis(100);
        assert_eq!(
            completion_delay(0.5, margin),
            Duration::from_millis(600)
        );
        assert_eq!(completion_delay(-1.0, margin), margin);
        assert_eq!(completion_delay(f64::INFINITY, margin), Duration::MAX);
        assert_eq!(completion_delay(f64::NAN, margin), Duration::MAX);
        assert_eq!(completion_delay(1e300, margin), Duration::MAX);
    }

    #[test]
    fn test_zero_wpm_plays_at_one_wpm() {
        let player = Player::new(Duration::from_secs(60));
        let sink = RecordingSink::default();

        let started = player.play_text(&sink, "E", 0, 600.0).unwrap();
        assert_eq!(started.profile.wpm, 1);
        assert!((started.schedule.total_duration - 1.2).abs() < 1e-12);
        assert_eq!(
            started.finishes_in,
            Duration::from_secs_f64(1.2) + Duration::from_secs(60)
        );
    }

    #[test]
    fn test_poll_finished_empty_while_playing() {
        let player = Player::new(Duration::from_secs(60));
        let sink = RecordingSink::default();
        player.play_text(&sink, "E", 20, 600.0).unwrap();
        assert!(player.poll_finished().is_none());
    }

    #[test]
    fn test_key_symbol_bypasses_session() {
        let player = Player::new(Duration::from_secs(60));
        let sink = RecordingSink::default();
        sink.now.set(1.0);

        player.play_text(&sink, "E", 20, 600.0).unwrap();
        let tone = player.key_symbol(&sink, Symbol::Dash, 20, 650.0);

        assert_eq!(tone.start_time, 1.0);
        assert!((tone.duration - 0.18).abs() < 1e-12);
        assert_eq!(sink.tones.borrow().len(), 2);
        assert!(player.is_playing());
    }

    #[test]
    fn test_unknown_characters_reported() {
        let player = Player::new(Duration::from_secs(60));
        let sink = RecordingSink::default();
        let started = player.play_text(&sink, "A#B", 20, 600.0).unwrap();
        assert_eq!(started.schedule.skipped, vec!['#']);
    }
}
