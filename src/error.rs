//! Playback error types.

use thiserror::Error;

/// Reasons a playback request did not start.
///
/// None of these are fatal: the worst outcome is silence or an inert
/// control until the user tries again.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio output device could not be created or is unsupported.
    #[error("Audio output unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The text was empty or whitespace only.
    #[error("Text input is empty")]
    EmptyInput,

    /// Another playback session is still active.
    #[error("Already playing")]
    AlreadyPlaying,

    /// The completion timer could not be started.
    #[error("Failed to start completion timer: {0}")]
    CompletionTimer(#[from] std::io::Error),
}
