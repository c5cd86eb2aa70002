//! Playing status and the caller-facing transition table.

use serde::{Deserialize, Serialize};

/// Where a playback session is in its lifecycle.
///
/// # Examples
///
/// ```
/// use slidecast_player::PlayingStatus;
///
/// assert_eq!(PlayingStatus::default(), PlayingStatus::Stopped);
/// assert_eq!(format!("{}", PlayingStatus::SpeakingPreset(2)), "speaking preset 2");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum PlayingStatus {
    /// Not running; initial and terminal state
    #[default]
    #[display("stopped")]
    Stopped,
    /// Advancing through actions
    #[display("playing")]
    Playing,
    /// Pause requested; the in-flight effect finishes first
    #[display("pausing")]
    Pausing,
    /// Waiting for resume, a preset request or stop
    #[display("paused")]
    Paused,
    /// Speaking the preset at this index; returns to `Paused` afterwards
    #[display("speaking preset {}", _0)]
    SpeakingPreset(usize),
}

/// A status change requested by the presentation shell.
///
/// Stopping is not a transition: it cancels the run, which always ends in
/// [`PlayingStatus::Stopped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Transition {
    /// Request a pause after the in-flight effect
    #[display("pause")]
    Pause,
    /// Continue playing
    #[display("resume")]
    Resume,
    /// Pause when playing, resume when pausing or paused
    #[display("pause or resume")]
    PauseOrResume,
    /// Speak a preset while paused
    #[display("speak preset {}", _0)]
    SpeakPreset(usize),
}

impl PlayingStatus {
    /// Status reached by applying `transition`, or `None` when the transition
    /// is not allowed from this status and must be ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use slidecast_player::{PlayingStatus, Transition};
    ///
    /// assert_eq!(
    ///     PlayingStatus::Playing.on(Transition::Pause),
    ///     Some(PlayingStatus::Pausing)
    /// );
    /// assert_eq!(PlayingStatus::Stopped.on(Transition::Resume), None);
    /// ```
    pub fn on(self, transition: Transition) -> Option<PlayingStatus> {
        use PlayingStatus::*;

        match (self, transition) {
            (Playing, Transition::Pause) => Some(Pausing),
            (Pausing | Paused, Transition::Resume) => Some(Playing),
            (Playing, Transition::PauseOrResume) => Some(Pausing),
            (Pausing | Paused, Transition::PauseOrResume) => Some(Playing),
            (Paused, Transition::SpeakPreset(index)) => Some(SpeakingPreset(index)),
            _ => None,
        }
    }

    /// Whether playback is waiting on the presenter.
    pub fn is_paused(self) -> bool {
        matches!(self, PlayingStatus::Paused | PlayingStatus::SpeakingPreset(_))
    }
}
