//! Playback state machine for Slidecast scenarios.
//!
//! The [`ScenarioPlayer`] executes a [`slidecast_core::Scenario`] against a
//! [`PresentationHost`], which performs speech and slide changes on its behalf.
//! The presenter can pause, resume, stop, speak presets and change the
//! playback speed while a run is active.
//!
//! # Example
//!
//! ```rust,ignore
//! use slidecast_core::Scenario;
//! use slidecast_player::{PlayingStatus, ScenarioPlayer};
//! use std::sync::Arc;
//!
//! let scenario = Scenario::from_file("scenario.json")?;
//! let player = ScenarioPlayer::new(scenario, None);
//!
//! player.start(Arc::new(MyShell::new()));
//! player.finished().await;
//! assert_eq!(player.status(), PlayingStatus::Stopped);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod host;
mod player;
mod status;

pub use host::PresentationHost;
pub use player::{
    DEFAULT_RATE_MULTIPLIER, MAX_RATE_MULTIPLIER, MIN_RATE_MULTIPLIER, ScenarioPlayer,
};
pub use status::{PlayingStatus, Transition};
