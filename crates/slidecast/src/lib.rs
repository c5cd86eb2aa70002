//! Slidecast - narrated slide presentations
//!
//! Slidecast plays a JSON *scenario* of narration steps against a
//! presentation shell: it speaks text, turns slides, pauses for the presenter
//! and waits. The presenter can pause, resume, stop, speak canned presets and
//! speed playback up or down at any time.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use slidecast::{RehearsalHost, Scenario, ScenarioPlayer, SlidecastConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SlidecastConfig::load()?;
//!     let scenario = Scenario::from_file("scenario.json")?;
//!
//!     let player = ScenarioPlayer::new(scenario, None);
//!     player.start(Arc::new(RehearsalHost::new(config.rehearsal)));
//!     player.finished().await;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - Export tracing spans through OpenTelemetry (stdout)
//!
//! # Architecture
//!
//! - `slidecast_error` - Error types
//! - `slidecast_core` - Scenario model, JSON contract and parameter resolution
//! - `slidecast_player` - Playback state machine and the host effect trait
//!
//! This crate (`slidecast`) re-exports everything for convenience and adds
//! configuration, a console rehearsal host and the `slidecast` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod rehearsal;
pub mod telemetry;

pub use self::config::{ControlsConfig, RehearsalConfig, SlidecastConfig};
pub use rehearsal::RehearsalHost;

pub use slidecast_error::{
    ConfigError, ScenarioError, ScenarioErrorKind, SlidecastError, SlidecastErrorKind,
    SlidecastResult,
};

pub use slidecast_core::{
    DEFAULT_LANGUAGE, DEFAULT_SPEECH_RATE, EffectiveSpeakParameters, MAX_SPEECH_RATE,
    MIN_SPEECH_RATE, Page, Scenario, ScenarioAction, ScenarioBuilder, SpeakParameters,
    SpeakParametersBuilder, detect_page_number, effective_post_delay, effective_speak_parameters,
    effective_wait_seconds,
};

pub use slidecast_player::{
    DEFAULT_RATE_MULTIPLIER, MAX_RATE_MULTIPLIER, MIN_RATE_MULTIPLIER, PlayingStatus,
    PresentationHost, ScenarioPlayer, Transition,
};
