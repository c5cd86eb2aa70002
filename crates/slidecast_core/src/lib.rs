//! Core data types for the Slidecast scenario player.
//!
//! This crate provides the immutable scenario model parsed from a
//! `scenario.json` file, and the pure functions that resolve per-action
//! parameters against scenario defaults and the playback rate multiplier.
//!
//! # Example
//!
//! ```
//! use slidecast_core::{Scenario, ScenarioAction, Page, detect_page_number};
//!
//! let scenario: Scenario = r#"{
//!     "language": "en-US",
//!     "actions": [
//!         { "type": "changeSlidePage", "page": 2 },
//!         { "type": "speak", "text": "Hello" },
//!         { "type": "changeSlidePage", "page": "next" },
//!         { "type": "pause" }
//!     ]
//! }"#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(scenario.language(), "en-US");
//! assert_eq!(scenario.actions()[2], ScenarioAction::ChangeSlidePage(Page::Next));
//! assert_eq!(detect_page_number(scenario.actions(), 3), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod json;
mod resolver;
mod scenario;

pub use action::{Page, ScenarioAction, SpeakParameters, SpeakParametersBuilder};
pub use resolver::{
    EffectiveSpeakParameters, MAX_SPEECH_RATE, MIN_SPEECH_RATE, detect_page_number,
    effective_post_delay, effective_speak_parameters, effective_wait_seconds,
};
pub use scenario::{DEFAULT_LANGUAGE, DEFAULT_SPEECH_RATE, Scenario, ScenarioBuilder};
