//! The parsed narration script.

use crate::{ScenarioAction, SpeakParameters, json};
use slidecast_error::{ScenarioError, ScenarioErrorKind};
use std::path::Path;
use std::str::FromStr;

/// Speech language used when a scenario does not name one.
pub const DEFAULT_LANGUAGE: &str = "ja-JP";

/// Baseline speech rate used when a scenario does not set one.
///
/// Rates are normalised so that 1.0 is the platform's default speaking pace.
pub const DEFAULT_SPEECH_RATE: f32 = 1.0;

/// Immutable scenario: ordered actions, presets and scenario-wide defaults.
///
/// Playback position is an index into [`Scenario::actions`]; presets are
/// addressed independently by index and can only be spoken while paused.
///
/// # Example JSON
///
/// ```json
/// {
///   "language": "en-US",
///   "rate": 1.25,
///   "pitch": 0.8,
///   "presets": [ { "text": "Any questions?" } ],
///   "actions": [
///     { "type": "changeSlidePage", "page": 0 },
///     { "type": "speak", "text": "Let me start talking.", "rate": 1.5 },
///     { "type": "wait", "seconds": 1.0 },
///     { "type": "changeSlidePage", "page": "next" },
///     { "type": "pause" }
///   ]
/// }
/// ```
///
/// # Examples
///
/// ```
/// use slidecast_core::{Scenario, ScenarioAction};
///
/// let scenario = Scenario::builder()
///     .actions(vec![ScenarioAction::speak("Hello")])
///     .rate(1.2_f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(scenario.language(), "ja-JP");
/// assert_eq!(*scenario.rate(), 1.2);
/// assert_eq!(*scenario.pitch(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Scenario {
    /// Narration steps in playback order
    pub(crate) actions: Vec<ScenarioAction>,
    /// Utterances that can be spoken on demand while paused
    #[builder(default)]
    pub(crate) presets: Vec<SpeakParameters>,
    /// Default speech language
    #[builder(default = "DEFAULT_LANGUAGE.to_string()")]
    pub(crate) language: String,
    /// Default speech rate
    #[builder(default = "DEFAULT_SPEECH_RATE")]
    pub(crate) rate: f32,
    /// Default pitch multiplier (0.5 - 2.0)
    #[builder(default = "1.0")]
    pub(crate) pitch: f32,
    /// Default volume (0.0 - 1.0)
    #[builder(default = "1.0")]
    pub(crate) volume: f32,
    /// Default seconds of silence before each utterance
    #[builder(default = "0.0")]
    pub(crate) pre_delay: f64,
    /// Default seconds of silence after each utterance
    #[builder(default = "0.0")]
    pub(crate) post_delay: f64,
}

impl Scenario {
    /// Creates a new scenario builder.
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::default()
    }

    /// Scenario with the given actions and every default applied.
    pub fn with_actions(actions: Vec<ScenarioAction>) -> Self {
        Self {
            actions,
            presets: Vec::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            rate: DEFAULT_SPEECH_RATE,
            pitch: 1.0,
            volume: 1.0,
            pre_delay: 0.0,
            post_delay: 0.0,
        }
    }

    /// Loads a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The JSON is malformed or has values of the wrong type
    /// - An action has an unknown `type` or `page` value
    /// - A required field (`actions`, `text`, ...) is missing
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScenarioError::new(ScenarioErrorKind::FileRead(e.to_string())))?;
        content.parse()
    }

    /// Encodes the scenario as compact JSON.
    pub fn to_json(&self) -> Result<String, ScenarioError> {
        serde_json::to_string(&json::JsonScenario::from(self))
            .map_err(|e| ScenarioError::new(ScenarioErrorKind::Serialization(e.to_string())))
    }

    /// Encodes the scenario as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ScenarioError> {
        serde_json::to_string_pretty(&json::JsonScenario::from(self))
            .map_err(|e| ScenarioError::new(ScenarioErrorKind::Serialization(e.to_string())))
    }

    /// Preset at `index`, if in range.
    pub fn preset(&self, index: usize) -> Option<&SpeakParameters> {
        self.presets.get(index)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: json::JsonScenario = serde_json::from_str(s)
            .map_err(|e| ScenarioError::new(ScenarioErrorKind::Json(e.to_string())))?;
        let scenario = Scenario::try_from(raw)?;
        tracing::debug!(
            actions = scenario.actions.len(),
            presets = scenario.presets.len(),
            language = %scenario.language,
            "Parsed scenario"
        );
        Ok(scenario)
    }
}
