//! Effective parameter resolution.
//!
//! Every function here is pure: given the same action, scenario and rate
//! multiplier it produces the same result. All "inherit from the scenario
//! default" logic lives here so that callers never coalesce optional fields
//! themselves.

use crate::{Scenario, ScenarioAction, SpeakParameters};
use serde::Serialize;

/// Slowest speech rate a host is asked for.
pub const MIN_SPEECH_RATE: f32 = 0.0;

/// Fastest speech rate a host is asked for.
pub const MAX_SPEECH_RATE: f32 = 2.0;

/// Fully resolved request for the host to speak one utterance.
///
/// # Examples
///
/// ```
/// use slidecast_core::{effective_speak_parameters, Scenario, ScenarioAction, SpeakParameters};
///
/// let scenario = Scenario::builder()
///     .actions(vec![ScenarioAction::Pause])
///     .language("en-US")
///     .pre_delay(1.0)
///     .build()
///     .unwrap();
///
/// let params = effective_speak_parameters(&SpeakParameters::new("Hi"), &scenario, 2.0);
/// assert_eq!(params.language, "en-US");
/// assert_eq!(params.rate, 2.0);
/// assert_eq!(params.pre_delay_seconds, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSpeakParameters {
    /// Text to speak
    pub text: String,
    /// BCP 47 language tag
    pub language: String,
    /// Speech rate with the rate multiplier applied, clamped to the supported range
    pub rate: f32,
    /// Pitch multiplier (0.5 - 2.0)
    pub pitch: f32,
    /// Volume (0.0 - 1.0)
    pub volume: f32,
    /// Seconds of silence the host inserts before speaking
    pub pre_delay_seconds: f64,
}

/// Resolves speak parameters against scenario defaults and the rate multiplier.
///
/// The multiplier scales the speech rate up and the pre-delay down by the same
/// factor.
pub fn effective_speak_parameters(
    params: &SpeakParameters,
    scenario: &Scenario,
    rate_multiplier: f64,
) -> EffectiveSpeakParameters {
    let base_rate = params.rate().unwrap_or(*scenario.rate());
    let rate = (f64::from(base_rate) * rate_multiplier) as f32;
    let pre_delay = params.pre_delay().unwrap_or(*scenario.pre_delay());

    EffectiveSpeakParameters {
        text: params.text().clone(),
        language: params
            .language()
            .clone()
            .unwrap_or_else(|| scenario.language().clone()),
        rate: rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE),
        pitch: params.pitch().unwrap_or(*scenario.pitch()),
        volume: params.volume().unwrap_or(*scenario.volume()),
        pre_delay_seconds: pre_delay / rate_multiplier,
    }
}

/// Seconds to stay silent after an utterance finishes.
pub fn effective_post_delay(
    params: &SpeakParameters,
    scenario: &Scenario,
    rate_multiplier: f64,
) -> f64 {
    params.post_delay().unwrap_or(*scenario.post_delay()) / rate_multiplier
}

/// Seconds a `wait` action suspends playback for.
pub fn effective_wait_seconds(seconds: f64, rate_multiplier: f64) -> f64 {
    seconds / rate_multiplier
}

/// Slide page a viewer would be on when arriving fresh at `actions[at_index]`.
///
/// Replays every page change before `at_index` in order: `previous` steps back
/// (never below page 0), `next` steps forward, and an absolute page replaces
/// whatever came before. With no page change before `at_index` the page is 0.
///
/// # Examples
///
/// ```
/// use slidecast_core::{detect_page_number, Page, ScenarioAction};
///
/// let actions = vec![
///     ScenarioAction::ChangeSlidePage(Page::To(5)),
///     ScenarioAction::speak("..."),
///     ScenarioAction::ChangeSlidePage(Page::Next),
///     ScenarioAction::Pause,
/// ];
/// assert_eq!(detect_page_number(&actions, 3), 6);
/// assert_eq!(detect_page_number(&actions, 0), 0);
/// ```
pub fn detect_page_number(actions: &[ScenarioAction], at_index: usize) -> usize {
    actions
        .iter()
        .take(at_index)
        .fold(0, |page, action| match action {
            ScenarioAction::ChangeSlidePage(target) => target.apply(page),
            _ => page,
        })
}
