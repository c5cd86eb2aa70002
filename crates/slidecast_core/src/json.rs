//! JSON (de)serialization structures for `scenario.json`.
//!
//! Scenario files are decoded into these loosely typed intermediate
//! structures first, then converted into the domain types so that unknown
//! tags and missing fields surface as structured [`ScenarioError`]s rather
//! than opaque serde messages.

use crate::{
    DEFAULT_LANGUAGE, DEFAULT_SPEECH_RATE, Page, Scenario, ScenarioAction, SpeakParameters,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slidecast_error::{ScenarioError, ScenarioErrorKind};
use tracing::{debug, instrument};

const TYPE_SPEAK: &str = "speak";
const TYPE_CHANGE_SLIDE_PAGE: &str = "changeSlidePage";
const TYPE_PAUSE: &str = "pause";
const TYPE_WAIT: &str = "wait";

const PAGE_PREVIOUS: &str = "previous";
const PAGE_NEXT: &str = "next";

/// Top-level object of a scenario file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonScenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<JsonSpeakParameters>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<JsonAction>>,
}

/// Speak parameters as they appear in `presets`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonSpeakParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_delay: Option<f64>,
}

/// A single entry of `actions`, discriminated by `type`.
///
/// Speak fields are flattened next to the tag; `page` stays an untyped
/// value because it is either a string or an integer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(crate) struct JsonAction {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub speak: JsonSpeakParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f64>,
}

impl TryFrom<JsonSpeakParameters> for SpeakParameters {
    type Error = ScenarioError;

    fn try_from(raw: JsonSpeakParameters) -> Result<Self, Self::Error> {
        let text = raw.text.ok_or_else(|| ScenarioError::missing_field("text"))?;
        Ok(SpeakParameters {
            text,
            language: raw.language,
            rate: raw.rate,
            pitch: raw.pitch,
            volume: raw.volume,
            pre_delay: raw.pre_delay,
            post_delay: raw.post_delay,
        })
    }
}

impl From<&SpeakParameters> for JsonSpeakParameters {
    fn from(params: &SpeakParameters) -> Self {
        Self {
            text: Some(params.text.clone()),
            language: params.language.clone(),
            rate: params.rate,
            pitch: params.pitch,
            volume: params.volume,
            pre_delay: params.pre_delay,
            post_delay: params.post_delay,
        }
    }
}

/// Decodes a `page` value.
///
/// The string form is tried first; anything else must be a non-negative
/// integer.
fn parse_page(value: &Value) -> Result<Page, ScenarioError> {
    match value {
        Value::String(s) => match s.as_str() {
            PAGE_PREVIOUS => Ok(Page::Previous),
            PAGE_NEXT => Ok(Page::Next),
            other => Err(ScenarioError::new(ScenarioErrorKind::UnknownPageValue(
                other.to_string(),
            ))),
        },
        Value::Number(n) => {
            if let Some(page) = n.as_u64() {
                usize::try_from(page)
                    .map(Page::To)
                    .map_err(|_| {
                        ScenarioError::invalid_value("page", format!("{} is too large", page))
                    })
            } else if n.as_i64().is_some() {
                Err(ScenarioError::invalid_value(
                    "page",
                    format!("{} is negative", n),
                ))
            } else {
                Err(ScenarioError::invalid_value(
                    "page",
                    format!("{} is not an integer", n),
                ))
            }
        }
        other => Err(ScenarioError::invalid_value(
            "page",
            format!("expected \"previous\", \"next\" or an integer, got {}", other),
        )),
    }
}

fn encode_page(page: Page) -> Value {
    match page {
        Page::Previous => Value::String(PAGE_PREVIOUS.to_string()),
        Page::Next => Value::String(PAGE_NEXT.to_string()),
        Page::To(n) => Value::from(n),
    }
}

impl TryFrom<JsonAction> for ScenarioAction {
    type Error = ScenarioError;

    fn try_from(raw: JsonAction) -> Result<Self, Self::Error> {
        let kind = raw.kind.ok_or_else(|| ScenarioError::missing_field("type"))?;
        match kind.as_str() {
            TYPE_SPEAK => Ok(ScenarioAction::Speak(SpeakParameters::try_from(raw.speak)?)),
            TYPE_CHANGE_SLIDE_PAGE => {
                let page = raw.page.ok_or_else(|| ScenarioError::missing_field("page"))?;
                Ok(ScenarioAction::ChangeSlidePage(parse_page(&page)?))
            }
            TYPE_PAUSE => Ok(ScenarioAction::Pause),
            TYPE_WAIT => {
                let seconds = raw
                    .seconds
                    .ok_or_else(|| ScenarioError::missing_field("seconds"))?;
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(ScenarioError::invalid_value(
                        "seconds",
                        format!("{} is not a non-negative number of seconds", seconds),
                    ));
                }
                Ok(ScenarioAction::Wait { seconds })
            }
            _ => Err(ScenarioError::new(ScenarioErrorKind::UnknownActionType(kind))),
        }
    }
}

impl From<&ScenarioAction> for JsonAction {
    fn from(action: &ScenarioAction) -> Self {
        let mut raw = JsonAction {
            kind: Some(action.type_tag().to_string()),
            ..Default::default()
        };
        match action {
            ScenarioAction::Speak(params) => raw.speak = JsonSpeakParameters::from(params),
            ScenarioAction::ChangeSlidePage(page) => raw.page = Some(encode_page(*page)),
            ScenarioAction::Pause => {}
            ScenarioAction::Wait { seconds } => raw.seconds = Some(*seconds),
        }
        raw
    }
}

impl TryFrom<JsonScenario> for Scenario {
    type Error = ScenarioError;

    #[instrument(skip_all)]
    fn try_from(raw: JsonScenario) -> Result<Self, Self::Error> {
        let actions = raw
            .actions
            .ok_or_else(|| ScenarioError::missing_field("actions"))?
            .into_iter()
            .enumerate()
            .map(|(index, action)| {
                ScenarioAction::try_from(action).inspect_err(|e| {
                    debug!(index, error = %e.kind, "Rejected scenario action");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let presets = raw
            .presets
            .unwrap_or_default()
            .into_iter()
            .map(SpeakParameters::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scenario {
            actions,
            presets,
            language: raw.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            rate: raw.rate.unwrap_or(DEFAULT_SPEECH_RATE),
            pitch: raw.pitch.unwrap_or(1.0),
            volume: raw.volume.unwrap_or(1.0),
            pre_delay: raw.pre_delay.unwrap_or(0.0),
            post_delay: raw.post_delay.unwrap_or(0.0),
        })
    }
}

impl From<&Scenario> for JsonScenario {
    fn from(scenario: &Scenario) -> Self {
        Self {
            language: Some(scenario.language.clone()),
            rate: Some(scenario.rate),
            pitch: Some(scenario.pitch),
            volume: Some(scenario.volume),
            pre_delay: Some(scenario.pre_delay),
            post_delay: Some(scenario.post_delay),
            presets: Some(scenario.presets.iter().map(JsonSpeakParameters::from).collect()),
            actions: Some(scenario.actions.iter().map(JsonAction::from).collect()),
        }
    }
}
