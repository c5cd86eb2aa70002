//! Scenario action types.

use derive_getters::Getters;

/// Target page of a `changeSlidePage` action.
///
/// # Examples
///
/// ```
/// use slidecast_core::Page;
///
/// assert_eq!(format!("{}", Page::Next), "next");
/// assert_eq!(format!("{}", Page::To(4)), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Page {
    /// One page back, never below the first page
    #[display("previous")]
    Previous,
    /// One page forward
    #[display("next")]
    Next,
    /// Absolute zero-based page index
    #[display("{}", _0)]
    To(usize),
}

impl Page {
    /// The page reached by applying this target while `current` is shown.
    pub fn apply(self, current: usize) -> usize {
        match self {
            Page::Previous => current.saturating_sub(1),
            Page::Next => current + 1,
            Page::To(page) => page,
        }
    }
}

/// Text to speak plus optional per-utterance overrides of the scenario defaults.
///
/// A `None` override means "use the scenario default".
///
/// # Examples
///
/// ```
/// use slidecast_core::SpeakParameters;
///
/// let params = SpeakParameters::builder()
///     .text("Welcome")
///     .rate(1.5_f32)
///     .post_delay(0.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.text(), "Welcome");
/// assert_eq!(*params.rate(), Some(1.5));
/// assert_eq!(*params.pitch(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into, strip_option))]
pub struct SpeakParameters {
    /// Text to speak
    #[builder(setter(into))]
    pub(crate) text: String,
    /// BCP 47 language tag, e.g. "en-US"
    #[builder(default)]
    pub(crate) language: Option<String>,
    /// Speech rate before the rate multiplier is applied
    #[builder(default)]
    pub(crate) rate: Option<f32>,
    /// Pitch multiplier (0.5 - 2.0)
    #[builder(default)]
    pub(crate) pitch: Option<f32>,
    /// Volume (0.0 - 1.0)
    #[builder(default)]
    pub(crate) volume: Option<f32>,
    /// Seconds of silence before speaking
    #[builder(default)]
    pub(crate) pre_delay: Option<f64>,
    /// Seconds of silence after speaking
    #[builder(default)]
    pub(crate) post_delay: Option<f64>,
}

impl SpeakParameters {
    /// Parameters with only text set.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            rate: None,
            pitch: None,
            volume: None,
            pre_delay: None,
            post_delay: None,
        }
    }

    /// Creates a new speak parameters builder.
    pub fn builder() -> SpeakParametersBuilder {
        SpeakParametersBuilder::default()
    }
}

/// One scripted step of a scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioAction {
    /// Ask the host to speak
    Speak(SpeakParameters),
    /// Ask the host to show a slide page
    ChangeSlidePage(Page),
    /// Scripted pause point; playback waits for the presenter to resume
    Pause,
    /// Timed delay before continuing
    Wait {
        /// Delay length in seconds at rate multiplier 1.0
        seconds: f64,
    },
}

impl From<SpeakParameters> for ScenarioAction {
    fn from(params: SpeakParameters) -> Self {
        Self::Speak(params)
    }
}

impl From<Page> for ScenarioAction {
    fn from(page: Page) -> Self {
        Self::ChangeSlidePage(page)
    }
}

impl ScenarioAction {
    /// Shorthand for a speak action with no overrides.
    pub fn speak(text: impl Into<String>) -> Self {
        Self::Speak(SpeakParameters::new(text))
    }

    /// Shorthand for a wait action.
    pub fn wait(seconds: f64) -> Self {
        Self::Wait { seconds }
    }

    /// The `type` tag this action is encoded with.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Speak(_) => "speak",
            Self::ChangeSlidePage(_) => "changeSlidePage",
            Self::Pause => "pause",
            Self::Wait { .. } => "wait",
        }
    }
}
