//! Scenario loading error types.

/// Specific error conditions for scenario decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScenarioErrorKind {
    /// Failed to read scenario file
    #[display("Failed to read scenario file: {}", _0)]
    FileRead(String),
    /// Malformed JSON or a value of the wrong JSON type
    #[display("Failed to parse JSON: {}", _0)]
    Json(String),
    /// Action `type` tag is not one of the known action types
    #[display("Unknown action type '{}'", _0)]
    UnknownActionType(String),
    /// `page` string is neither "previous" nor "next"
    #[display("Unknown page value '{}'", _0)]
    UnknownPageValue(String),
    /// A required field is absent
    #[display("Missing required field '{}'", _0)]
    MissingField(String),
    /// A field is present but its value is out of range
    #[display("Invalid value for '{}': {}", field, message)]
    InvalidValue {
        /// Field name
        field: String,
        /// What is wrong with it
        message: String,
    },
    /// Failed to encode a scenario
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Error type for scenario operations.
///
/// # Examples
///
/// ```
/// use slidecast_error::{ScenarioError, ScenarioErrorKind};
///
/// let err = ScenarioError::new(ScenarioErrorKind::UnknownActionType("dance".into()));
/// assert!(format!("{}", err).contains("dance"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scenario Error: {} at line {} in {}", kind, line, file)]
pub struct ScenarioError {
    /// The specific error condition
    pub kind: ScenarioErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScenarioError {
    /// Create a new ScenarioError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScenarioErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`ScenarioErrorKind::MissingField`].
    #[track_caller]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(ScenarioErrorKind::MissingField(field.into()))
    }

    /// Shorthand for [`ScenarioErrorKind::InvalidValue`].
    #[track_caller]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ScenarioErrorKind::InvalidValue {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScenarioErrorKind {
        &self.kind
    }
}
