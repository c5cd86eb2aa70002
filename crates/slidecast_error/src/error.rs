//! Top-level error wrapper types.

use crate::{ConfigError, ScenarioError};

/// Every error condition a Slidecast crate can surface.
///
/// # Examples
///
/// ```
/// use slidecast_error::{SlidecastError, ConfigError};
///
/// let err: SlidecastError = ConfigError::new("bad step").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SlidecastErrorKind {
    /// Scenario decoding or encoding error
    #[from(ScenarioError)]
    Scenario(ScenarioError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Slidecast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use slidecast_error::{SlidecastErrorKind, SlidecastResult, ConfigError};
///
/// fn might_fail() -> SlidecastResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), SlidecastErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Slidecast Error: {}", _0)]
pub struct SlidecastError(Box<SlidecastErrorKind>);

impl SlidecastError {
    /// Create a new error from a kind.
    pub fn new(kind: SlidecastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SlidecastErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to SlidecastErrorKind
impl<T> From<T> for SlidecastError
where
    T: Into<SlidecastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Slidecast operations.
pub type SlidecastResult<T> = std::result::Result<T, SlidecastError>;
