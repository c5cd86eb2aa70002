//! Configuration for the Slidecast binary.
//!
//! Configuration is layered:
//! - Bundled defaults (include_str! from slidecast.toml)
//! - User overrides (~/.config/slidecast/slidecast.toml, then ./slidecast.toml)
//! - Later layers win key by key

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use slidecast_error::{ConfigError, SlidecastError, SlidecastResult};
use tracing::{debug, instrument};

/// Timing model of the console rehearsal host.
///
/// ```toml
/// [rehearsal]
/// words_per_second = 2.5
/// slide_change_millis = 150
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RehearsalConfig {
    /// Simulated speaking speed at speech rate 1.0
    pub words_per_second: f64,

    /// Simulated time to render a slide change, in milliseconds
    #[serde(default)]
    pub slide_change_millis: u64,
}

/// Interactive playback controls.
///
/// ```toml
/// [controls]
/// rate_multiplier_step = 0.1
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ControlsConfig {
    /// Rate multiplier change applied per `+`/`-` command
    pub rate_multiplier_step: f64,
}

/// Complete Slidecast configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlidecastConfig {
    /// Rehearsal host timing
    pub rehearsal: RehearsalConfig,

    /// Playback controls
    pub controls: ControlsConfig,
}

impl SlidecastConfig {
    /// Load configuration from a single TOML file.
    ///
    /// Every key must be present; no bundled defaults are merged in.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SlidecastResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                SlidecastError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SlidecastError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use slidecast::SlidecastConfig;
    ///
    /// let config = SlidecastConfig::load()?;
    /// println!("step: {}", config.controls.rate_multiplier_step);
    /// ```
    #[instrument]
    pub fn load() -> SlidecastResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/slidecast/slidecast.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("slidecast").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                SlidecastError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SlidecastError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// The bundled defaults alone.
    pub fn bundled() -> SlidecastResult<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                SlidecastError::from(ConfigError::new(format!(
                    "Bundled configuration is invalid: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let wps = self.rehearsal.words_per_second;
        if !(wps.is_finite() && wps > 0.0) {
            return Err(ConfigError::new(format!(
                "rehearsal.words_per_second must be a positive number, got {}",
                wps
            )));
        }
        let step = self.controls.rate_multiplier_step;
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::new(format!(
                "controls.rate_multiplier_step must be a positive number, got {}",
                step
            )));
        }
        Ok(())
    }
}

const DEFAULT_CONFIG: &str = include_str!("../../../slidecast.toml");
