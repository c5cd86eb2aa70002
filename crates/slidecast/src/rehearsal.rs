//! Console presentation host for rehearsing a scenario without speech or slides.

use crate::RehearsalConfig;
use async_trait::async_trait;
use slidecast_core::EffectiveSpeakParameters;
use slidecast_player::PresentationHost;
use std::time::Duration;
use tracing::{debug, info};

/// Slowest speech rate the timing model simulates.
const MIN_SIMULATED_RATE: f64 = 0.1;

/// Prints each effect to stdout and sleeps for as long as it would take.
///
/// Speech lasts its pre-delay plus its word count divided by
/// `words_per_second` scaled by the effective speech rate.
#[derive(Debug, Clone)]
pub struct RehearsalHost {
    config: RehearsalConfig,
}

impl RehearsalHost {
    /// Create a host with the given timing model.
    pub fn new(config: RehearsalConfig) -> Self {
        Self { config }
    }

    /// Simulated duration of one utterance.
    pub fn speech_duration(&self, params: &EffectiveSpeakParameters) -> Duration {
        let words = params.text.split_whitespace().count().max(1) as f64;
        let rate = f64::from(params.rate).max(MIN_SIMULATED_RATE);
        let speaking = words / (self.config.words_per_second * rate);
        let seconds = params.pre_delay_seconds.max(0.0) + speaking;
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }

    /// Simulated slide render time.
    pub fn slide_change_duration(&self) -> Duration {
        Duration::from_millis(self.config.slide_change_millis)
    }
}

#[async_trait]
impl PresentationHost for RehearsalHost {
    async fn ask_to_speak(&self, params: &EffectiveSpeakParameters) {
        let duration = self.speech_duration(params);
        debug!(
            language = %params.language,
            rate = params.rate,
            pitch = params.pitch,
            volume = params.volume,
            ?duration,
            "Speaking"
        );
        println!("  \u{1f5e3} {}", params.text);
        tokio::time::sleep(duration).await;
    }

    async fn ask_to_change_slide_page(&self, page: usize) {
        debug!(page, "Changing slide page");
        println!("[slide {}]", page + 1);
        tokio::time::sleep(self.slide_change_duration()).await;
    }

    async fn finish_playing(&self) {
        info!("Rehearsal finished");
        println!("[end]");
    }
}
