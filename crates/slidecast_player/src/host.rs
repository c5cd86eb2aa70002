//! Effect contract between the player and the presentation shell.

use async_trait::async_trait;
use slidecast_core::EffectiveSpeakParameters;

/// Performs the real-world effects the player cannot perform itself.
///
/// Each `ask_*` call returns once the effect has finished (or was cancelled by
/// the host, which the player treats the same). The player issues at most one
/// request at a time and never imposes a timeout on it. When playback is
/// stopped the pending future is dropped; the host does not need to abort
/// whatever it already started.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use slidecast_core::EffectiveSpeakParameters;
/// use slidecast_player::PresentationHost;
///
/// struct Shell;
///
/// #[async_trait]
/// impl PresentationHost for Shell {
///     async fn ask_to_speak(&self, params: &EffectiveSpeakParameters) {
///         synthesizer.speak(params).await;
///     }
///
///     async fn ask_to_change_slide_page(&self, page: usize) {
///         pdf_view.go_to(page).await;
///     }
///
///     async fn finish_playing(&self) {
///         control_panel.reset();
///     }
/// }
/// ```
#[async_trait]
pub trait PresentationHost: Send + Sync {
    /// Speak one utterance, honouring `params.pre_delay_seconds` first.
    async fn ask_to_speak(&self, params: &EffectiveSpeakParameters);

    /// Show the given zero-based slide page.
    ///
    /// Out-of-range pages may be ignored, but the call must still return.
    async fn ask_to_change_slide_page(&self, page: usize);

    /// Playback reached `Stopped`, by running out of actions or by `stop`.
    ///
    /// Delivered exactly once per run.
    async fn finish_playing(&self);
}
