//! Scenario playback.
//!
//! A [`ScenarioPlayer`] walks a scenario's actions one at a time, asking its
//! [`PresentationHost`] to perform each effect and waiting for it to finish
//! before moving on. All mutable session state lives in `watch` channels so
//! that status checks and status changes are atomic with respect to each
//! other, and so that the shell can observe them.

use crate::{PlayingStatus, PresentationHost, Transition};
use parking_lot::Mutex;
use slidecast_core::{
    Scenario, ScenarioAction, detect_page_number, effective_post_delay,
    effective_speak_parameters, effective_wait_seconds,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tracing::{debug, error, info, instrument, warn};

/// Slowest allowed playback speed.
pub const MIN_RATE_MULTIPLIER: f64 = 0.05;

/// Fastest allowed playback speed.
pub const MAX_RATE_MULTIPLIER: f64 = 2.0;

/// Playback speed of a new session and after a reset.
pub const DEFAULT_RATE_MULTIPLIER: f64 = 1.0;

/// Cancellation handle of the active run.
#[derive(Debug)]
struct RunHandle {
    /// Taken by the first `stop`
    cancel: Option<oneshot::Sender<()>>,
}

/// State shared between the player handle and its playback task.
#[derive(Debug)]
struct Session {
    scenario: Arc<Scenario>,
    status: watch::Sender<PlayingStatus>,
    action_index: watch::Sender<Option<usize>>,
    page_number: watch::Sender<usize>,
    rate_multiplier: watch::Sender<f64>,
    running: watch::Sender<bool>,
    run: Mutex<Option<RunHandle>>,
}

/// Keeps the session alive on behalf of every player handle.
///
/// Dropping the last handle cancels the active run, so the playback task
/// never outlives the handles that could stop it.
#[derive(Debug)]
struct Controller {
    session: Arc<Session>,
}

impl Drop for Controller {
    fn drop(&mut self) {
        if self.session.cancel() {
            debug!("Last player handle dropped; cancelling playback");
        }
    }
}

/// Plays a scenario against a presentation host.
///
/// The player is a cheap handle; clones control the same session. Every
/// control method is a no-op when the current status does not allow it.
/// Dropping the last clone stops the active run, and the host still receives
/// `finish_playing`.
///
/// # Example
///
/// ```rust,ignore
/// use slidecast_player::ScenarioPlayer;
/// use std::sync::Arc;
///
/// let player = ScenarioPlayer::new(scenario, None);
/// player.start(Arc::new(shell));
///
/// player.pause();
/// player.resume();
/// player.increase_rate_multiplier(0.25);
///
/// player.stop();
/// player.finished().await;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioPlayer {
    controller: Arc<Controller>,
}

impl ScenarioPlayer {
    /// Create a stopped player.
    ///
    /// `current_action_index` is the action playback resumes at; `None` starts
    /// from the beginning.
    pub fn new(scenario: impl Into<Arc<Scenario>>, current_action_index: Option<usize>) -> Self {
        let session = Session {
            scenario: scenario.into(),
            status: watch::Sender::new(PlayingStatus::Stopped),
            action_index: watch::Sender::new(current_action_index),
            page_number: watch::Sender::new(0),
            rate_multiplier: watch::Sender::new(DEFAULT_RATE_MULTIPLIER),
            running: watch::Sender::new(false),
            run: Mutex::new(None),
        };
        Self {
            controller: Arc::new(Controller {
                session: Arc::new(session),
            }),
        }
    }

    /// Start playback on the current Tokio runtime.
    ///
    /// Ignored while a run is active, and logged and ignored outside a Tokio
    /// runtime. When resuming mid-scenario the slide page implied by the
    /// earlier actions is shown first, then playback continues at the current
    /// action.
    #[instrument(skip(self, host))]
    pub fn start(&self, host: Arc<dyn PresentationHost>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("No Tokio runtime to play on; ignoring start");
            return;
        };

        let mut run = self.session().run.lock();
        if run.is_some() {
            debug!("Playback already running; ignoring start");
            return;
        }

        let (cancel_tx, cancel_rx) = oneshot::channel();
        *run = Some(RunHandle {
            cancel: Some(cancel_tx),
        });
        self.session().running.send_replace(true);
        self.session().status.send_replace(PlayingStatus::Playing);

        let resume_at = *self.session().action_index.borrow();
        let start_page = match resume_at {
            Some(index) => detect_page_number(self.session().scenario.actions(), index),
            None => 0,
        };
        // Step back one so that advancing lands on the resumed action again.
        self.session()
            .action_index
            .send_replace(resume_at.and_then(|index| index.checked_sub(1)));
        self.session().page_number.send_replace(start_page);
        drop(run);

        info!(?resume_at, start_page, "Starting playback");
        let session = Arc::clone(&self.controller.session);
        runtime.spawn(session.run(host, cancel_rx, start_page));
    }

    /// Cancel the active run.
    ///
    /// Interrupts any delay or paused wait immediately; the host's pending
    /// effect is abandoned. The host still receives `finish_playing` exactly
    /// once. Calling `stop` again, or while stopped, does nothing.
    pub fn stop(&self) {
        if self.session().cancel() {
            info!("Stopping playback");
        } else {
            debug!("Playback not running; ignoring stop");
        }
    }

    /// Pause after the in-flight effect completes.
    pub fn pause(&self) {
        self.apply(Transition::Pause);
    }

    /// Continue from `Pausing` or `Paused`.
    pub fn resume(&self) {
        self.apply(Transition::Resume);
    }

    /// Pause when playing, resume when pausing or paused.
    pub fn pause_or_resume(&self) {
        self.apply(Transition::PauseOrResume);
    }

    /// Speak the preset at `index`; only honoured while paused.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index` is not a valid preset index. Release
    /// builds log the error and ignore the request.
    pub fn speak_preset(&self, index: usize) {
        let count = self.session().scenario.presets().len();
        debug_assert!(
            index < count,
            "preset index {} out of range ({} presets)",
            index,
            count
        );
        if index >= count {
            error!(index, count, "Preset index out of range; ignoring");
            return;
        }
        self.apply(Transition::SpeakPreset(index));
    }

    /// Set the rate multiplier back to 1.0.
    pub fn reset_rate_multiplier(&self) {
        self.session()
            .rate_multiplier
            .send_replace(DEFAULT_RATE_MULTIPLIER);
    }

    /// Add `delta` to the rate multiplier, clamped to
    /// [`MIN_RATE_MULTIPLIER`]..=[`MAX_RATE_MULTIPLIER`].
    ///
    /// Subscribers are only notified when the clamped value actually changes.
    pub fn increase_rate_multiplier(&self, delta: f64) {
        if !delta.is_finite() {
            warn!(delta, "Ignoring non-finite rate multiplier delta");
            return;
        }
        let changed = self.session().rate_multiplier.send_if_modified(|current| {
            let next = (*current + delta).clamp(MIN_RATE_MULTIPLIER, MAX_RATE_MULTIPLIER);
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            debug!(rate_multiplier = self.rate_multiplier(), "Rate multiplier changed");
        }
    }

    /// Move the resume position while no run is active.
    ///
    /// Ignored during playback.
    pub fn set_current_action_index(&self, index: Option<usize>) {
        let run = self.session().run.lock();
        if run.is_some() {
            debug!(?index, "Playback running; ignoring reposition");
            return;
        }
        self.session().action_index.send_replace(index);
    }

    /// Wait until no run is active.
    ///
    /// Resolves after the host has been told `finish_playing`.
    pub async fn finished(&self) {
        let mut running = self.session().running.subscribe();
        // The sender lives as long as the session, so this cannot fail.
        let _ = running.wait_for(|running| !running).await;
    }

    /// The scenario being played.
    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.session().scenario
    }

    /// Current playing status.
    pub fn status(&self) -> PlayingStatus {
        *self.session().status.borrow()
    }

    /// Index of the most recently started action, `None` before the first.
    pub fn current_action_index(&self) -> Option<usize> {
        *self.session().action_index.borrow()
    }

    /// Slide page implied by playback so far.
    pub fn current_page_number(&self) -> usize {
        *self.session().page_number.borrow()
    }

    /// Current playback speed.
    pub fn rate_multiplier(&self) -> f64 {
        *self.session().rate_multiplier.borrow()
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        *self.session().running.borrow()
    }

    /// Observe status changes.
    pub fn subscribe_status(&self) -> watch::Receiver<PlayingStatus> {
        self.session().status.subscribe()
    }

    /// Observe the current action index.
    pub fn subscribe_current_action_index(&self) -> watch::Receiver<Option<usize>> {
        self.session().action_index.subscribe()
    }

    /// Observe the slide page implied by playback.
    pub fn subscribe_current_page_number(&self) -> watch::Receiver<usize> {
        self.session().page_number.subscribe()
    }

    /// Observe rate multiplier changes.
    pub fn subscribe_rate_multiplier(&self) -> watch::Receiver<f64> {
        self.session().rate_multiplier.subscribe()
    }

    fn session(&self) -> &Session {
        &self.controller.session
    }

    fn apply(&self, transition: Transition) {
        let mut from = PlayingStatus::Stopped;
        let applied = self.session().status.send_if_modified(|status| {
            from = *status;
            match status.on(transition) {
                Some(next) => {
                    *status = next;
                    true
                }
                None => false,
            }
        });
        if applied {
            debug!(%transition, %from, to = %self.status(), "Applied transition");
        } else {
            debug!(%transition, status = %from, "Transition not allowed; ignoring");
        }
    }
}

impl Session {
    /// Signal the active run to stop; false if there is none or it was
    /// already signalled.
    fn cancel(&self) -> bool {
        let mut run = self.run.lock();
        match run.as_mut().and_then(|handle| handle.cancel.take()) {
            Some(cancel) => {
                // The run may have just finished on its own.
                let _ = cancel.send(());
                true
            }
            None => false,
        }
    }

    #[instrument(skip_all, fields(actions = self.scenario.actions().len()))]
    async fn run(
        self: Arc<Self>,
        host: Arc<dyn PresentationHost>,
        cancel: oneshot::Receiver<()>,
        start_page: usize,
    ) {
        tokio::select! {
            biased;
            _ = cancel => info!("Playback cancelled"),
            _ = self.drive(host.as_ref(), start_page) => info!("Playback finished"),
        }

        self.status.send_replace(PlayingStatus::Stopped);
        host.finish_playing().await;

        // `start` sets the flag under the same lock.
        let mut run = self.run.lock();
        *run = None;
        self.running.send_replace(false);
    }

    async fn drive(&self, host: &dyn PresentationHost, start_page: usize) {
        host.ask_to_change_slide_page(start_page).await;

        loop {
            let status = *self.status.borrow();
            match status {
                PlayingStatus::Playing => self.play_next_action(host).await,
                PlayingStatus::Pausing => {
                    self.status.send_if_modified(|status| {
                        if *status == PlayingStatus::Pausing {
                            *status = PlayingStatus::Paused;
                            true
                        } else {
                            false
                        }
                    });
                }
                PlayingStatus::Paused => {
                    debug!("Paused; waiting for the presenter");
                    let mut changes = self.status.subscribe();
                    let woke = changes
                        .wait_for(|status| *status != PlayingStatus::Paused)
                        .await
                        .is_ok();
                    if !woke {
                        return;
                    }
                }
                PlayingStatus::SpeakingPreset(index) => self.speak_preset(host, index).await,
                PlayingStatus::Stopped => return,
            }
        }
    }

    async fn play_next_action(&self, host: &dyn PresentationHost) {
        let next = self.action_index.borrow().map_or(0, |index| index + 1);
        let Some(action) = self.scenario.actions().get(next) else {
            debug!("No more actions");
            self.status.send_replace(PlayingStatus::Stopped);
            return;
        };

        self.action_index.send_replace(Some(next));
        debug!(index = next, action = action.type_tag(), "Playing action");

        match action {
            ScenarioAction::Speak(params) => {
                let request =
                    effective_speak_parameters(params, &self.scenario, self.rate_multiplier());
                host.ask_to_speak(&request).await;
                let post_delay =
                    effective_post_delay(params, &self.scenario, self.rate_multiplier());
                sleep_seconds(post_delay).await;
            }
            ScenarioAction::ChangeSlidePage(page) => {
                let mut target = 0;
                self.page_number.send_modify(|current| {
                    *current = page.apply(*current);
                    target = *current;
                });
                host.ask_to_change_slide_page(target).await;
            }
            ScenarioAction::Pause => {
                self.status.send_if_modified(|status| {
                    if matches!(status, PlayingStatus::Playing | PlayingStatus::Pausing) {
                        *status = PlayingStatus::Paused;
                        true
                    } else {
                        false
                    }
                });
            }
            ScenarioAction::Wait { seconds } => {
                sleep_seconds(effective_wait_seconds(*seconds, self.rate_multiplier())).await;
            }
        }
    }

    async fn speak_preset(&self, host: &dyn PresentationHost, index: usize) {
        let expected = PlayingStatus::SpeakingPreset(index);
        if let Some(preset) = self.scenario.preset(index) {
            let request =
                effective_speak_parameters(preset, &self.scenario, self.rate_multiplier());
            debug!(index, "Speaking preset");
            host.ask_to_speak(&request).await;
        } else {
            warn!(index, "Preset vanished; returning to paused");
        }
        self.status.send_if_modified(|status| {
            if *status == expected {
                *status = PlayingStatus::Paused;
                true
            } else {
                false
            }
        });
    }

    fn rate_multiplier(&self) -> f64 {
        *self.rate_multiplier.borrow()
    }
}

async fn sleep_seconds(seconds: f64) {
    if seconds <= 0.0 {
        return;
    }
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) => tokio::time::sleep(duration).await,
        Err(e) => warn!(seconds, error = %e, "Skipping unrepresentable delay"),
    }
}
