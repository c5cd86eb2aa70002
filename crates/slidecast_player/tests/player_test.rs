use async_trait::async_trait;
use parking_lot::Mutex;
use slidecast_core::{EffectiveSpeakParameters, Page, Scenario, ScenarioAction, SpeakParameters};
use slidecast_player::{
    MAX_RATE_MULTIPLIER, MIN_RATE_MULTIPLIER, PlayingStatus, PresentationHost, ScenarioPlayer,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
enum Effect {
    Speak(String),
    Page(usize),
    Finish,
}

/// Records every request and yields like a real shell would; speech
/// optionally blocks until the gate opens.
struct RecordingHost {
    effects: mpsc::UnboundedSender<Effect>,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl PresentationHost for RecordingHost {
    async fn ask_to_speak(&self, params: &EffectiveSpeakParameters) {
        let _ = self.effects.send(Effect::Speak(params.text.clone()));
        tokio::task::yield_now().await;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    async fn ask_to_change_slide_page(&self, page: usize) {
        let _ = self.effects.send(Effect::Page(page));
        tokio::task::yield_now().await;
    }

    async fn finish_playing(&self) {
        let _ = self.effects.send(Effect::Finish);
    }
}

fn recording_host() -> (Arc<RecordingHost>, mpsc::UnboundedReceiver<Effect>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let host = RecordingHost {
        effects: tx,
        gate: None,
    };
    (Arc::new(host), rx)
}

fn gated_host() -> (
    Arc<RecordingHost>,
    mpsc::UnboundedReceiver<Effect>,
    Arc<Notify>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let gate = Arc::new(Notify::new());
    let host = RecordingHost {
        effects: tx,
        gate: Some(Arc::clone(&gate)),
    };
    (Arc::new(host), rx, gate)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Effect>) -> Vec<Effect> {
    let mut effects = Vec::new();
    while let Ok(effect) = rx.try_recv() {
        effects.push(effect);
    }
    effects
}

fn speak(text: &str) -> Effect {
    Effect::Speak(text.to_string())
}

/// Collect every value published on `changes` until the task is aborted.
fn record_changes<T>(mut changes: watch::Receiver<T>) -> (JoinHandle<()>, Arc<Mutex<Vec<T>>>)
where
    T: Clone + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let task = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let value = changes.borrow_and_update().clone();
            sink.lock().push(value);
        }
    });
    (task, seen)
}

async fn wait_for_status(player: &ScenarioPlayer, expected: PlayingStatus) {
    let mut status = player.subscribe_status();
    status.wait_for(|status| *status == expected).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_plays_every_action_in_order() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::ChangeSlidePage(Page::Next),
        ScenarioAction::wait(1.0),
        ScenarioAction::speak("b"),
        ScenarioAction::ChangeSlidePage(Page::To(3)),
        ScenarioAction::ChangeSlidePage(Page::Previous),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx) = recording_host();

    player.start(host);
    assert!(player.is_running());
    player.finished().await;

    assert_eq!(
        drain(&mut rx),
        vec![
            Effect::Page(0),
            speak("a"),
            Effect::Page(1),
            speak("b"),
            Effect::Page(3),
            Effect::Page(2),
            Effect::Finish,
        ]
    );
    assert_eq!(player.status(), PlayingStatus::Stopped);
    assert_eq!(player.current_action_index(), Some(5));
    assert_eq!(player.current_page_number(), 2);
    assert!(!player.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_empty_scenario_shows_first_page_and_finishes() {
    let player = ScenarioPlayer::new(Scenario::with_actions(Vec::new()), None);
    let (host, mut rx) = recording_host();

    player.start(host);
    player.finished().await;

    assert_eq!(drain(&mut rx), vec![Effect::Page(0), Effect::Finish]);
    assert_eq!(player.current_action_index(), None);
}

#[tokio::test(start_paused = true)]
async fn test_resuming_mid_scenario_restores_the_page() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::ChangeSlidePage(Page::Next),
        ScenarioAction::speak("b"),
        ScenarioAction::speak("c"),
    ]);
    let player = ScenarioPlayer::new(scenario, Some(2));
    let (host, mut rx) = recording_host();

    player.start(host);
    player.finished().await;

    assert_eq!(
        drain(&mut rx),
        vec![Effect::Page(1), speak("b"), speak("c"), Effect::Finish]
    );
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_finish_replays_the_last_action() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::ChangeSlidePage(Page::To(2)),
        ScenarioAction::speak("a"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx) = recording_host();

    player.start(host.clone());
    player.finished().await;
    assert_eq!(
        drain(&mut rx),
        vec![Effect::Page(0), Effect::Page(2), speak("a"), Effect::Finish]
    );

    player.start(host);
    player.finished().await;
    assert_eq!(
        drain(&mut rx),
        vec![Effect::Page(2), speak("a"), Effect::Finish]
    );
}

#[tokio::test(start_paused = true)]
async fn test_second_start_while_running_is_ignored() {
    let scenario = Scenario::with_actions(vec![ScenarioAction::speak("a")]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx, gate) = gated_host();

    player.start(host.clone());
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("a")));

    player.start(host);
    gate.notify_one();
    player.finished().await;

    assert_eq!(drain(&mut rx), vec![Effect::Finish]);
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent_and_finishes_once() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::speak("b"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx, _gate) = gated_host();

    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("a")));

    player.stop();
    player.stop();
    player.finished().await;
    player.stop();

    assert_eq!(drain(&mut rx), vec![Effect::Finish]);
    assert_eq!(player.status(), PlayingStatus::Stopped);
    assert_eq!(player.current_action_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_paused_ends_the_run() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::Pause,
        ScenarioAction::speak("b"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx) = recording_host();

    player.start(host);
    wait_for_status(&player, PlayingStatus::Paused).await;
    assert_eq!(player.current_action_index(), Some(1));

    player.stop();
    player.finished().await;

    assert_eq!(
        drain(&mut rx),
        vec![Effect::Page(0), speak("a"), Effect::Finish]
    );
}

#[tokio::test(start_paused = true)]
async fn test_stop_interrupts_a_long_wait() {
    let scenario = Scenario::with_actions(vec![ScenarioAction::wait(3600.0)]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx) = recording_host();
    let started = Instant::now();

    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    tokio::time::sleep(Duration::from_secs(1)).await;
    player.stop();
    player.finished().await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(drain(&mut rx), vec![Effect::Finish]);
}

#[tokio::test(start_paused = true)]
async fn test_pause_takes_effect_after_the_current_speech() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::speak("b"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx, gate) = gated_host();

    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("a")));

    player.pause();
    assert_eq!(player.status(), PlayingStatus::Pausing);

    gate.notify_one();
    wait_for_status(&player, PlayingStatus::Paused).await;
    assert!(drain(&mut rx).is_empty());
    assert_eq!(player.current_action_index(), Some(0));

    player.resume();
    assert_eq!(rx.recv().await, Some(speak("b")));
    gate.notify_one();
    player.finished().await;

    assert_eq!(drain(&mut rx), vec![Effect::Finish]);
}

#[tokio::test(start_paused = true)]
async fn test_resume_before_pause_lands_keeps_playing() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::speak("b"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx, gate) = gated_host();

    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("a")));

    player.pause_or_resume();
    assert_eq!(player.status(), PlayingStatus::Pausing);
    player.pause_or_resume();
    assert_eq!(player.status(), PlayingStatus::Playing);

    gate.notify_one();
    assert_eq!(rx.recv().await, Some(speak("b")));
    gate.notify_one();
    player.finished().await;
}

#[tokio::test(start_paused = true)]
async fn test_preset_is_spoken_while_paused_then_returns_to_paused() {
    let scenario = Scenario::builder()
        .actions(vec![ScenarioAction::Pause, ScenarioAction::speak("after")])
        .presets(vec![SpeakParameters::new("hello"), SpeakParameters::new("thanks")])
        .build()
        .unwrap();
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx) = recording_host();

    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    wait_for_status(&player, PlayingStatus::Paused).await;

    player.speak_preset(1);
    assert_eq!(player.status(), PlayingStatus::SpeakingPreset(1));
    assert_eq!(rx.recv().await, Some(speak("thanks")));
    wait_for_status(&player, PlayingStatus::Paused).await;
    assert_eq!(player.current_action_index(), Some(0));

    player.resume();
    player.finished().await;

    assert_eq!(drain(&mut rx), vec![speak("after"), Effect::Finish]);
}

#[tokio::test(start_paused = true)]
async fn test_preset_request_while_playing_is_ignored() {
    let scenario = Scenario::builder()
        .actions(vec![ScenarioAction::speak("a")])
        .presets(vec![SpeakParameters::new("hello")])
        .build()
        .unwrap();
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx, gate) = gated_host();

    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("a")));

    player.speak_preset(0);
    assert_eq!(player.status(), PlayingStatus::Playing);

    gate.notify_one();
    player.finished().await;
    assert_eq!(drain(&mut rx), vec![Effect::Finish]);
}

#[tokio::test(start_paused = true)]
async fn test_resume_while_speaking_preset_is_ignored() {
    let scenario = Scenario::builder()
        .actions(vec![ScenarioAction::Pause])
        .presets(vec![SpeakParameters::new("hello")])
        .build()
        .unwrap();
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx, gate) = gated_host();

    player.start(host);
    wait_for_status(&player, PlayingStatus::Paused).await;
    player.speak_preset(0);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("hello")));

    player.resume();
    assert_eq!(player.status(), PlayingStatus::SpeakingPreset(0));

    gate.notify_one();
    wait_for_status(&player, PlayingStatus::Paused).await;
    player.stop();
    player.finished().await;
}

#[tokio::test(start_paused = true)]
async fn test_rate_multiplier_scales_waits() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::wait(4.0),
        ScenarioAction::speak("done"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    player.increase_rate_multiplier(1.0);
    let (host, _rx) = recording_host();
    let started = Instant::now();

    player.start(host);
    player.finished().await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(2), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(2100), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_post_delay_follows_speech() {
    let scenario = Scenario::builder()
        .actions(vec![ScenarioAction::speak("a"), ScenarioAction::speak("b")])
        .post_delay(3.0)
        .build()
        .unwrap();
    let player = ScenarioPlayer::new(scenario, None);
    let (host, _rx) = recording_host();
    let started = Instant::now();

    player.start(host);
    player.finished().await;

    assert!(started.elapsed() >= Duration::from_secs(6));
}

#[test]
fn test_rate_multiplier_is_clamped_and_resettable() {
    let player = ScenarioPlayer::new(Scenario::with_actions(Vec::new()), None);
    let mut changes = player.subscribe_rate_multiplier();
    assert_eq!(*changes.borrow_and_update(), 1.0);

    player.increase_rate_multiplier(0.5);
    assert_eq!(player.rate_multiplier(), 1.5);
    assert!(changes.has_changed().unwrap());
    changes.borrow_and_update();

    player.increase_rate_multiplier(10.0);
    assert_eq!(player.rate_multiplier(), MAX_RATE_MULTIPLIER);
    changes.borrow_and_update();

    player.increase_rate_multiplier(1.0);
    assert!(!changes.has_changed().unwrap());

    player.increase_rate_multiplier(-5.0);
    assert_eq!(player.rate_multiplier(), MIN_RATE_MULTIPLIER);

    player.reset_rate_multiplier();
    assert_eq!(player.rate_multiplier(), 1.0);
    changes.borrow_and_update();

    player.reset_rate_multiplier();
    assert!(changes.has_changed().unwrap());

    player.increase_rate_multiplier(f64::NAN);
    assert_eq!(player.rate_multiplier(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_repositioning_only_while_idle() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::speak("b"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);

    player.set_current_action_index(Some(1));
    assert_eq!(player.current_action_index(), Some(1));

    let (host, mut rx, gate) = gated_host();
    player.start(host);
    assert_eq!(rx.recv().await, Some(Effect::Page(0)));
    assert_eq!(rx.recv().await, Some(speak("b")));

    player.set_current_action_index(None);
    assert_eq!(player.current_action_index(), Some(1));

    gate.notify_one();
    player.finished().await;
}

#[tokio::test(start_paused = true)]
async fn test_controls_are_ignored_while_stopped() {
    let scenario = Scenario::with_actions(vec![ScenarioAction::speak("a")]);
    let player = ScenarioPlayer::new(scenario, None);

    player.pause();
    player.resume();
    player.pause_or_resume();
    player.stop();

    assert_eq!(player.status(), PlayingStatus::Stopped);
    assert!(!player.is_running());
    player.finished().await;
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "preset index")]
fn test_out_of_range_preset_panics_in_debug_builds() {
    let player = ScenarioPlayer::new(Scenario::with_actions(Vec::new()), None);
    player.speak_preset(0);
}

#[cfg(not(debug_assertions))]
#[test]
fn test_out_of_range_preset_is_ignored_in_release_builds() {
    let player = ScenarioPlayer::new(Scenario::with_actions(Vec::new()), None);
    player.speak_preset(0);
    assert_eq!(player.status(), PlayingStatus::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_index_and_page_subscribers_observe_every_step() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::ChangeSlidePage(Page::To(3)),
        ScenarioAction::speak("a"),
        ScenarioAction::ChangeSlidePage(Page::Next),
        ScenarioAction::speak("b"),
        ScenarioAction::ChangeSlidePage(Page::Previous),
        ScenarioAction::speak("c"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let (index_task, indexes) = record_changes(player.subscribe_current_action_index());
    let (page_task, pages) = record_changes(player.subscribe_current_page_number());
    let (host, _rx) = recording_host();

    player.start(host);
    player.finished().await;
    index_task.abort();
    page_task.abort();

    assert_eq!(
        *indexes.lock(),
        vec![
            None,
            Some(0),
            Some(1),
            Some(2),
            Some(3),
            Some(4),
            Some(5)
        ]
    );
    assert_eq!(*pages.lock(), vec![0, 3, 4, 3]);
}

#[test]
fn test_start_outside_a_runtime_leaves_the_session_idle() {
    let scenario = Scenario::with_actions(vec![ScenarioAction::speak("a")]);
    let player = ScenarioPlayer::new(scenario, None);
    let (host, mut rx) = recording_host();

    player.start(host.clone());
    assert_eq!(player.status(), PlayingStatus::Stopped);
    assert!(!player.is_running());
    assert_eq!(player.current_action_index(), None);
    assert!(drain(&mut rx).is_empty());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        player.start(host);
        player.finished().await;
    });

    assert_eq!(
        drain(&mut rx),
        vec![Effect::Page(0), speak("a"), Effect::Finish]
    );
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_last_handle_stops_playback() {
    let scenario = Scenario::with_actions(vec![
        ScenarioAction::speak("a"),
        ScenarioAction::Pause,
        ScenarioAction::speak("b"),
    ]);
    let player = ScenarioPlayer::new(scenario, None);
    let status = player.subscribe_status();
    let (host, mut rx) = recording_host();

    player.start(host);
    wait_for_status(&player, PlayingStatus::Paused).await;
    let clone = player.clone();
    drop(player);
    assert!(clone.is_running());
    drop(clone);

    // The channel closes once the playback task has released the host.
    let mut effects = Vec::new();
    while let Some(effect) = rx.recv().await {
        effects.push(effect);
    }
    assert_eq!(effects, vec![Effect::Page(0), speak("a"), Effect::Finish]);
    assert_eq!(*status.borrow(), PlayingStatus::Stopped);
}
