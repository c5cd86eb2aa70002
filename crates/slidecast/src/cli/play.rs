//! Interactive rehearsal command handler.

use slidecast::{
    DEFAULT_RATE_MULTIPLIER, PlayingStatus, RehearsalHost, Scenario, ScenarioPlayer,
    SlidecastConfig, SlidecastResult,
};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const HELP: &str = "commands: p pause/resume | s stop | + faster | - slower | 0 reset speed | \
                    <n> speak preset n (while paused)";

/// A presenter command typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    PauseOrResume,
    Stop,
    Faster,
    Slower,
    ResetSpeed,
    /// One-based preset number
    Preset(usize),
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "p" => Some(Command::PauseOrResume),
            "s" => Some(Command::Stop),
            "+" => Some(Command::Faster),
            "-" => Some(Command::Slower),
            "0" => Some(Command::ResetSpeed),
            other => other.parse().ok().map(Command::Preset),
        }
    }
}

/// Play a scenario against the console rehearsal host.
///
/// Presenter commands are read from stdin until playback finishes.
pub async fn play_scenario(
    path: &Path,
    from: Option<usize>,
    rate_multiplier: f64,
    config: &SlidecastConfig,
) -> SlidecastResult<()> {
    let scenario = Scenario::from_file(path)?;
    let actions = scenario.actions().len();
    if let Some(index) = from.filter(|index| *index >= actions) {
        warn!(index, actions, "Start index is past the last action");
    }

    let player = ScenarioPlayer::new(scenario, from);
    player.increase_rate_multiplier(rate_multiplier - DEFAULT_RATE_MULTIPLIER);

    let observer = tokio::spawn(report_changes(player.clone()));
    let mut commands = spawn_stdin_reader();

    println!("{HELP}");
    info!(path = %path.display(), "Starting rehearsal");
    player.start(Arc::new(RehearsalHost::new(config.rehearsal.clone())));

    loop {
        tokio::select! {
            _ = player.finished() => break,
            line = commands.recv() => match line {
                Some(line) => apply(&player, line.trim(), config.controls.rate_multiplier_step),
                None => {
                    debug!("Stdin closed; waiting for playback to finish");
                    player.finished().await;
                    break;
                }
            },
        }
    }

    observer.abort();
    Ok(())
}

fn apply(player: &ScenarioPlayer, input: &str, step: f64) {
    if input.is_empty() {
        return;
    }
    let Some(command) = Command::parse(input) else {
        println!("{HELP}");
        return;
    };

    match command {
        Command::PauseOrResume => player.pause_or_resume(),
        Command::Stop => player.stop(),
        Command::Faster => player.increase_rate_multiplier(step),
        Command::Slower => player.increase_rate_multiplier(-step),
        Command::ResetSpeed => player.reset_rate_multiplier(),
        Command::Preset(number) => {
            let count = player.scenario().presets().len();
            if number == 0 || number > count {
                println!("no preset {number} (this scenario has {count})");
            } else if !player.status().is_paused() {
                println!("presets can only be spoken while paused");
            } else {
                player.speak_preset(number - 1);
            }
        }
    }
}

/// Print status and speed changes as they happen.
async fn report_changes(player: ScenarioPlayer) {
    let mut status = player.subscribe_status();
    let mut speed = player.subscribe_rate_multiplier();

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    return;
                }
                let current = *status.borrow_and_update();
                if matches!(current, PlayingStatus::Paused | PlayingStatus::Playing) {
                    println!("[{current}]");
                }
            }
            changed = speed.changed() => {
                if changed.is_err() {
                    return;
                }
                let current = *speed.borrow_and_update();
                println!("[speed x{current:.2}]");
            }
        }
    }
}

/// Forward stdin lines from a dedicated thread.
///
/// Blocking reads stay off the runtime so that exiting is never held up by a
/// pending read.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    return;
                }
            }
        }
    });
    rx
}
