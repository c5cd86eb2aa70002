//! Scenario validation command handler.

use slidecast::{Scenario, ScenarioAction, SlidecastResult};
use std::path::Path;
use tracing::info;

/// Load a scenario and print a summary of its contents.
pub fn validate_scenario(path: &Path) -> SlidecastResult<()> {
    let scenario = Scenario::from_file(path)?;
    info!(path = %path.display(), "Scenario is valid");

    let actions = scenario.actions();
    let count = |tag: &str| {
        actions
            .iter()
            .filter(|action| action.type_tag() == tag)
            .count()
    };
    let waited: f64 = actions
        .iter()
        .filter_map(|action| match action {
            ScenarioAction::Wait { seconds } => Some(*seconds),
            _ => None,
        })
        .sum();

    println!("{}: ok", path.display());
    println!("  actions:  {}", actions.len());
    println!("    speak:           {}", count("speak"));
    println!("    changeSlidePage: {}", count("changeSlidePage"));
    println!("    pause:           {}", count("pause"));
    println!("    wait:            {} ({waited:.1}s)", count("wait"));
    println!("  presets:  {}", scenario.presets().len());
    println!("  language: {}", scenario.language());
    println!(
        "  rate {}  pitch {}  volume {}",
        scenario.rate(),
        scenario.pitch(),
        scenario.volume()
    );
    println!(
        "  pre-delay {}s  post-delay {}s",
        scenario.pre_delay(),
        scenario.post_delay()
    );

    Ok(())
}
