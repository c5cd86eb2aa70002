//! Scenario inspection command handler.

use slidecast::{
    Scenario, ScenarioAction, SlidecastResult, detect_page_number, effective_post_delay,
    effective_speak_parameters, effective_wait_seconds,
};
use std::path::Path;

/// Print every action with the slide page shown when it starts.
pub fn inspect_scenario(path: &Path, rate_multiplier: f64) -> SlidecastResult<()> {
    let scenario = Scenario::from_file(path)?;
    let actions = scenario.actions();

    println!("{:>5}  {:>5}  action", "index", "slide");
    for (index, action) in actions.iter().enumerate() {
        let page = detect_page_number(actions, index) + 1;
        println!(
            "{:>5}  {:>5}  {}",
            index,
            page,
            describe(action, &scenario, rate_multiplier)
        );
    }

    if !scenario.presets().is_empty() {
        println!();
        println!("presets");
        for (index, preset) in scenario.presets().iter().enumerate() {
            let params = effective_speak_parameters(preset, &scenario, rate_multiplier);
            println!(
                "{:>5}  \"{}\" ({}, rate {:.2})",
                index + 1,
                params.text,
                params.language,
                params.rate
            );
        }
    }

    Ok(())
}

fn describe(action: &ScenarioAction, scenario: &Scenario, rate_multiplier: f64) -> String {
    match action {
        ScenarioAction::Speak(speak) => {
            let params = effective_speak_parameters(speak, scenario, rate_multiplier);
            let post_delay = effective_post_delay(speak, scenario, rate_multiplier);
            format!(
                "speak \"{}\" ({}, rate {:.2}, pitch {:.2}, volume {:.2}, delays {:.2}s/{:.2}s)",
                params.text,
                params.language,
                params.rate,
                params.pitch,
                params.volume,
                params.pre_delay_seconds,
                post_delay
            )
        }
        ScenarioAction::ChangeSlidePage(page) => format!("changeSlidePage {}", page),
        ScenarioAction::Pause => "pause".to_string(),
        ScenarioAction::Wait { seconds } => format!(
            "wait {:.2}s",
            effective_wait_seconds(*seconds, rate_multiplier)
        ),
    }
}
