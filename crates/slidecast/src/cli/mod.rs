//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the slidecast binary.

mod commands;
mod inspect;
mod play;
mod validate;

pub use commands::{Cli, Commands};
pub use inspect::inspect_scenario;
pub use play::play_scenario;
pub use validate::validate_scenario;
