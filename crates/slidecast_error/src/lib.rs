//! Error types for the Slidecast library.
//!
//! This crate provides the foundation error types used throughout the Slidecast workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use slidecast_error::{ScenarioError, ScenarioErrorKind, SlidecastResult};
//!
//! fn load() -> SlidecastResult<()> {
//!     Err(ScenarioError::new(ScenarioErrorKind::MissingField("actions".into())))?
//! }
//!
//! match load() {
//!     Ok(()) => println!("loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod scenario;

pub use config::ConfigError;
pub use error::{SlidecastError, SlidecastErrorKind, SlidecastResult};
pub use scenario::{ScenarioError, ScenarioErrorKind};
