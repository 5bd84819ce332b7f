//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, thresholds)
//! - Library configuration and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
