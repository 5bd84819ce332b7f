//! Process-wide resource setup.
//!
//! This module provides:
//! - Logger initialization (plain or JSON)
//! - HTTP client construction for the fetcher
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
