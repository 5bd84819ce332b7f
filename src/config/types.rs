//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};

use crate::config::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration.
///
/// Usable programmatically through `Default`, and flattened into the CLI
/// where every field is also settable from a `SEO_CALCULATOR_*` variable.
///
/// # Examples
///
/// ```no_run
/// use seo_calculator::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Log level
    #[arg(long, value_enum, default_value = "info", env = "SEO_CALCULATOR_LOG_LEVEL", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", env = "SEO_CALCULATOR_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Time budget for a page fetch in seconds (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "SEO_CALCULATOR_TIMEOUT_SECONDS",
        global = true
    )]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, env = "SEO_CALCULATOR_USER_AGENT", global = true)]
    pub user_agent: String,

    /// Allow fetching loopback and private-network hosts
    #[arg(long, env = "SEO_CALCULATOR_ALLOW_PRIVATE_HOSTS", global = true)]
    pub allow_private_hosts: bool,

    /// Widget pattern table (JSON) replacing the built-in one
    #[arg(long, value_name = "FILE", env = "SEO_CALCULATOR_WIDGETS", global = true)]
    pub widgets: Option<PathBuf>,
}

impl Config {
    /// Fetch budget as a `Duration`.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_private_hosts: false,
            widgets: None,
        }
    }
}
