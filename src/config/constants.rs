//! Configuration constants.
//!
//! This module defines the constants used throughout the analysis pipeline,
//! including fetch budgets, size limits, and recommendation parameters.

// Fetch budget
/// Default time budget for a single page fetch in seconds.
/// Covers DNS, connect, TLS, redirects and body download as one attempt.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for page fetches.
///
/// Identifies the calculator honestly rather than posing as a browser.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; seo_calculator/0.1; +https://ai-seo-calculator.netlify.app)";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Bodies larger than this are truncated; the prefix is still analyzed.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum URL length accepted for analysis (2048 characters)
pub const MAX_URL_LENGTH: usize = 2048;

// Redirect handling
/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;

// Recommendations
/// Factors scoring below this value produce a remediation string.
pub const RECOMMENDATION_THRESHOLD: u8 = 70;
/// Maximum number of plays returned for a request.
pub const MAX_PLAYS: usize = 2;

// ROI calibration defaults
/// Missed calls per week assumed when not calibrated
pub const DEFAULT_MISSED_CALLS_PER_WEEK: f64 = 40.0;
/// Weekly sessions on FAQ-bearing pages assumed when not calibrated
pub const DEFAULT_SESSIONS_PER_WEEK: f64 = 600.0;
/// Calibration key read by the missed-call play
pub const CALIBRATION_MISSED_CALLS: &str = "missed_calls_per_week";
/// Calibration key read by the FAQ widget play
pub const CALIBRATION_SESSIONS: &str = "sessions_on_pages_per_week";

// HTTP API
/// Port `serve` listens on when none is given
pub const DEFAULT_SERVER_PORT: u16 = 8080;
