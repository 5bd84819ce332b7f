//! Error type definitions.
//!
//! This module defines the errors surfaced by the analysis pipeline and the
//! failures that can occur while initializing process-wide resources.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error loading a custom widget pattern table.
    #[error("Widget table error: {0}")]
    WidgetTableError(String),
}

/// Errors returned by an analysis request.
///
/// Extraction and scoring never fail, so every variant originates either in
/// input validation, the fetcher, or a play lookup. A request yields either a
/// complete `AnalysisResult` or exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Malformed URL, non-http(s) scheme, or a host the fetcher refuses.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The fetch exceeded its time budget and was cancelled.
    #[error("Fetch timed out after {budget_secs}s")]
    FetchTimeout {
        /// Budget that was exceeded, in seconds
        budget_secs: u64,
    },

    /// Upstream answered 502/504 or could not be reached at all.
    #[error("Fetch blocked{}: {message}", format_status(.status))]
    FetchBlocked {
        /// Upstream status, when there was a response
        status: Option<u16>,
        /// Transport or status description
        message: String,
    },

    /// Any other non-2xx answer or network failure.
    #[error("Fetch failed{}: {message}", format_status(.status))]
    FetchError {
        /// Upstream status, when there was a response
        status: Option<u16>,
        /// Transport or status description
        message: String,
    },

    /// A play identifier with no ROI model. Indicates a programming error.
    #[error("Unknown play: {0}")]
    UnknownPlay(String),
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Coarse classification of a failed fetch.
///
/// Derived from the transport error or the upstream status, then turned into
/// the matching `AnalysisError` variant by the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FetchFailureKind {
    /// Budget exceeded
    Timeout,
    /// Gateway refusal or unreachable host
    Blocked,
    /// Anything else
    Other,
}

impl AnalysisError {
    /// HTTP status used when the error is returned by the API.
    pub fn http_status(&self) -> u16 {
        match self {
            AnalysisError::InvalidUrl(_) => 400,
            AnalysisError::FetchTimeout { .. } => 504,
            AnalysisError::FetchBlocked { .. } => 502,
            AnalysisError::FetchError { .. } => 500,
            AnalysisError::UnknownPlay(_) => 500,
        }
    }

    /// Stable machine-readable identifier of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidUrl(_) => "invalid_url",
            AnalysisError::FetchTimeout { .. } => "fetch_timeout",
            AnalysisError::FetchBlocked { .. } => "fetch_blocked",
            AnalysisError::FetchError { .. } => "fetch_error",
            AnalysisError::UnknownPlay(_) => "unknown_play",
        }
    }

    /// Caller-facing guidance to show next to the error message.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            AnalysisError::FetchTimeout { .. } => Some(
                "The site took too long to respond. Retry with a longer timeout or paste the page HTML instead.",
            ),
            AnalysisError::FetchBlocked { .. } => Some(
                "The site could not be reached or blocked the request. Paste the page HTML instead of retrying.",
            ),
            _ => None,
        }
    }

    /// Builds the error matching a fetch failure classification.
    pub fn from_fetch_failure(
        kind: FetchFailureKind,
        status: Option<u16>,
        message: String,
        budget_secs: u64,
    ) -> Self {
        match kind {
            FetchFailureKind::Timeout => AnalysisError::FetchTimeout { budget_secs },
            FetchFailureKind::Blocked => AnalysisError::FetchBlocked { status, message },
            FetchFailureKind::Other => AnalysisError::FetchError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(AnalysisError::InvalidUrl("x".into()).http_status(), 400);
        assert_eq!(AnalysisError::FetchTimeout { budget_secs: 20 }.http_status(), 504);
        assert_eq!(
            AnalysisError::FetchBlocked {
                status: Some(502),
                message: "bad gateway".into()
            }
            .http_status(),
            502
        );
        assert_eq!(
            AnalysisError::FetchError {
                status: Some(404),
                message: "not found".into()
            }
            .http_status(),
            500
        );
        assert_eq!(AnalysisError::UnknownPlay("x".into()).http_status(), 500);
    }

    #[test]
    fn test_display_includes_upstream_status() {
        let err = AnalysisError::FetchError {
            status: Some(404),
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "Fetch failed (HTTP 404): Not Found");

        let err = AnalysisError::FetchBlocked {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "Fetch blocked: connection refused");
    }

    #[test]
    fn test_guidance_points_to_html_mode() {
        let timeout = AnalysisError::FetchTimeout { budget_secs: 20 };
        assert!(timeout.guidance().unwrap_or_default().contains("HTML"));
        assert!(AnalysisError::InvalidUrl("x".into()).guidance().is_none());
    }

    #[test]
    fn test_every_failure_kind_maps_to_a_fetch_error() {
        for kind in FetchFailureKind::iter() {
            let err = AnalysisError::from_fetch_failure(kind, Some(502), "m".into(), 7);
            assert!(matches!(
                err,
                AnalysisError::FetchTimeout { budget_secs: 7 }
                    | AnalysisError::FetchBlocked { .. }
                    | AnalysisError::FetchError { .. }
            ));
        }
    }
}
