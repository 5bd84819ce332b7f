//! Fetch failure categorization.
//!
//! Maps transport errors and upstream statuses onto the three fetch failure
//! kinds the pipeline reports. There is no retry strategy here: a failed fetch
//! surfaces immediately and retrying is left to the caller.

use super::types::FetchFailureKind;

/// Categorizes an upstream HTTP status that is not a success.
///
/// 502 and 504 mean a proxy or CDN in front of the site refused or gave up,
/// which in practice is bot blocking or an unreachable origin.
pub fn categorize_status(status: u16) -> FetchFailureKind {
    match status {
        502 | 504 => FetchFailureKind::Blocked,
        _ => FetchFailureKind::Other,
    }
}

/// Categorizes a `reqwest::Error` into a `FetchFailureKind`.
///
/// Status codes are checked first, then reqwest's own error classification.
/// Connection failures count as blocked: the page cannot be reached from here,
/// and the HTML-paste mode is the useful fallback.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchFailureKind {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_timeout() {
        FetchFailureKind::Timeout
    } else if error.is_connect() || error.is_request() {
        FetchFailureKind::Blocked
    } else {
        FetchFailureKind::Other
    }
}
