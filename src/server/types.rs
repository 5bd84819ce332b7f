//! API request and error types.

use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzeRequest;
use crate::error_handling::AnalysisError;
use crate::models::{Calibration, Constraint, Intent, PageSource, RequestContext};

/// Options shared by every analyze endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeOptions {
    pub intent: Option<String>,
    pub constraint: Option<String>,
    #[serde(default)]
    pub calibration: Calibration,
    pub org_id: Option<String>,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeUrlBody {
    pub url: Option<String>,
    #[serde(flatten)]
    pub options: AnalyzeOptions,
}

/// Query of `GET /api/analyze`. Calibration is not accepted here.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeUrlQuery {
    pub url: Option<String>,
    pub intent: Option<String>,
    pub constraint: Option<String>,
    pub org_id: Option<String>,
}

impl From<AnalyzeUrlQuery> for AnalyzeUrlBody {
    fn from(q: AnalyzeUrlQuery) -> Self {
        Self {
            url: q.url,
            options: AnalyzeOptions {
                intent: q.intent,
                constraint: q.constraint,
                calibration: Calibration::new(),
                org_id: q.org_id,
            },
        }
    }
}

/// Body of `POST /api/analyze-html`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeHtmlBody {
    pub url: Option<String>,
    pub html: Option<String>,
    #[serde(flatten)]
    pub options: AnalyzeOptions,
}

fn parse_id<T: FromStr>(value: Option<&str>, what: &str) -> Result<Option<T>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => T::from_str(v)
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Unknown {what} '{v}'"))),
    }
}

impl AnalyzeOptions {
    /// Validates the options and combines them with `source`.
    pub fn into_request(self, source: PageSource) -> Result<AnalyzeRequest, ApiError> {
        Ok(AnalyzeRequest {
            source,
            intent: parse_id::<Intent>(self.intent.as_deref(), "intent")?,
            constraint: parse_id::<Constraint>(self.constraint.as_deref(), "constraint")?,
            calibration: self.calibration,
            context: RequestContext {
                org_id: self.org_id,
            },
        })
    }
}

/// JSON error body: `{"status", "error", "detail"}` plus optional guidance.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Machine-readable error kind, e.g. `fetch_timeout`
    pub error: String,
    /// Human-readable message
    pub detail: String,
    /// What the caller can do instead, when there is a useful fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, kind: &str, detail: String) -> Self {
        Self {
            status,
            body: ErrorBody {
                status: status.as_u16(),
                error: kind.to_string(),
                detail,
                guidance: None,
            },
        }
    }

    /// Malformed request (bad JSON, unknown intent, missing field).
    pub fn bad_request(detail: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", detail)
    }

    /// Unknown resource.
    pub fn not_found(kind: &str, detail: String) -> Self {
        Self::new(StatusCode::NOT_FOUND, kind, detail)
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut api = Self::new(status, err.kind(), err.to_string());
        api.body.guidance = err.guidance().map(str::to_string);
        api
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::warn!("API error {}: {}", self.status, self.body.detail);
        } else {
            log::debug!("API error {}: {}", self.status, self.body.detail);
        }
        (self.status, Json(self.body)).into_response()
    }
}
