//! ROI and health handlers.

use std::collections::BTreeMap;

use axum::extract::{Path, Query};
use axum::Json;
use serde_json::{json, Value};

use crate::config::{CALIBRATION_MISSED_CALLS, CALIBRATION_SESSIONS};
use crate::error_handling::AnalysisError;
use crate::models::{Calibration, RoiRange};
use crate::roi::estimate_roi_by_id;

use super::super::types::ApiError;

/// Query parameters read as calibration inputs; anything else is ignored.
const CALIBRATION_KEYS: [&str; 2] = [CALIBRATION_MISSED_CALLS, CALIBRATION_SESSIONS];

/// Parses the calibration inputs out of the query parameters.
///
/// Unrelated parameters (tracking tags and the like) are skipped; a known
/// key with a non-numeric value is a bad request.
fn calibration_from_query(params: BTreeMap<String, String>) -> Result<Calibration, ApiError> {
    params
        .into_iter()
        .filter(|(key, _)| CALIBRATION_KEYS.contains(&key.as_str()))
        .map(|(key, raw)| match raw.trim().parse::<f64>() {
            Ok(value) => Ok((key, value)),
            Err(_) => Err(ApiError::bad_request(format!(
                "Calibration '{key}' must be a number, got '{raw}'"
            ))),
        })
        .collect()
}

/// `GET /api/roi/:play?key=value...`
pub async fn roi_handler(
    Path(play): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<RoiRange>, ApiError> {
    let calibration = calibration_from_query(params)?;
    match estimate_roi_by_id(&play, &calibration) {
        Ok(range) => Ok(Json(range)),
        Err(err @ AnalysisError::UnknownPlay(_)) => {
            Err(ApiError::not_found(err.kind(), err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_calibration_from_query() {
        let params = BTreeMap::from([
            ("missed_calls_per_week".to_string(), " 80 ".to_string()),
            ("sessions_on_pages_per_week".to_string(), "1e3".to_string()),
        ]);
        let calibration = calibration_from_query(params).unwrap();
        assert_eq!(calibration["missed_calls_per_week"], 80.0);
        assert_eq!(calibration["sessions_on_pages_per_week"], 1000.0);
    }

    #[test]
    fn test_non_numeric_calibration_is_rejected() {
        let params = BTreeMap::from([("missed_calls_per_week".to_string(), "lots".to_string())]);
        let err = calibration_from_query(params).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unrelated_query_parameters_are_ignored() {
        let params = BTreeMap::from([
            ("utm_source".to_string(), "newsletter".to_string()),
            ("ref".to_string(), "42".to_string()),
            ("missed_calls_per_week".to_string(), "100".to_string()),
        ]);
        let calibration = calibration_from_query(params).unwrap();
        assert_eq!(calibration.len(), 1);
        assert_eq!(calibration["missed_calls_per_week"], 100.0);
    }

    #[tokio::test]
    async fn test_tracking_parameters_do_not_break_roi() {
        let params = BTreeMap::from([("utm_source".to_string(), "x".to_string())]);
        let Json(range) = roi_handler(Path("faq_widget".to_string()), Query(params))
            .await
            .unwrap();
        assert_eq!((range.low, range.likely, range.high), (0.3, 0.6, 1.08));
    }

    #[tokio::test]
    async fn test_unknown_play_is_not_found() {
        let err = roi_handler(Path("free_lunch".to_string()), Query(BTreeMap::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body.error, "unknown_play");
    }

    #[tokio::test]
    async fn test_known_play_returns_range() {
        let Json(range) = roi_handler(Path("missed_call_booking".to_string()), Query(BTreeMap::new()))
            .await
            .unwrap();
        assert_eq!((range.low, range.likely, range.high), (4.0, 7.0, 12.0));
    }
}
