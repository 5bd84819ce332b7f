//! ROI estimation.
//!
//! Maps a play plus caller calibration to a `{low, likely, high}` weekly range.

use std::str::FromStr;

use crate::config::{
    CALIBRATION_MISSED_CALLS, CALIBRATION_SESSIONS, DEFAULT_MISSED_CALLS_PER_WEEK,
    DEFAULT_SESSIONS_PER_WEEK,
};
use crate::error_handling::AnalysisError;
use crate::models::{Calibration, Play, RoiRange};

const MISSED_CALL_RATES: [f64; 3] = [0.10, 0.18, 0.30];
const FAQ_RATES: [f64; 3] = [0.0005, 0.001, 0.0018];

/// Reads a calibration value, falling back to `default` when absent.
///
/// Non-finite values use the default and negative values clamp to zero.
fn calibration_value(calibration: &Calibration, key: &str, default: f64) -> f64 {
    match calibration.get(key) {
        None => default,
        Some(v) if !v.is_finite() => {
            log::warn!("Calibration '{}' is not finite ({}); using default {}", key, v, default);
            default
        }
        Some(v) if *v < 0.0 => {
            log::warn!("Calibration '{}' is negative ({}); clamping to 0", key, v);
            0.0
        }
        Some(v) => *v,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn scaled(x: f64, rates: [f64; 3], decimals: i32) -> RoiRange {
    let [low, likely, high] = rates.map(|rate| round_to(x * rate, decimals));
    RoiRange { low, likely, high }
}

/// Estimates the weekly impact of `play`.
///
/// - `missed_call_booking`: `missed_calls_per_week` (default 40) × 10/18/30%,
///   rounded to whole bookings
/// - `faq_widget`: `sessions_on_pages_per_week` (default 600) ×
///   0.05/0.1/0.18%, rounded to two decimals
pub fn estimate_roi(play: Play, calibration: &Calibration) -> RoiRange {
    match play {
        Play::MissedCallBooking => {
            let x = calibration_value(
                calibration,
                CALIBRATION_MISSED_CALLS,
                DEFAULT_MISSED_CALLS_PER_WEEK,
            );
            scaled(x, MISSED_CALL_RATES, 0)
        }
        Play::FaqWidget => {
            let x = calibration_value(calibration, CALIBRATION_SESSIONS, DEFAULT_SESSIONS_PER_WEEK);
            scaled(x, FAQ_RATES, 2)
        }
    }
}

/// Estimates ROI for a play given by its identifier.
///
/// # Errors
///
/// Returns `AnalysisError::UnknownPlay` if `play_id` names no play.
pub fn estimate_roi_by_id(play_id: &str, calibration: &Calibration) -> Result<RoiRange, AnalysisError> {
    let play =
        Play::from_str(play_id).map_err(|_| AnalysisError::UnknownPlay(play_id.to_string()))?;
    Ok(estimate_roi(play, calibration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn calibration(key: &str, value: f64) -> Calibration {
        Calibration::from([(key.to_string(), value)])
    }

    #[test]
    fn test_missed_call_default() {
        let roi = estimate_roi(Play::MissedCallBooking, &Calibration::new());
        assert_eq!(
            roi,
            RoiRange {
                low: 4.0,
                likely: 7.0,
                high: 12.0
            }
        );
    }

    #[test]
    fn test_missed_call_explicit_forty_matches_default() {
        let roi = estimate_roi(
            Play::MissedCallBooking,
            &calibration("missed_calls_per_week", 40.0),
        );
        assert_eq!(roi, estimate_roi(Play::MissedCallBooking, &Calibration::new()));
    }

    #[test]
    fn test_missed_call_calibrated() {
        let roi = estimate_roi(
            Play::MissedCallBooking,
            &calibration("missed_calls_per_week", 100.0),
        );
        assert_eq!((roi.low, roi.likely, roi.high), (10.0, 18.0, 30.0));
    }

    #[test]
    fn test_faq_widget_default() {
        let roi = estimate_roi(Play::FaqWidget, &Calibration::new());
        assert_eq!((roi.low, roi.likely, roi.high), (0.3, 0.6, 1.08));
    }

    #[test]
    fn test_faq_widget_rounds_to_two_decimals() {
        let roi = estimate_roi(
            Play::FaqWidget,
            &calibration("sessions_on_pages_per_week", 1234.0),
        );
        // 0.617, 1.234, 2.2212
        assert_eq!((roi.low, roi.likely, roi.high), (0.62, 1.23, 2.22));
    }

    #[test]
    fn test_unrelated_calibration_keys_are_ignored() {
        let roi = estimate_roi(Play::FaqWidget, &calibration("missed_calls_per_week", 9.0));
        assert_eq!(roi, estimate_roi(Play::FaqWidget, &Calibration::new()));
    }

    #[test]
    fn test_negative_calibration_clamps_to_zero() {
        let roi = estimate_roi(
            Play::MissedCallBooking,
            &calibration("missed_calls_per_week", -50.0),
        );
        assert_eq!((roi.low, roi.likely, roi.high), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_non_finite_calibration_uses_default() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let roi = estimate_roi(
                Play::MissedCallBooking,
                &calibration("missed_calls_per_week", value),
            );
            assert_eq!(roi.likely, 7.0);
        }
    }

    #[test]
    fn test_unknown_play_is_an_error() {
        let err = estimate_roi_by_id("free_lunch", &Calibration::new()).unwrap_err();
        assert_eq!(err, AnalysisError::UnknownPlay("free_lunch".to_string()));
    }

    #[test]
    fn test_known_play_by_id() {
        let roi = estimate_roi_by_id("missed_call_booking", &Calibration::new()).unwrap();
        assert_eq!(roi.high, 12.0);
    }

    #[test]
    fn test_ranges_are_ordered_and_non_negative() {
        for play in Play::iter() {
            for x in (0..=2000).step_by(7).map(f64::from).chain([0.5, 1e9]) {
                let cal = Calibration::from([
                    ("missed_calls_per_week".to_string(), x),
                    ("sessions_on_pages_per_week".to_string(), x),
                ]);
                let roi = estimate_roi(play, &cal);
                assert!(roi.low >= 0.0, "{play} x={x}: {roi:?}");
                assert!(roi.low <= roi.likely, "{play} x={x}: {roi:?}");
                assert!(roi.likely <= roi.high, "{play} x={x}: {roi:?}");
            }
        }
    }
}
