//! Page scoring.
//!
//! `score_signals` is a pure function of `DomSignals`: every factor in
//! [`Factor`] is scored independently on 0-100 and `total` is the rounded mean.

mod factors;

use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::models::{DomSignals, Factor, ScoreResult};

pub use factors::score_factor;

/// Scores a page's signals.
///
/// Every factor is always present in the breakdown.
pub fn score_signals(signals: &DomSignals) -> ScoreResult {
    let factors: BTreeMap<Factor, u8> = Factor::iter()
        .map(|factor| (factor, score_factor(factor, signals)))
        .collect();

    let sum: u32 = factors.values().map(|&s| u32::from(s)).sum();
    let count = factors.len() as u32;
    // Integer round-half-up of sum / count.
    let total = ((2 * sum + count) / (2 * count)).min(100) as u8;

    log::debug!("Scored page: total={} factors={:?}", total, factors);
    ScoreResult { total, factors }
}
