//! Recommendation engine.
//!
//! Two independent outputs:
//! - Plays: a short ordered list chosen from intent, constraint and signals
//! - Advice: one human-readable string per factor scoring below threshold

mod advice;

use crate::config::{MAX_PLAYS, RECOMMENDATION_THRESHOLD};
use crate::models::{Constraint, DomSignals, Intent, Play, ScoreResult};

pub use advice::advice_for;

fn is_lead_generation(intent: Intent) -> bool {
    matches!(intent, Intent::LeadGeneration)
}

fn is_conversion(intent: Intent) -> bool {
    matches!(intent, Intent::ConversionIncrease)
}

fn lacks_implementation_capacity(constraint: Option<Constraint>) -> bool {
    matches!(constraint, Some(Constraint::NoDevTime))
}

/// Picks plays for a page.
///
/// `missed_call_booking` is added for lead generation; `faq_widget` for
/// conversion intents or when the page has no schema. Under `no_dev_time`
/// the list is reversed. At most [`MAX_PLAYS`] plays are returned, without
/// duplicates.
pub fn recommend_plays(
    signals: &DomSignals,
    intent: Intent,
    constraint: Option<Constraint>,
) -> Vec<Play> {
    let mut plays: Vec<Play> = Vec::with_capacity(MAX_PLAYS);
    let mut push = |play: Play| {
        if !plays.contains(&play) {
            plays.push(play);
        }
    };

    if is_lead_generation(intent) {
        push(Play::MissedCallBooking);
    }
    if is_conversion(intent) || !signals.has_schema {
        push(Play::FaqWidget);
    }

    // TODO: replace list reversal with an explicit per-play cost model.
    if lacks_implementation_capacity(constraint) {
        plays.reverse();
    }
    plays.truncate(MAX_PLAYS);
    plays
}

/// Advice strings for factors scoring below [`RECOMMENDATION_THRESHOLD`],
/// in factor order.
pub fn recommendations_for(score: &ScoreResult) -> Vec<String> {
    score
        .factors
        .iter()
        .filter(|(_, &value)| value < RECOMMENDATION_THRESHOLD)
        .map(|(&factor, _)| advice_for(factor).to_string())
        .collect()
}
