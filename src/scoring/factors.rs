//! Per-factor scoring rules.
//!
//! Each rule maps `DomSignals` to 0-100 using fixed thresholds.

use crate::models::{DomSignals, Factor};

/// Score given to present-but-oversized or barely-present text.
const LENGTH_FLOOR: u32 = 30;

const TITLE_IDEAL: (usize, usize) = (10, 60);
const TITLE_HARD_MAX: usize = 70;

const META_DESCRIPTION_IDEAL: (usize, usize) = (50, 160);
const META_DESCRIPTION_HARD_MAX: usize = 200;

/// Scores a text length against an ideal range.
///
/// 0 scores 0. Below the range the score rises linearly from the floor;
/// inside it the score is 100; above it the score falls linearly to the floor
/// at `hard_max` and stays there.
pub(crate) fn range_score(len: usize, ideal: (usize, usize), hard_max: usize) -> u8 {
    let (ideal_min, ideal_max) = ideal;
    let (len, min, max, hard) = (len as u64, ideal_min as u64, ideal_max as u64, hard_max as u64);
    let floor = LENGTH_FLOOR as u64;

    let score = if len == 0 {
        0
    } else if len < min {
        floor + (100 - floor) * len / min
    } else if len <= max {
        100
    } else if len >= hard {
        floor
    } else {
        100 - (100 - floor) * (len - max) / (hard - max)
    };
    score.min(100) as u8
}

fn title(signals: &DomSignals) -> u8 {
    range_score(signals.title_length, TITLE_IDEAL, TITLE_HARD_MAX)
}

fn meta_description(signals: &DomSignals) -> u8 {
    if signals.meta_description.is_none() {
        return 0;
    }
    range_score(
        signals.meta_description_length,
        META_DESCRIPTION_IDEAL,
        META_DESCRIPTION_HARD_MAX,
    )
}

fn headings(signals: &DomSignals) -> u8 {
    let h1 = match signals.h1.len() {
        0 => 0,
        1 => 70,
        _ => 40,
    };
    let h2 = if signals.h2.is_empty() { 0 } else { 30 };
    (h1 + h2).min(100)
}

fn canonical(signals: &DomSignals) -> u8 {
    if signals.canonical.is_some() {
        100
    } else {
        0
    }
}

fn structured_data(signals: &DomSignals) -> u8 {
    match (signals.json_ld_count, signals.json_ld_types.is_empty()) {
        (0, _) => 0,
        (_, true) => 70,
        (_, false) => 100,
    }
}

fn mobile_viewport(signals: &DomSignals) -> u8 {
    if signals.viewport_present {
        100
    } else {
        0
    }
}

fn social_tags(signals: &DomSignals) -> u8 {
    let og = signals.open_graph_count.min(4) * 15;
    let twitter = signals.twitter_tag_count.min(2) * 20;
    (og + twitter).min(100) as u8
}

fn indexability(signals: &DomSignals) -> u8 {
    if signals.noindex {
        0
    } else if signals.nofollow {
        50
    } else {
        100
    }
}

fn conversion(signals: &DomSignals) -> u8 {
    let link = if signals.contact_or_booking_link_present { 50 } else { 0 };
    let widget = if signals.detected_widgets.is_empty() { 0 } else { 50 };
    link + widget
}

/// Scores one factor.
pub fn score_factor(factor: Factor, signals: &DomSignals) -> u8 {
    match factor {
        Factor::Title => title(signals),
        Factor::MetaDescription => meta_description(signals),
        Factor::Headings => headings(signals),
        Factor::Canonical => canonical(signals),
        Factor::StructuredData => structured_data(signals),
        Factor::MobileViewport => mobile_viewport(signals),
        Factor::SocialTags => social_tags(signals),
        Factor::Indexability => indexability(signals),
        Factor::Conversion => conversion(signals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_thresholds() {
        assert_eq!(range_score(0, TITLE_IDEAL, TITLE_HARD_MAX), 0);
        assert_eq!(range_score(5, TITLE_IDEAL, TITLE_HARD_MAX), 65);
        assert_eq!(range_score(10, TITLE_IDEAL, TITLE_HARD_MAX), 100);
        assert_eq!(range_score(60, TITLE_IDEAL, TITLE_HARD_MAX), 100);
        assert_eq!(range_score(65, TITLE_IDEAL, TITLE_HARD_MAX), 65);
        assert_eq!(range_score(70, TITLE_IDEAL, TITLE_HARD_MAX), 30);
        assert_eq!(range_score(500, TITLE_IDEAL, TITLE_HARD_MAX), 30);
    }

    #[test]
    fn test_range_score_is_monotonic_up_to_ideal() {
        let mut previous = 0;
        for len in 0..=TITLE_IDEAL.1 {
            let score = range_score(len, TITLE_IDEAL, TITLE_HARD_MAX);
            assert!(score >= previous, "len {len}: {score} < {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_missing_meta_description_scores_zero() {
        let signals = DomSignals::default();
        assert_eq!(score_factor(Factor::MetaDescription, &signals), 0);

        let signals = DomSignals {
            meta_description: Some("x".repeat(120)),
            meta_description_length: 120,
            ..Default::default()
        };
        assert_eq!(score_factor(Factor::MetaDescription, &signals), 100);
    }

    #[test]
    fn test_heading_structure() {
        let one = DomSignals {
            h1: vec!["A".into()],
            h2: vec!["B".into()],
            ..Default::default()
        };
        assert_eq!(score_factor(Factor::Headings, &one), 100);

        let two = DomSignals {
            h1: vec!["A".into(), "B".into()],
            multiple_h1: true,
            ..Default::default()
        };
        assert_eq!(score_factor(Factor::Headings, &two), 40);

        let only_h2 = DomSignals {
            h2: vec!["B".into()],
            ..Default::default()
        };
        assert_eq!(score_factor(Factor::Headings, &only_h2), 30);
    }

    #[test]
    fn test_structured_data_tiers() {
        let mut signals = DomSignals::default();
        assert_eq!(score_factor(Factor::StructuredData, &signals), 0);
        signals.json_ld_count = 1;
        assert_eq!(score_factor(Factor::StructuredData, &signals), 70);
        signals.json_ld_types.insert("Organization".into());
        assert_eq!(score_factor(Factor::StructuredData, &signals), 100);
    }

    #[test]
    fn test_social_tags_cap_at_100() {
        let signals = DomSignals {
            open_graph_count: 12,
            twitter_tag_count: 9,
            ..Default::default()
        };
        assert_eq!(score_factor(Factor::SocialTags, &signals), 100);

        let signals = DomSignals {
            open_graph_count: 2,
            ..Default::default()
        };
        assert_eq!(score_factor(Factor::SocialTags, &signals), 30);
    }

    #[test]
    fn test_indexability() {
        let mut signals = DomSignals::default();
        assert_eq!(score_factor(Factor::Indexability, &signals), 100);
        signals.nofollow = true;
        assert_eq!(score_factor(Factor::Indexability, &signals), 50);
        signals.noindex = true;
        assert_eq!(score_factor(Factor::Indexability, &signals), 0);
    }

    #[test]
    fn test_conversion() {
        let mut signals = DomSignals::default();
        assert_eq!(score_factor(Factor::Conversion, &signals), 0);
        signals.contact_or_booking_link_present = true;
        assert_eq!(score_factor(Factor::Conversion, &signals), 50);
        signals.detected_widgets.insert("calendly".into());
        assert_eq!(score_factor(Factor::Conversion, &signals), 100);
    }
}
