//! FAQ candidate extraction.
//!
//! Pairs each `h2`/`h3` heading with the first following sibling paragraph or
//! list that has text. The pairs seed the on-page Q&A play.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::models::FaqPair;
use crate::utils::parse_selector_unsafe;

static QUESTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("h2, h3", "QUESTION_SELECTOR"));

const ANSWER_TAGS: [&str; 3] = ["p", "ul", "ol"];

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts question/answer pairs in document order.
///
/// Headings with no text, or with no qualifying sibling after them, are
/// skipped.
pub fn extract_faq(document: &Html) -> Vec<FaqPair> {
    document
        .select(&QUESTION_SELECTOR)
        .filter_map(|heading| {
            let question = element_text(heading);
            if question.is_empty() {
                return None;
            }
            let answer = heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .filter(|sibling| ANSWER_TAGS.contains(&sibling.value().name()))
                .map(element_text)
                .find(|text| !text.is_empty())?;
            Some(FaqPair { question, answer })
        })
        .collect()
}
