//! Heading extraction.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("h1", "H1_SELECTOR"));
static H2_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("h2", "H2_SELECTOR"));

/// Trimmed text of every element matching `selector`, in document order.
///
/// Duplicates and empty headings are kept: both are structure problems the
/// scorer needs to see.
fn heading_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Text of every `<h1>`, in document order.
pub fn extract_h1(document: &Html) -> Vec<String> {
    heading_texts(document, &H1_SELECTOR)
}

/// Text of every `<h2>`, in document order.
pub fn extract_h2(document: &Html) -> Vec<String> {
    heading_texts(document, &H2_SELECTOR)
}
