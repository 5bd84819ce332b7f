//! Basic HTML extraction utilities.
//!
//! This module provides functions to extract head-level facts:
//! - Page title
//! - `<meta name=...>` content (description, robots)
//! - Viewport presence
//! - Robots directive flags

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";
const NAMED_META_SELECTOR_STR: &str = "meta[name]";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(TITLE_SELECTOR_STR, "TITLE_SELECTOR"));

static NAMED_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(NAMED_META_SELECTOR_STR, "NAMED_META_SELECTOR"));

/// Extracts the page title from an HTML document.
///
/// Returns the text content of the first `<title>` element, trimmed of
/// whitespace, or an empty string if the document has no title.
pub fn extract_title(document: &Html) -> String {
    match document.select(&TITLE_SELECTOR).next() {
        Some(element) => {
            let title = element.text().collect::<String>().trim().to_string();
            log::debug!("Extracted title text: '{}' (length: {})", title, title.len());
            title
        }
        None => {
            log::debug!("No title element found in document");
            String::new()
        }
    }
}

/// Iterates `<meta>` elements whose `name` attribute equals `name`,
/// compared ASCII case-insensitively.
pub(crate) fn named_meta<'a>(
    document: &'a Html,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    document.select(&NAMED_META_SELECTOR).filter(move |element| {
        element
            .value()
            .attr("name")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(name))
    })
}

/// Returns the `content` attribute of the first `<meta name="{name}">`.
///
/// The first matching element decides: if it has no `content`, the result is
/// `None` even when a later duplicate carries one.
pub fn extract_meta_content(document: &Html, name: &str) -> Option<String> {
    named_meta(document, name)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Extracts the meta description (`<meta name="description">`), verbatim.
pub fn extract_meta_description(document: &Html) -> Option<String> {
    extract_meta_content(document, "description")
}

/// Extracts the robots directive (`<meta name="robots">`), verbatim.
pub fn extract_robots_directive(document: &Html) -> Option<String> {
    extract_meta_content(document, "robots")
}

/// Derives `(noindex, nofollow)` from a robots directive.
///
/// Both flags are `false` when there is no directive.
pub fn robots_flags(directive: Option<&str>) -> (bool, bool) {
    match directive {
        Some(directive) => {
            let lowered = directive.to_ascii_lowercase();
            (lowered.contains("noindex"), lowered.contains("nofollow"))
        }
        None => (false, false),
    }
}

/// Checks for a `<meta name="viewport">` element.
///
/// Unlike a raw substring search this ignores the word "viewport" in body text
/// or scripts.
pub fn has_viewport(document: &Html) -> bool {
    named_meta(document, "viewport").next().is_some()
}
