//! Link-derived signals.
//!
//! This module inspects `<link>` and `<a>` elements for:
//! - The canonical URL
//! - Sitemap references
//! - Contact / booking / call-to-action links

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::utils::parse_selector_unsafe;

const LINK_REL_SELECTOR_STR: &str = "link[rel]";
const ANCHOR_SELECTOR_STR: &str = "a[href]";

/// Substrings of an anchor `href` that mark a contact or booking path.
const CONTACT_HREF_MARKERS: &[&str] = &["contact", "book", "call"];

static LINK_REL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(LINK_REL_SELECTOR_STR, "LINK_REL_SELECTOR"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(ANCHOR_SELECTOR_STR, "ANCHOR_SELECTOR"));

/// Extracts the `href` of the first `<link rel="canonical">`.
///
/// `rel` is a space-separated token list, so `rel="Canonical alternate"` also
/// counts. Links without an `href` are skipped.
pub fn extract_canonical(document: &Html) -> Option<String> {
    document
        .select(&LINK_REL_SELECTOR)
        .filter(|element| {
            element.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .find_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
}

/// Resolves a canonical `href` against the page URL.
///
/// Returns `None` when either side is missing or the result is not a valid URL.
pub fn resolve_canonical(canonical: Option<&str>, base_url: Option<&str>) -> Option<String> {
    let canonical = canonical?;
    if let Ok(absolute) = Url::parse(canonical) {
        return Some(absolute.to_string());
    }
    let base = Url::parse(base_url?).ok()?;
    base.join(canonical).ok().map(|resolved| resolved.to_string())
}

fn anchor_hrefs(document: &Html) -> impl Iterator<Item = &str> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
}

/// Detects a sitemap reference: an anchor whose `href` contains "sitemap",
/// or the literal "sitemap.xml" anywhere in the raw markup.
pub fn has_sitemap(document: &Html, html: &str) -> bool {
    html.contains("sitemap.xml") || anchor_hrefs(document).any(|href| href.contains("sitemap"))
}

/// Detects an anchor whose `href` references contact, booking, or calling.
pub fn has_contact_or_booking_link(document: &Html) -> bool {
    anchor_hrefs(document).any(|href| {
        CONTACT_HREF_MARKERS
            .iter()
            .any(|marker| href.contains(marker))
    })
}
