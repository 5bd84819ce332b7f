//! HTML parsing and signal extraction.
//!
//! This module turns raw markup into a `DomSignals` record:
//! - Title, meta description, robots and viewport meta tags
//! - Heading structure (h1/h2)
//! - Canonical link, sitemap and contact/booking hints
//! - Structured data (JSON-LD) and social tags (Open Graph, Twitter Cards)
//! - Third-party widgets, matched against a data-driven pattern table
//! - FAQ candidates (heading/answer pairs)
//!
//! All parsing is done using CSS selectors via the `scraper` crate. Extraction
//! never fails: malformed or partial markup yields empty fields.

mod faq;
mod headings;
mod html;
mod links;
mod structured;
mod widgets;

use scraper::Html;

use crate::models::DomSignals;

// Re-export public API
pub use faq::extract_faq;
pub use headings::{extract_h1, extract_h2};
pub use html::{
    extract_meta_content, extract_meta_description, extract_robots_directive, extract_title,
    has_viewport, robots_flags,
};
pub use links::{extract_canonical, has_contact_or_booking_link, has_sitemap, resolve_canonical};
pub use structured::{extract_structured_data, StructuredData};
pub use widgets::{detect_widgets, WidgetRule, WidgetTable};

/// Extracts signals using the built-in widget table.
///
/// `base_url` is only used to resolve the canonical link; fetch metadata
/// (`final_url`, `http_status`) is left unset.
pub fn extract_signals(html: &str, base_url: Option<&str>) -> DomSignals {
    extract_signals_with(html, base_url, WidgetTable::builtin())
}

/// Extracts signals using a caller-supplied widget table.
pub fn extract_signals_with(html: &str, base_url: Option<&str>, widgets: &WidgetTable) -> DomSignals {
    let document = Html::parse_document(html);
    signals_from_document(&document, html, base_url, widgets)
}

pub(crate) fn signals_from_document(
    document: &Html,
    raw_html: &str,
    base_url: Option<&str>,
    widgets: &WidgetTable,
) -> DomSignals {
    let title = extract_title(document);
    let meta_description = extract_meta_description(document);
    let robots_directive = extract_robots_directive(document);
    let (noindex, nofollow) = robots_flags(robots_directive.as_deref());
    let h1 = extract_h1(document);
    let h2 = extract_h2(document);
    let canonical = extract_canonical(document);
    let canonical_resolved = resolve_canonical(canonical.as_deref(), base_url);
    let structured = extract_structured_data(document);

    DomSignals {
        title_length: title.chars().count(),
        title,
        meta_description_length: meta_description
            .as_deref()
            .map_or(0, |d| d.chars().count()),
        meta_description,
        multiple_h1: h1.len() > 1,
        h1,
        h2,
        canonical,
        canonical_resolved,
        robots_directive,
        noindex,
        nofollow,
        viewport_present: has_viewport(document),
        open_graph_count: structured.open_graph_count,
        twitter_tag_count: structured.twitter_tag_count,
        has_schema: structured.json_ld_count > 0,
        json_ld_count: structured.json_ld_count,
        json_ld_types: structured.json_ld_types,
        has_sitemap: has_sitemap(document, raw_html),
        contact_or_booking_link_present: has_contact_or_booking_link(document),
        detected_widgets: detect_widgets(document, widgets),
        final_url: None,
        http_status: None,
    }
}
