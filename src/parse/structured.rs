//! Structured data extraction.
//!
//! This module extracts structured data signals from HTML documents:
//! - JSON-LD blocks (application/ld+json) and their Schema.org `@type`s
//! - Open Graph meta tags (og:*)
//! - Twitter Card meta tags (twitter:*)

use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

const JSON_LD_MIME: &str = "application/ld+json";

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script[type]", "SCRIPT_SELECTOR"));
static PROPERTY_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[property]", "PROPERTY_META_SELECTOR"));
static NAMED_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta[name]", "NAMED_META_SELECTOR"));

/// Structured data signals extracted from HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredData {
    /// Number of JSON-LD script blocks, parseable or not
    pub json_ld_count: usize,
    /// Schema.org types declared by the parseable blocks
    pub json_ld_types: BTreeSet<String>,
    /// Number of `<meta property="og:*">` elements
    pub open_graph_count: usize,
    /// Number of `<meta name="twitter:*">` elements
    pub twitter_tag_count: usize,
}

/// Extracts structured data signals from an HTML document.
///
/// A malformed JSON-LD body still counts as a block; it just contributes no
/// types.
pub fn extract_structured_data(document: &Html) -> StructuredData {
    let blocks = json_ld_blocks(document);

    let mut json_ld_types = BTreeSet::new();
    for block in &blocks {
        match serde_json::from_str::<Value>(block.trim()) {
            Ok(value) => collect_types(&value, &mut json_ld_types),
            Err(e) => log::debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }

    StructuredData {
        json_ld_count: blocks.len(),
        json_ld_types,
        open_graph_count: count_open_graph(document),
        twitter_tag_count: count_twitter_cards(document),
    }
}

/// Raw bodies of every `<script type="application/ld+json">`.
///
/// The type is matched after trimming and lowercasing, and a trailing
/// parameter such as `; charset=utf-8` is tolerated.
fn json_ld_blocks(document: &Html) -> Vec<String> {
    document
        .select(&SCRIPT_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().to_ascii_lowercase().starts_with(JSON_LD_MIME))
        })
        .map(|element| element.text().collect::<String>())
        .collect()
}

/// Collects `@type` values from a JSON-LD document.
///
/// Looks at top-level objects, top-level arrays of objects, and `@graph`
/// members. `@type` may be a string or an array of strings.
fn collect_types(value: &Value, types: &mut BTreeSet<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_types(item, types);
            }
        }
        Value::Object(obj) => {
            match obj.get("@type") {
                Some(Value::String(t)) => insert_type(t, types),
                Some(Value::Array(ts)) => {
                    for t in ts.iter().filter_map(Value::as_str) {
                        insert_type(t, types);
                    }
                }
                _ => {}
            }
            if let Some(graph) = obj.get("@graph") {
                collect_types(graph, types);
            }
        }
        _ => {}
    }
}

fn insert_type(t: &str, types: &mut BTreeSet<String>) {
    let t = t.trim();
    if !t.is_empty() {
        types.insert(t.to_string());
    }
}

/// Counts `<meta property="og:*">` elements.
fn count_open_graph(document: &Html) -> usize {
    document
        .select(&PROPERTY_META_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("property")
                .is_some_and(|p| p.trim().to_ascii_lowercase().starts_with("og:"))
        })
        .count()
}

/// Counts `<meta name="twitter:*">` elements.
fn count_twitter_cards(document: &Html) -> usize {
    document
        .select(&NAMED_META_SELECTOR)
        .filter(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|n| n.trim().to_ascii_lowercase().starts_with("twitter:"))
        })
        .count()
}
