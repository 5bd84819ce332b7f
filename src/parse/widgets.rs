//! Third-party widget detection.
//!
//! Widgets (live chat, scheduling) are recognised by matching script sources
//! and inline script bodies against a versioned pattern table. The table is
//! data: the built-in one ships as `widgets.json`, and callers may load their
//! own with [`WidgetTable::from_json`].

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::utils::parse_selector_unsafe;

const BUILTIN_TABLE: &str = include_str!("widgets.json");

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script", "SCRIPT_SELECTOR"));

static BUILTIN: LazyLock<WidgetTable> = LazyLock::new(|| {
    WidgetTable::from_json(BUILTIN_TABLE)
        .unwrap_or_else(|e| panic!("Built-in widget table is invalid: {e:#}. This is a programming error."))
});

/// A pattern entry is either a single pattern or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    fn into_vec(self) -> Vec<String> {
        match self {
            PatternList::One(p) => vec![p],
            PatternList::Many(ps) => ps,
        }
    }
}

#[derive(Deserialize)]
struct RawTable {
    version: String,
    widgets: BTreeMap<String, PatternList>,
}

/// One named widget and the patterns that identify it.
#[derive(Debug, Clone)]
pub struct WidgetRule {
    /// Widget name reported in `DomSignals::detected_widgets`
    pub name: String,
    /// Case-insensitive patterns; any match identifies the widget
    pub patterns: Vec<Regex>,
}

impl WidgetRule {
    fn matches(&self, source: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(source))
    }
}

/// A versioned name→patterns table.
#[derive(Debug, Clone)]
pub struct WidgetTable {
    /// Version string from the table file
    pub version: String,
    /// Rules in name order
    pub rules: Vec<WidgetRule>,
}

impl WidgetTable {
    /// The table compiled into the crate.
    pub fn builtin() -> &'static WidgetTable {
        &BUILTIN
    }

    /// Loads a table from its JSON form:
    /// `{"version": "1", "widgets": {"name": ["pattern", ...]}}`.
    ///
    /// Fails if the JSON is malformed or any pattern is not a valid regex.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json).context("Failed to parse widget table")?;

        let mut rules = Vec::with_capacity(raw.widgets.len());
        for (name, patterns) in raw.widgets {
            let patterns = patterns
                .into_vec()
                .iter()
                .map(|p| {
                    RegexBuilder::new(p)
                        .case_insensitive(true)
                        .build()
                        .with_context(|| format!("Invalid pattern {p:?} for widget '{name}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            rules.push(WidgetRule { name, patterns });
        }

        Ok(Self {
            version: raw.version,
            rules,
        })
    }

    /// Names of every widget matched by at least one of `sources`.
    pub fn detect<'a, I>(&self, sources: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sources: Vec<&str> = sources.into_iter().collect();
        self.rules
            .iter()
            .filter(|rule| sources.iter().any(|s| rule.matches(s)))
            .map(|rule| rule.name.clone())
            .collect()
    }
}

/// Script `src` attributes and inline script bodies, in document order.
pub(crate) fn script_sources(document: &Html) -> Vec<String> {
    let mut sources = Vec::new();
    for script in document.select(&SCRIPT_SELECTOR) {
        if let Some(src) = script.value().attr("src") {
            sources.push(src.to_string());
        }
        let body: String = script.text().collect();
        if !body.trim().is_empty() {
            sources.push(body);
        }
    }
    sources
}

/// Detects widgets in `document` using `table`.
pub fn detect_widgets(document: &Html, table: &WidgetTable) -> BTreeSet<String> {
    let sources = script_sources(document);
    let detected = table.detect(sources.iter().map(String::as_str));
    if !detected.is_empty() {
        log::debug!("Detected widgets: {:?}", detected);
    }
    detected
}
