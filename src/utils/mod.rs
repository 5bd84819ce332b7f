//! Shared helpers.
//!
//! - CSS selector parsing for the static selectors used by the extractors

mod selector;

pub use selector::parse_selector_unsafe;
