//! API HTTP handlers.

mod analyze;
mod roi;

pub use analyze::{analyze_get_handler, analyze_html_handler, analyze_post_handler};
pub use roi::{health_handler, roi_handler};
