//! seo_calculator library: page SEO scoring and remediation plays
//!
//! This library turns a web page, fetched by URL or supplied as raw markup,
//! into a fixed set of SEO/technical signals, a 0-100 score with a per-factor
//! breakdown, human-readable recommendations, and (when an intent is declared)
//! a short list of remediation plays with weekly ROI ranges.
//!
//! # Example
//!
//! ```no_run
//! use seo_calculator::{AnalyzeRequest, Analyzer, Config, Intent, PageSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::new(Config::default())?;
//!
//! let mut request = AnalyzeRequest::new(PageSource::Html {
//!     html: "<title>Emergency Plumber in Leeds</title>".to_string(),
//!     url: Some("https://flowfix.example/".to_string()),
//! });
//! request.intent = Some(Intent::LeadGeneration);
//!
//! let result = analyzer.analyze(request).await?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! Extraction, scoring and ROI estimation are pure functions and can also be
//! used on their own:
//!
//! ```
//! use seo_calculator::{extract_signals, score_signals};
//!
//! let signals = extract_signals("<h1>One</h1><h1>Two</h1>", None);
//! assert!(signals.multiple_h1);
//! assert!(score_signals(&signals).total <= 100);
//! ```
//!
//! # Requirements
//!
//! Fetching and the HTTP API require a Tokio runtime.

#![warn(missing_docs)]

mod analysis;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod models;
mod parse;
mod recommend;
mod roi;
mod scoring;
mod security;
mod server;
mod utils;

// Re-export public API
pub use analysis::{AnalyzeRequest, Analyzer};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{AnalysisError, FetchFailureKind, InitializationError};
pub use fetch::{FetchedPage, PageFetcher};
pub use models::{
    AnalysisResult, Calibration, Constraint, DomSignals, Factor, FaqPair, Intent, PageSource,
    Play, PlayEstimate, RequestContext, RoiRange, ScoreResult,
};
pub use parse::{extract_faq, extract_signals, extract_signals_with, WidgetRule, WidgetTable};
pub use recommend::{advice_for, recommend_plays, recommendations_for};
pub use roi::{estimate_roi, estimate_roi_by_id};
pub use scoring::{score_factor, score_signals};
pub use security::validate_target_url;
pub use server::{build_router, serve, start_server, ErrorBody};
