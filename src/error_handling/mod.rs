//! Error handling.
//!
//! This module provides:
//! - The `AnalysisError` taxonomy returned to callers
//! - Initialization error types
//! - Categorization of fetch failures into timeout / blocked / other
//!
//! Extraction and scoring never fail; only URL validation, the fetcher and
//! play lookups produce errors.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_status};
pub use types::{AnalysisError, FetchFailureKind, InitializationError};
