// Shared test helpers for analyzer setup and sample pages.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use seo_calculator::{Analyzer, Config, LogFormat, LogLevel};

/// Config suitable for tests against a local mock server.
#[allow(dead_code)] // Used by other test files
pub fn test_config(timeout_seconds: u64) -> Config {
    Config {
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        timeout_seconds,
        user_agent: "seo_calculator_test/1.0".to_string(),
        // wiremock binds to 127.0.0.1
        allow_private_hosts: true,
        widgets: None,
    }
}

/// Analyzer over `test_config`.
#[allow(dead_code)]
pub fn test_analyzer(timeout_seconds: u64) -> Analyzer {
    Analyzer::new(test_config(timeout_seconds)).expect("Failed to build analyzer")
}

/// A small local-business landing page with most signals present.
#[allow(dead_code)]
pub const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Riverside Physio | Sports Injury Clinic</title>
    <meta name="description" content="Sports injury physiotherapy in Riverside. Same-week appointments, evening slots and direct billing for major insurers.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="canonical" href="/">
    <meta property="og:title" content="Riverside Physio">
    <script type="application/ld+json">{"@context": "https://schema.org", "@type": "MedicalClinic"}</script>
    <script src="https://assets.calendly.com/assets/external/widget.js" async></script>
</head>
<body>
    <h1>Sports Injury Clinic</h1>
    <h2>Do you take insurance?</h2>
    <p>Yes, we bill most major insurers directly.</p>
    <a href="/book-appointment">Book now</a>
</body>
</html>"#;
