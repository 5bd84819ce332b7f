//! HTTP client initialization.
//!
//! This module builds the single `reqwest::Client` used by the fetcher.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::{Attempt, Policy};
use reqwest::ClientBuilder;

use crate::config::{Config, MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use crate::security::{is_internal_host, SafeResolver};

/// Redirect policy: at most [`MAX_REDIRECT_HOPS`] hops, and unless private
/// hosts are allowed, no hop into an internal address.
fn redirect_policy(allow_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt: Attempt| {
        if attempt.previous().len() > MAX_REDIRECT_HOPS {
            attempt.error(format!("too many redirects (limit {MAX_REDIRECT_HOPS})"))
        } else if !allow_private_hosts && is_internal_host(attempt.url()) {
            let target = attempt.url().to_string();
            attempt.error(format!("redirect to internal host refused: {target}"))
        } else {
            attempt.follow()
        }
    })
}

/// Initializes the HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Overall timeout equal to the fetch budget, and a short connect timeout
/// - Redirect following (up to 10 hops, internal hosts refused)
/// - Unless private hosts are allowed, DNS through [`SafeResolver`], which
///   refuses names that resolve only to internal addresses
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let mut builder = ClientBuilder::new()
        .timeout(config.fetch_timeout())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(config.fetch_timeout()))
        .user_agent(config.user_agent.clone())
        .redirect(redirect_policy(config.allow_private_hosts));
    if !config.allow_private_hosts {
        builder = builder.dns_resolver(Arc::new(SafeResolver));
    }
    Ok(builder.build()?)
}
