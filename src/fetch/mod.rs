//! Page fetching.
//!
//! One bounded GET per analysis: redirects are followed by the client, the
//! whole exchange (connect, redirects, body) runs under the fetch budget, and
//! nothing is retried. Failures are classified into timeout / blocked / other.

mod body;

use std::time::Duration;

use log::{debug, warn};
use url::Url;

use crate::config::{Config, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{
    categorize_reqwest_error, categorize_status, AnalysisError, InitializationError,
};
use crate::initialization::init_client;
use crate::security::refused_host;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Response body, decoded as UTF-8 (lossy)
    pub html: String,
    /// URL after following redirects
    pub final_url: String,
    /// Status of the final response (always 2xx)
    pub http_status: u16,
    /// Whether the body was cut at the size limit
    pub truncated: bool,
}

/// Fetches pages with a shared client and a fixed budget.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    budget: Duration,
}

impl PageFetcher {
    /// Builds a fetcher from the library config.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self {
            client: init_client(config)?,
            budget: config.fetch_timeout(),
        })
    }

    /// The configured fetch budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Fetches `url` once.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` when the host resolves only to internal addresses and
    ///   private hosts are not allowed
    /// - `FetchTimeout` when the budget elapses (the request is dropped)
    /// - `FetchBlocked` on 502/504 or when the host cannot be reached
    /// - `FetchError` on any other non-2xx status or transport failure
    pub async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, AnalysisError> {
        match tokio::time::timeout(self.budget, self.fetch_once(url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Fetch of {} exceeded {:?} budget", url, self.budget);
                Err(AnalysisError::FetchTimeout {
                    budget_secs: self.budget.as_secs(),
                })
            }
        }
    }

    async fn fetch_once(&self, url: &Url) -> Result<FetchedPage, AnalysisError> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.to_analysis_error(&e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        if final_url != url.as_str() {
            debug!("Followed redirects: {} -> {}", url, final_url);
        }

        if !status.is_success() {
            let code = status.as_u16();
            return Err(AnalysisError::from_fetch_failure(
                categorize_status(code),
                Some(code),
                format!("{final_url} responded {status}"),
                self.budget.as_secs(),
            ));
        }

        if let Some(ct) = response.headers().get(reqwest::header::CONTENT_TYPE) {
            let ct = ct.to_str().unwrap_or("").to_ascii_lowercase();
            if !ct.contains("html") {
                debug!("Non-HTML content-type for {}: {}, analyzing anyway", final_url, ct);
            }
        }

        let (html, truncated) = body::read_body_capped(response)
            .await
            .map_err(|e| self.to_analysis_error(&e))?;
        if truncated {
            warn!(
                "Response body for {} exceeded {} bytes; analyzing the truncated prefix",
                final_url, MAX_RESPONSE_BODY_SIZE
            );
        }
        debug!("Body length for {}: {} bytes", final_url, html.len());

        Ok(FetchedPage {
            html,
            final_url,
            http_status: status.as_u16(),
            truncated,
        })
    }

    fn to_analysis_error(&self, error: &reqwest::Error) -> AnalysisError {
        if let Some(refused) = refused_host(error) {
            debug!("Fetch refused by resolver: {}", refused);
            return AnalysisError::InvalidUrl(format!(
                "Refusing to fetch internal host '{}'",
                refused.host
            ));
        }
        let kind = categorize_reqwest_error(error);
        debug!("Fetch failed ({:?}): {}", kind, error);
        AnalysisError::from_fetch_failure(
            kind,
            error.status().map(|s| s.as_u16()),
            error.to_string(),
            self.budget.as_secs(),
        )
    }
}
