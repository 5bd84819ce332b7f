//! URL-mode tests against a local mock server.
//!
//! Covers redirects, status classification, the private-host guard, body
//! truncation and the fetch budget.

mod helpers;

use std::time::Duration;

use helpers::{test_analyzer, test_config, LANDING_PAGE};
use seo_calculator::config::MAX_RESPONSE_BODY_SIZE;
use seo_calculator::{AnalysisError, AnalyzeRequest, Analyzer, Config, PageFetcher, PageSource};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url_request(url: &str) -> AnalyzeRequest {
    AnalyzeRequest::new(PageSource::Url(url.to_string()))
}

fn html_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

#[tokio::test]
async fn test_fetched_page_records_final_url_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(html_response(200, LANDING_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/services", server.uri());
    let result = test_analyzer(5).analyze(url_request(&url)).await.unwrap();

    assert_eq!(result.signals.final_url.as_deref(), Some(url.as_str()));
    assert_eq!(result.signals.http_status, Some(200));
    assert_eq!(result.signals.title, "Riverside Physio | Sports Injury Clinic");
    // Relative canonical resolved against the fetched URL
    assert_eq!(
        result.signals.canonical_resolved,
        Some(format!("{}/", server.uri()))
    );
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let server = MockServer::start().await;
    let final_url = format!("{}/new-home", server.uri());
    Mock::given(method("GET"))
        .and(path("/old-home"))
        .respond_with(ResponseTemplate::new(301).append_header("Location", final_url.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new-home"))
        .respond_with(html_response(200, "<title>Moved permanently here</title>"))
        .mount(&server)
        .await;

    let result = test_analyzer(5)
        .analyze(url_request(&format!("{}/old-home", server.uri())))
        .await
        .unwrap();

    assert_eq!(result.signals.final_url.as_deref(), Some(final_url.as_str()));
    assert_eq!(result.signals.http_status, Some(200));
    assert_eq!(result.signals.title, "Moved permanently here");
}

#[tokio::test]
async fn test_not_found_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(404, "<title>Not Found</title>"))
        .mount(&server)
        .await;

    let err = test_analyzer(5)
        .analyze(url_request(&format!("{}/missing", server.uri())))
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalysisError::FetchError { status: Some(404), .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.http_status(), 500);
}

#[tokio::test]
async fn test_forbidden_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = test_analyzer(5)
        .analyze(url_request(&server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::FetchError { status: Some(403), .. }));
}

#[tokio::test]
async fn test_bad_gateway_is_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_analyzer(5)
        .analyze(url_request(&server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, AnalysisError::FetchBlocked { status: Some(502), .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(err.http_status(), 502);
    assert!(err.guidance().is_some());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(200, LANDING_PAGE).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let started = std::time::Instant::now();
    let err = test_analyzer(1)
        .analyze(url_request(&server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::FetchTimeout { budget_secs: 1 });
    assert_eq!(err.http_status(), 504);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_private_host_refused_without_opt_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(200, LANDING_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(Config {
        allow_private_hosts: false,
        ..test_config(5)
    })
    .unwrap();
    let err = analyzer.analyze(url_request(&server.uri())).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidUrl(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_hostname_resolving_to_loopback_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(200, LANDING_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    // `localhost` resolves to 127.0.0.1; going through the fetcher directly
    // leaves the resolver as the only guard.
    let fetcher = PageFetcher::new(&Config {
        allow_private_hosts: false,
        ..test_config(5)
    })
    .unwrap();
    let port = server.address().port();
    let url = Url::parse(&format!("http://localhost:{port}/")).unwrap();
    let err = fetcher.fetch_page(&url).await.unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidUrl(_)), "unexpected error: {err:?}");
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_hostname_resolving_to_loopback_allowed_with_opt_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(200, LANDING_PAGE))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&test_config(5)).unwrap();
    let port = server.address().port();
    let url = Url::parse(&format!("http://localhost:{port}/")).unwrap();
    let page = fetcher.fetch_page(&url).await.unwrap();
    assert_eq!(page.http_status, 200);
    assert!(!page.truncated);
}

#[tokio::test]
async fn test_oversized_body_is_truncated_and_analyzed() {
    let server = MockServer::start().await;
    let padding = "<p>filler paragraph for a very long page</p>".repeat(MAX_RESPONSE_BODY_SIZE / 40);
    let body = format!("<html><head><title>Huge page</title></head><body>{padding}</body></html>");
    assert!(body.len() > MAX_RESPONSE_BODY_SIZE);
    Mock::given(method("GET"))
        .respond_with(html_response(200, &body))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&test_config(10)).unwrap();
    let page = fetcher
        .fetch_page(&Url::parse(&server.uri()).unwrap())
        .await
        .unwrap();
    assert!(page.truncated);
    assert!(page.html.len() <= MAX_RESPONSE_BODY_SIZE);

    let result = test_analyzer(10).analyze(url_request(&server.uri())).await.unwrap();
    assert_eq!(result.signals.title, "Huge page");
    assert_eq!(result.signals.http_status, Some(200));
}

#[tokio::test]
async fn test_non_html_content_is_analyzed_anyway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string("<title>Plain text that looks like markup</title>"),
        )
        .mount(&server)
        .await;

    let result = test_analyzer(5)
        .analyze(url_request(&server.uri()))
        .await
        .unwrap();
    assert_eq!(result.signals.title, "Plain text that looks like markup");
}
