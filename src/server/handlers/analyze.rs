//! Analyze handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::analysis::Analyzer;
use crate::error_handling::AnalysisError;
use crate::models::{AnalysisResult, PageSource};

use super::super::types::{AnalyzeHtmlBody, AnalyzeUrlBody, AnalyzeUrlQuery, ApiError};

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

async fn analyze_url(
    analyzer: &Analyzer,
    body: AnalyzeUrlBody,
) -> Result<Json<AnalysisResult>, ApiError> {
    let url = body
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AnalysisError::InvalidUrl("url is required".to_string()))?;
    let request = body.options.into_request(PageSource::Url(url))?;
    Ok(Json(analyzer.analyze(request).await?))
}

/// `GET /api/analyze?url=...`
pub async fn analyze_get_handler(
    State(analyzer): State<Arc<Analyzer>>,
    Query(query): Query<AnalyzeUrlQuery>,
) -> Result<Json<AnalysisResult>, ApiError> {
    analyze_url(&analyzer, query.into()).await
}

/// `POST /api/analyze`
pub async fn analyze_post_handler(
    State(analyzer): State<Arc<Analyzer>>,
    body: Result<Json<AnalyzeUrlBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    analyze_url(&analyzer, json_body(body)?).await
}

/// `POST /api/analyze-html`
pub async fn analyze_html_handler(
    State(analyzer): State<Arc<Analyzer>>,
    body: Result<Json<AnalyzeHtmlBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let body = json_body(body)?;
    let html = body
        .html
        .ok_or_else(|| ApiError::bad_request("html is required".to_string()))?;
    let request = body
        .options
        .into_request(PageSource::Html { html, url: body.url })?;
    Ok(Json(analyzer.analyze(request).await?))
}
