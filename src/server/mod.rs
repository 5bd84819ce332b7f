//! HTTP API.
//!
//! Provides these endpoints:
//! - `GET /api/health` - liveness probe
//! - `GET /api/analyze?url=` and `POST /api/analyze` - fetch and analyze a URL
//! - `POST /api/analyze-html` - analyze supplied markup
//! - `GET /api/roi/:play` - ROI range for one play, calibration in the query
//!
//! All handlers share one immutable `Analyzer`; requests share no mutable state.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::analysis::Analyzer;
use handlers::{
    analyze_get_handler, analyze_html_handler, analyze_post_handler, health_handler, roi_handler,
};
pub use types::ErrorBody;

/// Builds the API router.
pub fn build_router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/analyze",
            get(analyze_get_handler).post(analyze_post_handler),
        )
        .route("/api/analyze-html", axum::routing::post(analyze_html_handler))
        .route("/api/roi/:play", get(roi_handler))
        .with_state(analyzer)
}

/// Serves the API on an already-bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, analyzer: Arc<Analyzer>) -> Result<(), anyhow::Error> {
    axum::serve(listener, build_router(analyzer))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down API server");
        })
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))
}

/// Binds `127.0.0.1:port` and serves the API.
pub async fn start_server(port: u16, analyzer: Arc<Analyzer>) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {}: {}", port, e))?;

    let addr = listener.local_addr()?;
    log::info!("API server listening on http://{}/", addr);
    log::info!("  - Health: http://{}/api/health", addr);
    log::info!("  - Analyze: http://{}/api/analyze?url=...", addr);

    serve(listener, analyzer).await
}
