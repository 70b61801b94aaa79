// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server and routing

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::content::PageFetcher;
use crate::prompt::PromptFormatter;
use crate::search::ResultScraper;
use crate::time_source::TimeFetcher;

use super::search::search_handler;

/// Shared state for all handlers
///
/// The pipeline components are self-contained per request; this is the
/// only state shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scraper: Arc<ResultScraper>,
    pub fetcher: Arc<PageFetcher>,
    pub time_fetcher: Arc<TimeFetcher>,
    pub formatter: PromptFormatter,
}

impl AppState {
    /// Build the shared state from service configuration
    pub fn new(config: AppConfig) -> Self {
        let scraper = Arc::new(ResultScraper::new(config.scrape.clone()));
        let fetcher = Arc::new(PageFetcher::new(config.fetch.clone()));
        let time_fetcher = Arc::new(TimeFetcher::new(config.time_sources.clone()));

        Self {
            config: Arc::new(config),
            scraper,
            fetcher,
            time_fetcher,
            formatter: PromptFormatter::default(),
        }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search_handler))
        .route("/current_time", get(current_time_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve the API
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let port = config.port;
    let state = AppState::new(config);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health - simple liveness check
async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "healthy"}))
}

/// GET /version - build information
async fn version_handler() -> impl IntoResponse {
    Json(crate::version::get_version_info())
}

/// GET /current_time - current time from online sources or the system clock
async fn current_time_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl IntoResponse {
    let info = state.time_fetcher.current_time().await;
    Json(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_and_router_build() {
        let state = AppState::new(AppConfig::default());
        let _ = router(state);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
