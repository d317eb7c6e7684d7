//! HTTP server for the analytics API

use super::handler::{
    communities_handler, graph_stats_handler, health_handler, query_handler, risk_handler,
};
use crate::analyzer::GraphAnalyzer;
use crate::config::ServiceConfig;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// CORS restricted to `origins`. Methods and headers are mirrored because
/// credentials are allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// All routes, bound to one shared analyzer
pub fn router(analyzer: Arc<GraphAnalyzer>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/query", post(query_handler))
        .route("/health", get(health_handler))
        .route("/graph-stats", get(graph_stats_handler))
        .route("/communities", get(communities_handler))
        .route("/risk-analysis", get(risk_handler))
        .layer(cors_layer(allowed_origins))
        .with_state(analyzer)
}

/// HTTP server for the analytics API
pub struct HttpServer {
    analyzer: Arc<GraphAnalyzer>,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(analyzer: Arc<GraphAnalyzer>, config: ServiceConfig) -> Self {
        Self { analyzer, config }
    }

    /// Bind and serve until the process stops
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.analyzer), &self.config.allowed_origins);

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(
            origins = ?self.config.allowed_origins,
            "Analytics API listening on http://{}", addr
        );

        axum::serve(listener, app).await
    }
}
