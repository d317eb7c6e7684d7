//! HTTP handlers for the analytics API

use crate::algo::CommunityAlgorithm;
use crate::analytics::{Community, GraphStats, RiskEntry};
use crate::analyzer::{AnalyzerError, GraphAnalyzer};
use crate::query::QueryResponse;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

const DEFAULT_ALGORITHM: &str = "louvain";
const DEFAULT_MAX_COMMUNITIES: usize = 10;
const DEFAULT_NUM_SUPPLIERS: usize = 10;

/// Body of `POST /query`
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Query string of `GET /communities`. The algorithm stays a plain name so an
/// unknown one can answer with an empty list.
#[derive(Debug, Deserialize)]
pub struct CommunitiesParams {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_max_communities")]
    pub max_communities: usize,
}

#[derive(Debug, Deserialize)]
pub struct RiskParams {
    #[serde(default = "default_num_suppliers")]
    pub num_suppliers: usize,
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.to_string()
}

fn default_max_communities() -> usize {
    DEFAULT_MAX_COMMUNITIES
}

fn default_num_suppliers() -> usize {
    DEFAULT_NUM_SUPPLIERS
}

/// Any failure while serving a request. Rendered as 500 `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(AnalyzerError);

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

/// Handler for free-text queries
pub async fn query_handler(
    State(analyzer): State<Arc<GraphAnalyzer>>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    Ok(Json(analyzer.query(payload.query).await?))
}

/// Liveness check. Never touches the graph.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn graph_stats_handler(
    State(analyzer): State<Arc<GraphAnalyzer>>,
) -> Result<Json<GraphStats>, ApiError> {
    Ok(Json(analyzer.graph_stats().await?))
}

pub async fn communities_handler(
    State(analyzer): State<Arc<GraphAnalyzer>>,
    Query(params): Query<CommunitiesParams>,
) -> Result<Json<Vec<Community>>, ApiError> {
    let algorithm = match params.algorithm.parse::<CommunityAlgorithm>() {
        Ok(algorithm) => algorithm,
        Err(e) => {
            // Still surface load failures before answering
            analyzer.graph().await?;
            warn!(error = %e, "Returning no communities");
            return Ok(Json(Vec::new()));
        }
    };

    let communities = analyzer
        .communities(algorithm, params.max_communities)
        .await?;
    Ok(Json(communities))
}

pub async fn risk_handler(
    State(analyzer): State<Arc<GraphAnalyzer>>,
    Query(params): Query<RiskParams>,
) -> Result<Json<Vec<RiskEntry>>, ApiError> {
    Ok(Json(analyzer.risk_analysis(params.num_suppliers).await?))
}
