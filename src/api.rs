//! REST API Server for the market brief orchestrator
//!
//! Exposes the pipeline and the analysis passthrough via HTTP endpoints
//! Integrates with the browser UI

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agents::AnalysisAgent;
use crate::models::{MarketRecord, OrchestratorRequest, OrchestratorResponse};
use crate::orchestrator::Orchestrator;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub market_data: Vec<MarketRecord>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    pub analysis: Arc<dyn AnalysisAgent>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Main Query Endpoint
/// =============================

/// The pipeline never fails outward: any internal error surfaces as a body
/// with status=error, so this endpoint always answers 200 with a response.
async fn process_query(
    State(state): State<ApiState>,
    Json(request): Json<OrchestratorRequest>,
) -> Json<OrchestratorResponse> {
    info!(mode = %request.mode, "Received query request");

    let response = state.orchestrator.process_request(request).await;
    Json(response)
}

/// =============================
/// Analysis Passthrough
/// =============================

/// Peer capability, not part of the pipeline: forwards raw market records to
/// the analysis agent. No degrade contract here, so a collaborator failure
/// surfaces as 502.
async fn analyze(
    State(state): State<ApiState>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!(records = request.market_data.len(), "Received analysis request");

    match state.analysis.comprehensive_analysis(&request.market_data).await {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::success(report))),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::error(format!("Analysis agent failed: {}", e))),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(orchestrator: Arc<Orchestrator>, analysis: Arc<dyn AnalysisAgent>) -> Router {
    let state = ApiState {
        orchestrator,
        analysis,
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/query", post(process_query))
        .route("/api/analyze", post(analyze))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    orchestrator: Arc<Orchestrator>,
    analysis: Arc<dyn AnalysisAgent>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(orchestrator, analysis);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_envelope() {
        let ok = ApiResponse::success(serde_json::json!({"insights": []}));
        assert!(ok.success);
        assert!(ok.error.is_none());

        let err = ApiResponse::error("agent down".to_string());
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("agent down"));
        assert!(err.data.is_none());
    }

    #[test]
    fn test_analyze_request_defaults() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.market_data.is_empty());
    }
}
