//! API handlers for the data analysis server
//!
//! Provides REST endpoints for:
//! - API metadata and health
//! - Dataset analysis (descriptive statistics)
//! - Dataset quality scoring
//! - Retrieval of the last analysis

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use stats_core::{analyze, score, AnalysisStore, NumericSample, ScoreReport, StatisticsReport};
use tracing::{info, warn};

use crate::error::ApiError;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Latest successful analysis
    pub store: Arc<AnalysisStore>,
}

/// API metadata response
#[derive(Serialize)]
pub struct ApiInfo {
    pub api: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Handler: GET /
pub async fn handle_info() -> Json<ApiInfo> {
    info!("GET / - API info");

    let endpoints = BTreeMap::from([
        ("GET /", "API information"),
        ("GET /health", "Service health check"),
        ("GET /stats/summary", "Summary of the last analysis"),
        ("POST /stats/analyze", "Analyze a new dataset"),
        ("POST /stats/score", "Score the quality of a dataset"),
    ]);

    Json(ApiInfo {
        api: "Data Analysis API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Statistical analysis of numeric datasets",
        endpoints,
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "stats-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: GET /stats/summary
pub async fn handle_summary(
    State(state): State<AppState>,
) -> Result<Json<StatisticsReport>, ApiError> {
    info!("GET /stats/summary");

    let report = state.store.get().ok_or(ApiError::NoAnalysis)?;
    Ok(Json(StatisticsReport::clone(&report)))
}

/// Handler: POST /stats/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StatisticsReport>, ApiError> {
    let sample = parse_sample("/stats/analyze", payload)?;
    info!("POST /stats/analyze - analyzing {} values", sample.len());

    let report = analyze(&sample);
    state.store.put(report.clone());

    Ok(Json(report))
}

/// Handler: POST /stats/score
pub async fn handle_score(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ScoreReport>, ApiError> {
    let sample = parse_sample("/stats/score", payload)?;
    info!("POST /stats/score - scoring {} values", sample.len());

    let report = score(&sample);
    info!(
        "POST /stats/score - score {} ({})",
        report.score, report.quality
    );

    Ok(Json(report))
}

/// Turn a raw request body into a validated sample, logging rejections.
fn parse_sample(
    route: &str,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<NumericSample, ApiError> {
    let result = payload
        .map_err(ApiError::from)
        .and_then(|Json(body)| NumericSample::from_payload(&body).map_err(ApiError::from));

    if let Err(e) = &result {
        warn!("POST {} - rejected: {}", route, e);
    }
    result
}
