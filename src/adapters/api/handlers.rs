//! Route handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::config::ConfigStatus;
use crate::domain::{CompositeAnalysis, MetricKind, NormalizedMetric, Rating, RawProviderMetrics};

/// `POST /analyze` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub score: u8,
    pub rating: Rating,
    pub message: String,
    pub metrics: BTreeMap<MetricKind, NormalizedMetric>,
    pub token_data: RawProviderMetrics,
}

impl From<CompositeAnalysis> for AnalyzeResponse {
    fn from(analysis: CompositeAnalysis) -> Self {
        Self {
            score: analysis.overall_score,
            rating: analysis.rating,
            message: analysis.message,
            metrics: analysis.metrics,
            token_data: analysis.token_data,
        }
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "SniffTools API is running!" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Which credentials are configured; never the values
pub async fn test_config(State(state): State<Arc<AppState>>) -> Json<ConfigStatus> {
    Json(state.config_status)
}

/// Score a token
///
/// The body is read as free-form JSON so a missing or non-string `address`
/// is reported as an invalid address rather than a malformed body.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected /analyze body: {}", rejection);
        ApiError::InvalidBody
    })?;

    let address = body.get("address").and_then(Value::as_str).unwrap_or_default();
    let analysis = state.analyzer.analyze(address).await?;

    Ok(Json(analysis.into()))
}
