//! API error responses
//!
//! Every failure is rendered as `{ "error": <message> }`. Internal details are
//! logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::AnalyzeError;

pub const INVALID_ADDRESS: &str = "Invalid Solana address";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidAddress,
    InvalidBody,
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidAddress | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidAddress => INVALID_ADDRESS,
            ApiError::InvalidBody => INVALID_BODY,
            ApiError::Internal => INTERNAL_ERROR,
        }
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(e: AnalyzeError) -> Self {
        match e {
            AnalyzeError::InvalidAddress(_) => ApiError::InvalidAddress,
            AnalyzeError::Internal(detail) => {
                tracing::error!("Analysis failed: {}", detail);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}
