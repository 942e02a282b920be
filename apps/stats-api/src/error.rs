//! Error types for the data analysis API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stats_core::ValidationError;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Content-Type must be application/json")]
    UnsupportedContentType,

    #[error("invalid request body: {0}")]
    MalformedJson(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("no analysis yet, submit data with POST /stats/analyze")]
    NoAnalysis,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedContentType
            | ApiError::MalformedJson(_)
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NoAnalysis => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedContentType,
            other => ApiError::MalformedJson(other.body_text()),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
