//! Error types for the cache admin API
//!
//! The cache itself never fails; these errors cover rejected admin requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Api Error Enum ==
/// Error type returned by admin API handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for admin handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
