//! Error types for the launch service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Service Error Enum ==
/// Unified error type for the launch service.
///
/// Malformed client input never surfaces here; it degrades to defaults
/// while parsing. Every variant originates from the data source or from
/// rendering.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The provider could not be reached
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// The provider answered with a non-success status
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// A payload could not be decoded or encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Upstream(_)
            | ServiceError::UpstreamStatus { .. }
            | ServiceError::Json(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!(status = status.as_u16(), "{}", self);

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the launch service.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let resp = ServiceError::Upstream("connection refused".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = ServiceError::UpstreamStatus {
            status: 503,
            message: "maintenance".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let resp = ServiceError::Internal("boom".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_error_message() {
        let err = ServiceError::UpstreamStatus {
            status: 404,
            message: "no such route".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream returned status 404: no such route");
    }
}
