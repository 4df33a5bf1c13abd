use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use phonebase_domain::DomainError;

/// Maps domain errors onto the wire contract. Store failures answer with a
/// generic body; their detail is logged, never returned.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            DomainError::DeviceNotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Device not found" }),
            ),
            DomainError::NoSearchMatches(_) => (
                StatusCode::NOT_FOUND,
                json!({ "message": "No devices found matching the search term" }),
            ),
            DomainError::EmptySearchTerm => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Search term is required" }),
            ),
            DomainError::InvalidDeviceId(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Device ID is required" }),
            ),
            DomainError::EmptyUpdate => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Update data is required" }),
            ),
            DomainError::NoValidUpdateFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No valid fields to update" }),
            ),
            DomainError::InvalidUpdateValue(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Invalid update data: {}", detail) }),
            ),
            DomainError::Repository(err) => {
                error!("repository error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
