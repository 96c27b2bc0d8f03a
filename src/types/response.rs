//! Shared response types.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome report for operations that do not return an entity (delete).
///
/// `status_code` reflects the outcome inside the body; the transport status
/// of a handled request stays 200.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Indicates if the operation was successful
    pub success: bool,
    /// Additional details about the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// HTTP status code of the outcome
    pub status_code: u16,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            details: Some(details.into()),
            status_code: StatusCode::OK.as_u16(),
        }
    }

    pub fn failed(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            details: Some(details.into()),
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

/// Created response helper (common pattern for POST endpoints)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
