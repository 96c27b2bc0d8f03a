//! Centralized error handling.
//!
//! Provides the closed error taxonomy used across the application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Whether internal error details (database/server failures) are included in
/// response bodies. Controlled by `APP_DEBUG`; debug builds default to on.
static EXPOSE_INTERNAL_DETAILS: Lazy<bool> = Lazy::new(|| {
    std::env::var("APP_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(cfg!(debug_assertions))
});

/// Error kinds with a fixed type label and HTTP status code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    InvalidField,
    Database,
    Server,
}

impl ErrorKind {
    /// Machine-readable type label carried in the response body
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request Error",
            ErrorKind::Unauthorized => "Unauthorized Error",
            ErrorKind::Forbidden => "Forbidden Error",
            ErrorKind::NotFound => "Not Found Error",
            ErrorKind::Conflict => "Conflict Error",
            ErrorKind::InvalidField => "Invalid Field Error",
            ErrorKind::Database => "Database Error",
            ErrorKind::Server => "Server Error",
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::BadRequest | ErrorKind::InvalidField => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database | ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "The request contains invalid parameters.",
            ErrorKind::Unauthorized => "Authentication is required to access this resource.",
            ErrorKind::Forbidden => "You do not have permission to access this resource.",
            ErrorKind::NotFound => "The requested resource was not found.",
            ErrorKind::Conflict => "A conflict occurred with the requested operation.",
            ErrorKind::InvalidField => "A field referenced in the request does not exist.",
            ErrorKind::Database => "An error occurred in the database.",
            ErrorKind::Server => "An internal server error occurred.",
        }
    }

    /// Internal details of this kind are withheld from response bodies
    /// unless the deployment opts into exposing them.
    fn masks_details(&self) -> bool {
        matches!(self, ErrorKind::Database | ErrorKind::Server)
    }
}

/// Application error. Immutable once constructed; the emission timestamp is
/// taken at construction time.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    details: Option<String>,
    time: DateTime<Utc>,
}

impl AppError {
    /// Build an error of the given kind with an overridden message.
    pub fn new(kind: ErrorKind, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
            time: Utc::now(),
        }
    }

    /// Build an error of the given kind with its default message.
    pub fn of(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self::new(kind, kind.default_message(), Some(details.into()))
    }

    pub fn bad_request(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message, Some(details.into()))
    }

    pub fn unauthorized(details: impl Into<String>) -> Self {
        Self::of(ErrorKind::Unauthorized, details)
    }

    pub fn forbidden(details: impl Into<String>) -> Self {
        Self::of(ErrorKind::Forbidden, details)
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::of(ErrorKind::NotFound, details)
    }

    pub fn conflict(details: impl Into<String>) -> Self {
        Self::of(ErrorKind::Conflict, details)
    }

    pub fn invalid_field(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidField, message, Some(details.into()))
    }

    pub fn database(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message, Some(details.into()))
    }

    /// Request payload rejected before reaching a service
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message, None)
    }

    pub fn server(details: impl Into<String>) -> Self {
        Self::of(ErrorKind::Server, details)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Uniform error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// The type of the error
    #[schema(example = "Conflict Error")]
    pub r#type: String,
    /// HTTP status code
    #[schema(example = 409)]
    pub code: u16,
    /// Human-readable error message
    pub message: String,
    /// Additional details about the error
    pub details: Option<String>,
    /// Timestamp of when the error occurred
    pub time: DateTime<Utc>,
}

impl From<&AppError> for ErrorDetail {
    fn from(err: &AppError) -> Self {
        let details = if err.kind.masks_details() && !*EXPOSE_INTERNAL_DETAILS {
            None
        } else {
            err.details.clone()
        };

        Self {
            r#type: err.kind.label().to_string(),
            code: err.kind.status().as_u16(),
            message: err.message.clone(),
            details,
            time: err.time,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind.masks_details() {
            tracing::error!(
                kind = self.kind.label(),
                details = self.details.as_deref().unwrap_or(""),
                "{}",
                self.message
            );
        }

        (self.kind.status(), Json(ErrorDetail::from(&self))).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
