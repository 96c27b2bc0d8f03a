//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::catalog_routes;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::API_PREFIX;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // One router per entity, each carrying its own service as state
    let catalogs = Router::new()
        .nest("/roles", catalog_routes(state.roles.clone()))
        .nest("/departments", catalog_routes(state.departments.clone()))
        .nest(
            "/document-categories",
            catalog_routes(state.document_categories.clone()),
        )
        .nest(
            "/documentary-topics",
            catalog_routes(state.documentary_topics.clone()),
        )
        .nest("/settlements", catalog_routes(state.settlements.clone()));

    let system = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state);

    Router::new()
        .merge(system)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_PREFIX, catalogs)
        .layer(TraceLayer::new_for_http())
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to File Track API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = db_status.status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database: db_status,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
