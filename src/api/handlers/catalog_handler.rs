//! Catalog entry handlers.
//!
//! Every entity router shares these handlers; the entity they operate on is
//! decided by the service instance baked into the router's state.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::domain::{CatalogRequest, CatalogResponse};
use crate::errors::AppResult;
use crate::services::CatalogService;
use crate::types::{Created, MessageResponse, Page, PageQuery, SearchQuery};

type Service = State<Arc<dyn CatalogService>>;

/// Build the routes for one catalog entity, backed by the given service.
pub fn catalog_routes(service: Arc<dyn CatalogService>) -> Router {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/paginated", get(get_paginated))
        .route("/search", get(search))
        .route("/:id", get(get_by_id).put(update).delete(delete))
        .with_state(service)
}

/// Create a new catalog entry
async fn create(
    State(service): Service,
    ValidatedJson(request): ValidatedJson<CatalogRequest>,
) -> AppResult<Created<CatalogResponse>> {
    Ok(Created(service.add(request).await?))
}

/// Get all entries
async fn get_all(State(service): Service) -> AppResult<Json<Vec<CatalogResponse>>> {
    Ok(Json(service.get_all().await?))
}

/// Get entries with pagination
async fn get_paginated(
    State(service): Service,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<CatalogResponse>>> {
    Ok(Json(service.get_paginated(query.page, query.size).await?))
}

/// Search entries by a term matched against names
async fn search(
    State(service): Service,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Page<CatalogResponse>>> {
    let term = query.search_term.unwrap_or_default();
    Ok(Json(service.find(query.page, query.size, term).await?))
}

/// Get one entry by id
async fn get_by_id(
    State(service): Service,
    Path(id): Path<i64>,
) -> AppResult<Json<CatalogResponse>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Rename an entry
async fn update(
    State(service): Service,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CatalogRequest>,
) -> AppResult<Json<CatalogResponse>> {
    Ok(Json(service.update(id, request).await?))
}

/// Delete an entry
async fn delete(
    State(service): Service,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(service.delete(id).await?))
}
